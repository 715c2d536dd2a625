//! An in-process lesson API for exercising the HTTP adapter end to end.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};

pub const TOKEN: &str = "server-token";
pub const EMAIL: &str = "admin@chaishots.test";
pub const PASSWORD: &str = "Admin123!";

#[derive(Default)]
pub struct ServerState {
    pub lessons: Mutex<BTreeMap<String, Value>>,
    pub patch_bodies: Mutex<Vec<Value>>,
    /// When set, every PATCH answers with this status and body.
    pub patch_error: Mutex<Option<(StatusCode, Value)>>,
}

impl ServerState {
    pub fn with_lessons(lessons: Vec<Value>) -> Arc<Self> {
        let state = Self::default();
        {
            let mut map = state.lessons.lock().unwrap();
            for lesson in lessons {
                let id = lesson["id"].as_str().unwrap().to_string();
                map.insert(id, lesson);
            }
        }
        Arc::new(state)
    }

    pub fn lesson(&self, id: &str) -> Value {
        self.lessons.lock().unwrap()[id].clone()
    }

    pub fn patch_bodies(&self) -> Vec<Value> {
        self.patch_bodies.lock().unwrap().clone()
    }
}

pub fn video_lesson(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Masala chai at home",
        "status": "SCHEDULED",
        "publishAt": "2024-01-01T10:00:00.000Z",
        "publishedAt": null,
        "isPaid": true,
        "contentType": "VIDEO",
        "durationMs": 240000
    })
}

pub fn article_lesson(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Tea estates of Assam",
        "status": "DRAFT",
        "publishAt": null,
        "publishedAt": null,
        "isPaid": false,
        "contentType": "ARTICLE",
        "durationMs": null
    })
}

/// Starts the fake API on an ephemeral port and returns its base URL.
pub async fn spawn_server(state: Arc<ServerState>) -> Url {
    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/lessons", get(all_lessons))
        .route("/lessons/latest", get(latest_lesson))
        .route("/lessons/{id}", get(get_lesson).patch(patch_lesson))
        .route("/programs", get(programs))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}", address)).unwrap()
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", address)).unwrap()
}

fn error(status: StatusCode, message: Value) -> Response {
    (
        status,
        Json(json!({ "statusCode": status.as_u16(), "message": message })),
    )
        .into_response()
}

fn authorize(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, json!("Unauthorized"))),
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    if email.is_empty() {
        return error(
            StatusCode::BAD_REQUEST,
            json!(["email must be an email", "password should not be empty"]),
        );
    }
    if email == EMAIL && password == PASSWORD {
        Json(json!({ "accessToken": TOKEN, "user": { "email": EMAIL } })).into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, json!("Invalid credentials"))
    }
}

async fn get_lesson(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(denied) = authorize(&headers) {
        return denied;
    }
    match state.lessons.lock().unwrap().get(&id) {
        Some(lesson) => Json(lesson.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, json!("Lesson not found")),
    }
}

async fn patch_lesson(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&headers) {
        return denied;
    }
    state.patch_bodies.lock().unwrap().push(body.clone());
    if let Some((status, payload)) = state.patch_error.lock().unwrap().clone() {
        return (status, Json(payload)).into_response();
    }
    let mut lessons = state.lessons.lock().unwrap();
    let Some(lesson) = lessons.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, json!("Lesson not found"));
    };
    if let (Some(target), Some(changes)) = (lesson.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(lesson.clone()).into_response()
}

async fn latest_lesson(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&headers) {
        return denied;
    }
    // A bare object, not an array.
    match state.lessons.lock().unwrap().values().next_back() {
        Some(lesson) => Json(lesson.clone()).into_response(),
        None => Json(json!([])).into_response(),
    }
}

async fn all_lessons(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&headers) {
        return denied;
    }
    let lessons: Vec<Value> = state.lessons.lock().unwrap().values().cloned().collect();
    Json(lessons).into_response()
}

async fn programs(headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&headers) {
        return denied;
    }
    Json(json!([
        { "id": "p1", "title": "Chai Basics", "languagePrimary": "en", "status": "PUBLISHED" },
        { "id": "p2", "title": "Chai ki Kahani", "languagePrimary": "hi", "status": "DRAFT" }
    ]))
    .into_response()
}
