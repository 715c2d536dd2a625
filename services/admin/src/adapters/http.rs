//! services/admin/src/adapters/http.rs
//!
//! This module contains the HTTP adapter for the lesson API.
//! It implements the `LessonApi` port from the `core` crate with `reqwest`.

use async_trait::async_trait;
use lesson_admin_core::domain::{Credential, Lesson, LessonId, LessonPatch, ListScope, Program};
use lesson_admin_core::ports::{ApiFailure, ApiResult, LessonApi};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

/// Some list endpoints answer with a bare object instead of an array.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `LessonApi` port over HTTP + JSON.
#[derive(Clone)]
pub struct HttpLessonApi {
    client: Client,
    base_url: Url,
}

impl HttpLessonApi {
    /// Creates a new `HttpLessonApi` rooted at `base_url`.
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiFailure::Network(format!("'{}' cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    fn lesson_endpoint(&self, id: &LessonId) -> ApiResult<Url> {
        let mut url = self.endpoint("lessons")?;
        url.path_segments_mut()
            .map_err(|_| ApiFailure::Network(format!("'{}' cannot be a base URL", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }

    /// Sends a request and decodes a 2xx JSON body. Non-2xx answers become
    /// `ApiFailure::Http` carrying the server's `message` when it sent one.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to lesson API failed: {}", e);
            ApiFailure::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Lesson API answered {}: {}", status, body);
            return Err(ApiFailure::Http {
                status: status.as_u16(),
                message: server_message(&body),
                body,
            });
        }

        // An undecodable success body is as useless as no response at all.
        response
            .json::<T>()
            .await
            .map_err(|e| ApiFailure::Network(format!("Invalid response body: {}", e)))
    }
}

//=========================================================================================
// `LessonApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl LessonApi for HttpLessonApi {
    async fn authenticate(&self, email: &str, password: &str) -> ApiResult<Credential> {
        let url = self.endpoint("auth/login")?;
        debug!("POST {}", url);
        let response: LoginResponse = self
            .send(self.client.post(url).json(&LoginRequest { email, password }))
            .await?;
        Ok(Credential::new(response.access_token))
    }

    async fn fetch_lesson(&self, id: &LessonId, credential: &Credential) -> ApiResult<Lesson> {
        let url = self.lesson_endpoint(id)?;
        debug!("GET {}", url);
        self.send(self.client.get(url).bearer_auth(credential.expose()))
            .await
    }

    async fn patch_lesson(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        credential: &Credential,
    ) -> ApiResult<Lesson> {
        let url = self.lesson_endpoint(id)?;
        debug!("PATCH {}", url);
        self.send(
            self.client
                .patch(url)
                .bearer_auth(credential.expose())
                .json(patch),
        )
        .await
    }

    async fn list_lessons(
        &self,
        scope: ListScope,
        credential: &Credential,
    ) -> ApiResult<Vec<Lesson>> {
        let url = self.endpoint(scope.path())?;
        debug!("GET {}", url);
        let lessons: OneOrMany<Lesson> = self
            .send(self.client.get(url).bearer_auth(credential.expose()))
            .await?;
        Ok(lessons.into_vec())
    }

    async fn list_programs(&self, credential: &Credential) -> ApiResult<Vec<Program>> {
        let url = self.endpoint("programs")?;
        debug!("GET {}", url);
        self.send(self.client.get(url).bearer_auth(credential.expose()))
            .await
    }
}

/// Extracts `message` from an error body. Validation errors may carry a list
/// of messages, which are joined.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}
