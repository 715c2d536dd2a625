//! In-memory stand-ins for the lesson API and the router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lesson_admin_core::{
    ApiFailure, ApiResult, AuthContext, ContentType, Credential, Lesson, LessonApi, LessonId,
    LessonPatch, LessonStatus, ListScope, MemoryCredentialStore, Navigator, Program, Route,
};
use tokio::sync::Notify;

pub const TOKEN: &str = "test-token";

/// A lesson server holding one lesson in memory.
#[derive(Default)]
pub struct FakeLessonApi {
    pub lesson: Mutex<Option<Lesson>>,
    pub fetch_failure: Mutex<Option<ApiFailure>>,
    pub patch_failure: Mutex<Option<ApiFailure>>,
    pub list_failure: Mutex<Option<ApiFailure>>,
    pub login_result: Mutex<Option<ApiResult<Credential>>>,
    pub programs: Mutex<Vec<Program>>,
    /// When set, `fetch_lesson` waits for a notification before answering.
    pub fetch_gate: Mutex<Option<Arc<Notify>>>,
    /// When set, `patch_lesson` waits for a notification before answering.
    pub patch_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: Mutex<Vec<String>>,
    pub patches: Mutex<Vec<LessonPatch>>,
}

impl FakeLessonApi {
    pub fn with_lesson(lesson: Lesson) -> Self {
        let api = Self::default();
        *api.lesson.lock().unwrap() = Some(lesson);
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("fetch")).count()
    }

    pub fn patch_count(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("patch")).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, credential: &Credential) -> ApiResult<()> {
        if credential.expose() == TOKEN {
            Ok(())
        } else {
            Err(ApiFailure::Http {
                status: 401,
                message: Some("Unauthorized".to_string()),
                body: String::new(),
            })
        }
    }
}

#[async_trait]
impl LessonApi for FakeLessonApi {
    async fn authenticate(&self, email: &str, _password: &str) -> ApiResult<Credential> {
        self.record(format!("login {}", email));
        self.login_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Credential::new(TOKEN)))
    }

    async fn fetch_lesson(&self, id: &LessonId, credential: &Credential) -> ApiResult<Lesson> {
        self.record(format!("fetch {}", id));
        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check(credential)?;
        if let Some(failure) = self.fetch_failure.lock().unwrap().clone() {
            return Err(failure);
        }
        self.lesson.lock().unwrap().clone().ok_or(ApiFailure::Http {
            status: 404,
            message: None,
            body: String::new(),
        })
    }

    async fn patch_lesson(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        credential: &Credential,
    ) -> ApiResult<Lesson> {
        self.record(format!("patch {}", id));
        let gate = self.patch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.check(credential)?;
        self.patches.lock().unwrap().push(patch.clone());
        if let Some(failure) = self.patch_failure.lock().unwrap().clone() {
            return Err(failure);
        }

        let mut stored = self.lesson.lock().unwrap();
        let lesson = stored.as_mut().ok_or(ApiFailure::Http {
            status: 404,
            message: Some("Lesson not found".to_string()),
            body: String::new(),
        })?;
        lesson.status = patch.status;
        lesson.publish_at = patch
            .publish_at
            .as_deref()
            .map(|raw| raw.parse::<DateTime<Utc>>().unwrap());
        lesson.is_paid = patch.is_paid;
        lesson.content_type = patch.content_type;
        lesson.duration_ms = patch.duration_ms;
        if lesson.status == LessonStatus::Published && lesson.published_at.is_none() {
            lesson.published_at = Some(Utc::now());
        }
        Ok(lesson.clone())
    }

    async fn list_lessons(
        &self,
        scope: ListScope,
        credential: &Credential,
    ) -> ApiResult<Vec<Lesson>> {
        self.record(format!("list {}", scope.path()));
        self.check(credential)?;
        if let Some(failure) = self.list_failure.lock().unwrap().clone() {
            return Err(failure);
        }
        Ok(self.lesson.lock().unwrap().clone().into_iter().collect())
    }

    async fn list_programs(&self, credential: &Credential) -> ApiResult<Vec<Program>> {
        self.record("programs".to_string());
        self.check(credential)?;
        if let Some(failure) = self.list_failure.lock().unwrap().clone() {
            return Err(failure);
        }
        Ok(self.programs.lock().unwrap().clone())
    }
}

/// Remembers every navigation.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub struct Harness {
    pub api: Arc<FakeLessonApi>,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub auth: AuthContext,
}

impl Harness {
    pub fn signed_in(api: FakeLessonApi) -> Self {
        Self::build(api, MemoryCredentialStore::with_credential(Credential::new(TOKEN)))
    }

    pub fn signed_out(api: FakeLessonApi) -> Self {
        Self::build(api, MemoryCredentialStore::new())
    }

    fn build(api: FakeLessonApi, store: MemoryCredentialStore) -> Self {
        let api = Arc::new(api);
        let store = Arc::new(store);
        let navigator = Arc::new(RecordingNavigator::default());
        let auth = AuthContext::new(api.clone(), store.clone(), navigator.clone());
        Self {
            api,
            store,
            navigator,
            auth,
        }
    }
}

pub fn lesson_id() -> LessonId {
    LessonId::parse("lesson-1").unwrap()
}

pub fn scheduled_video() -> Lesson {
    Lesson {
        id: lesson_id(),
        title: "Knife skills".to_string(),
        status: LessonStatus::Scheduled,
        publish_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
        published_at: None,
        is_paid: true,
        content_type: ContentType::Video,
        duration_ms: Some(90_000),
    }
}

pub fn draft_article() -> Lesson {
    Lesson {
        id: lesson_id(),
        title: "Reading list".to_string(),
        status: LessonStatus::Draft,
        publish_at: None,
        published_at: None,
        is_paid: false,
        content_type: ContentType::Article,
        duration_ms: None,
    }
}
