//! crates/lesson_admin_core/src/ports.rs
//!
//! Defines the service contracts (traits) the admin core depends on.
//! The lesson API, the credential slot and the router are external
//! collaborators; the core only sees these traits.

use async_trait::async_trait;

use crate::domain::{Credential, Lesson, LessonId, LessonPatch, ListScope, Program, Route};

//=========================================================================================
// Failure Taxonomy
//=========================================================================================

/// Every way a call to the lesson API can fail. All of them are plain values;
/// none is fatal to the session that observed it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// No credential was available, so the request was never attempted.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Http {
        status: u16,
        /// The `message` field of the error body, when the server sent one.
        message: Option<String>,
        body: String,
    },

    /// The request did not produce a usable response.
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiFailure {
    /// Picks the most specific text available: the server's own message when it
    /// sent one, otherwise the caller's generic wording for the status code or a
    /// transport failure.
    pub fn describe(
        &self,
        on_status: impl FnOnce(u16) -> String,
        on_network: &str,
    ) -> String {
        match self {
            ApiFailure::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ApiFailure::Http { status, .. } => on_status(*status),
            ApiFailure::Network(_) => on_network.to_string(),
            ApiFailure::Unauthenticated => "Please log in again to get a fresh token.".to_string(),
        }
    }
}

/// A convenience type alias for `Result<T, ApiFailure>`.
pub type ApiResult<T> = Result<T, ApiFailure>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait LessonApi: Send + Sync {
    /// `POST /auth/login`.
    async fn authenticate(&self, email: &str, password: &str) -> ApiResult<Credential>;

    /// `GET /lessons/{id}`.
    async fn fetch_lesson(&self, id: &LessonId, credential: &Credential) -> ApiResult<Lesson>;

    /// `PATCH /lessons/{id}`; returns the lesson as the server now sees it.
    async fn patch_lesson(
        &self,
        id: &LessonId,
        patch: &LessonPatch,
        credential: &Credential,
    ) -> ApiResult<Lesson>;

    /// Lists lessons for a scope. A single-object response is returned as a
    /// one-element vector.
    async fn list_lessons(&self, scope: ListScope, credential: &Credential)
        -> ApiResult<Vec<Lesson>>;

    /// `GET /programs`.
    async fn list_programs(&self, credential: &Credential) -> ApiResult<Vec<Program>>;
}

/// The process-local `accessToken` slot.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<Credential>;
    fn store(&self, credential: Credential);
    fn clear(&self);
}

/// Moves the operator between views.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
