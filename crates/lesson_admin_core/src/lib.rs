pub mod auth;
pub mod domain;
pub mod edit_session;
pub mod list_view;
pub mod ports;
pub mod publish_at;
pub mod validation;

pub use auth::{AuthContext, MemoryCredentialStore};
pub use domain::{ContentType, Credential, Lesson, LessonId, LessonPatch, LessonStatus, ListScope, Program, Route};
pub use edit_session::{EditPhase, EditSession, EditView, LoadOutcome, SaveOutcome};
pub use list_view::{LessonListView, Listing, LoadStatus, ProgramListView};
pub use ports::{ApiFailure, ApiResult, CredentialStore, LessonApi, Navigator};
pub use validation::{validate, LessonForm, Violation};
