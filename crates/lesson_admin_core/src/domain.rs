//! crates/lesson_admin_core/src/domain.rs
//!
//! Defines the core data structures shared by the admin client.
//! Lessons and programs are server-owned; the client only ever reads them
//! or sends a `LessonPatch` describing the publishing metadata to change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Identifiers and Credentials
//=========================================================================================

/// Opaque, server-assigned lesson identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    /// Builds an id from user or route input. Blank input has no lesson behind it.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer token proving the operator's identity to the lesson API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Tokens end up in log lines through `{:?}` far too easily.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

//=========================================================================================
// Lesson
//=========================================================================================

/// Publication lifecycle of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
    Archived,
}

impl LessonStatus {
    pub const ALL: [LessonStatus; 4] = [
        LessonStatus::Draft,
        LessonStatus::Scheduled,
        LessonStatus::Published,
        LessonStatus::Archived,
    ];

    /// Scheduling or publishing without a target time is meaningless.
    pub fn requires_publish_at(self) -> bool {
        matches!(self, LessonStatus::Scheduled | LessonStatus::Published)
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            LessonStatus::Draft => "DRAFT",
            LessonStatus::Scheduled => "SCHEDULED",
            LessonStatus::Published => "PUBLISHED",
            LessonStatus::Archived => "ARCHIVED",
        }
    }

    /// Case-insensitive lookup used by command-line input.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_wire().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Kind of material a lesson delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentType {
    #[default]
    #[serde(rename = "VIDEO", alias = "video")]
    Video,
    #[serde(rename = "ARTICLE", alias = "article")]
    Article,
}

impl ContentType {
    pub fn as_wire(self) -> &'static str {
        match self {
            ContentType::Video => "VIDEO",
            ContentType::Article => "ARTICLE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "VIDEO" => Some(ContentType::Video),
            "ARTICLE" => Some(ContentType::Article),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A lesson as returned by the lesson API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub status: LessonStatus,
    #[serde(default)]
    pub publish_at: Option<DateTime<Utc>>,
    /// Set by the server when the lesson actually went live. Never sent back.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_paid: bool,
    pub content_type: ContentType,
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

/// Body of `PATCH /lessons/{id}`.
///
/// Absent optional fields are sent as explicit `null` so the server clears them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPatch {
    pub status: LessonStatus,
    pub publish_at: Option<String>,
    pub is_paid: bool,
    pub content_type: ContentType,
    pub duration_ms: Option<i64>,
}

//=========================================================================================
// Programs, Scopes and Routes
//=========================================================================================

/// A program groups lessons; the admin client only lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub language_primary: String,
    pub status: String,
}

/// Which lesson collection a list view asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Latest,
    All,
}

impl ListScope {
    /// Endpoint path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            ListScope::Latest => "lessons/latest",
            ListScope::All => "lessons",
        }
    }
}

/// Views the client can navigate between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    /// The dashboard: the lesson list.
    Lessons,
    LessonEdit(LessonId),
    Programs,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Lessons => f.write_str("/lessons"),
            Route::LessonEdit(id) => write!(f, "/lessons/{}", id),
            Route::Programs => f.write_str("/programs"),
        }
    }
}
