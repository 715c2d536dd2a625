//! crates/lesson_admin_core/src/validation.rs
//!
//! The editable lesson form and the rules gating every save.
//! Validation is pure: no I/O, same answer for the same form.

use crate::domain::{ContentType, Lesson, LessonPatch, LessonStatus};
use crate::publish_at::{canonical, parse_publish_at, to_form_value};

/// A rule the form currently breaks. Only the first one found is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("Duration (ms) is required for video lessons.")]
    MissingVideoDuration,
    #[error("Publish At is required.")]
    MissingPublishAt,
    #[error("Publish At must be a valid date and time.")]
    InvalidPublishAt,
}

/// Editable publishing metadata of one lesson.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonForm {
    pub status: LessonStatus,
    /// Raw text as typed; empty means "no publish time".
    pub publish_at: String,
    pub is_paid: bool,
    pub content_type: ContentType,
    /// Kept when the content type moves away from video; it just stops mattering.
    pub duration_ms: Option<i64>,
}

impl LessonForm {
    /// Populates a form from server truth.
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            status: lesson.status,
            publish_at: lesson.publish_at.map(to_form_value).unwrap_or_default(),
            is_paid: lesson.is_paid,
            content_type: lesson.content_type,
            duration_ms: lesson.duration_ms,
        }
    }

    /// Sets the duration from a text field; empty input clears it.
    pub fn set_duration_input(&mut self, input: &str) -> Result<(), std::num::ParseIntError> {
        let input = input.trim();
        self.duration_ms = if input.is_empty() {
            None
        } else {
            Some(input.parse()?)
        };
        Ok(())
    }

    /// Validates the form and builds the write body from it.
    pub fn to_patch(&self) -> Result<LessonPatch, Violation> {
        validate(self)?;
        let publish_at = match self.publish_at.trim() {
            "" => None,
            raw => Some(canonical(
                parse_publish_at(raw).map_err(|_| Violation::InvalidPublishAt)?,
            )),
        };
        Ok(LessonPatch {
            status: self.status,
            publish_at,
            is_paid: self.is_paid,
            content_type: self.content_type,
            duration_ms: self.duration_ms,
        })
    }
}

/// Checks the form against the publishing rules, in fixed order:
/// video duration, then presence of a publish time, then its format.
pub fn validate(form: &LessonForm) -> Result<(), Violation> {
    if form.content_type == ContentType::Video && !form.duration_ms.is_some_and(|ms| ms > 0) {
        return Err(Violation::MissingVideoDuration);
    }

    let publish_at = form.publish_at.trim();
    if form.status.requires_publish_at() && publish_at.is_empty() {
        return Err(Violation::MissingPublishAt);
    }

    if !publish_at.is_empty() && parse_publish_at(publish_at).is_err() {
        return Err(Violation::InvalidPublishAt);
    }

    Ok(())
}
