//! crates/lesson_admin_core/src/publish_at.rs
//!
//! Conversions between the publish time a form edits and the instant sent to
//! the server. Form input without an offset is read as UTC, so a value loaded,
//! left untouched and saved again names the same instant.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Timelike, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid date and time")]
pub struct PublishAtError(pub String);

// Accepted shapes for offset-less input, most specific first.
const FORM_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parses RFC 3339 or `YYYY-MM-DDTHH:MM[:SS[.fff]]` (UTC) into an instant.
pub fn parse_publish_at(input: &str) -> Result<DateTime<Utc>, PublishAtError> {
    let input = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }
    FORM_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| PublishAtError(input.to_string()))
}

/// The single representation sent over the wire, e.g. `2024-01-01T10:00:00.000Z`.
pub fn canonical(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The editable representation. Minute precision unless that would drop part
/// of the instant.
pub fn to_form_value(instant: DateTime<Utc>) -> String {
    if instant.nanosecond() != 0 {
        instant.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
    } else if instant.second() != 0 {
        instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M").to_string()
    }
}
