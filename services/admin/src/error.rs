//! services/admin/src/error.rs
//!
//! Defines the primary error type for the admin client.

use crate::config::ConfigError;
use lesson_admin_core::validation::Violation;

/// The primary error type for the `admin` client.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A lesson API call failed; the message is what the operator should see.
    #[error("{0}")]
    Api(String),

    /// The form broke a publishing rule, so nothing was sent.
    #[error("{0}")]
    Validation(#[from] Violation),

    /// No access token is stored.
    #[error("Not signed in. Run `lesson-admin login` first.")]
    NotSignedIn,

    /// Building the HTTP client failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Command-line input that cannot be applied.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
