//! services/admin/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;

use lesson_admin_core::edit_session::DEFAULT_REDIRECT_DELAY;
use reqwest::Url;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub log_level: Level,
    pub token_path: PathBuf,
    pub save_redirect_delay: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url_str =
            lookup("API_BASE_URL").unwrap_or_else(|| "http://localhost:4000".to_string());
        let api_base_url = Url::parse(&api_base_url_str).map_err(|e| {
            ConfigError::InvalidValue("API_BASE_URL".to_string(), e.to_string())
        })?;
        if api_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue(
                "API_BASE_URL".to_string(),
                format!("'{}' cannot be used as a base URL", api_base_url_str),
            ));
        }

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let token_path = lookup("TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.lesson-admin/token.json"));

        let save_redirect_delay = match lookup("SAVE_REDIRECT_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
                ConfigError::InvalidValue(
                    "SAVE_REDIRECT_DELAY_MS".to_string(),
                    format!("'{}' is not a number of milliseconds", raw),
                )
            })?,
            None => DEFAULT_REDIRECT_DELAY,
        };

        Ok(Self {
            api_base_url,
            log_level,
            token_path,
            save_redirect_delay,
        })
    }
}
