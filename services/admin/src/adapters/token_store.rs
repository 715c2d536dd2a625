//! services/admin/src/adapters/token_store.rs
//!
//! A `CredentialStore` backed by a small JSON file, so a login survives
//! between invocations of the command-line client.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use lesson_admin_core::domain::Credential;
use lesson_admin_core::ports::CredentialStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenFile {
    access_token: Credential,
}

/// Keeps the `accessToken` slot in `path`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read token file: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<TokenFile>(&raw) {
            Ok(file) if !file.access_token.expose().is_empty() => Some(file.access_token),
            Ok(_) => None,
            Err(e) => {
                warn!(path = %self.path.display(), "Ignoring corrupt token file: {}", e);
                None
            }
        }
    }

    fn store(&self, credential: Credential) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(&TokenFile {
                access_token: credential,
            })?;
            fs::write(&self.path, json)
        })();
        match result {
            Ok(()) => debug!(path = %self.path.display(), "Access token stored."),
            Err(e) => warn!(path = %self.path.display(), "Failed to store access token: {}", e),
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Access token removed."),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "Failed to remove token file: {}", e),
        }
    }
}
