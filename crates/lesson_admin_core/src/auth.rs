//! crates/lesson_admin_core/src/auth.rs
//!
//! The authentication context: the one place credentials come from.
//! Views never read the token slot themselves; they ask the context, which
//! reads the slot again on every call so a sign-out is seen immediately.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::domain::{Credential, Route};
use crate::ports::{ApiFailure, ApiResult, CredentialStore, LessonApi, Navigator};

/// Supplies credentials to authenticated calls and owns login/logout.
#[derive(Clone)]
pub struct AuthContext {
    api: Arc<dyn LessonApi>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthContext {
    pub fn new(
        api: Arc<dyn LessonApi>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            store,
            navigator,
        }
    }

    /// The current credential, if the operator is signed in.
    pub fn credential(&self) -> Option<Credential> {
        self.store.load()
    }

    /// The current credential, or `Unauthenticated` without touching the network.
    pub fn require(&self) -> ApiResult<Credential> {
        self.store.load().ok_or(ApiFailure::Unauthenticated)
    }

    /// Redirects to the login view when no credential is present.
    /// Returns the credential otherwise.
    pub fn guard(&self) -> Option<Credential> {
        let credential = self.store.load();
        if credential.is_none() {
            warn!("No access token found, redirecting to login.");
            self.navigator.navigate(Route::Login);
        }
        credential
    }

    /// Exchanges email and password for a credential, stores it and moves to
    /// the dashboard. The error string is what the login view shows.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Credential, String> {
        match self.api.authenticate(email, password).await {
            Ok(credential) => {
                self.store.store(credential.clone());
                info!("Signed in as {}.", email);
                self.navigator.navigate(Route::Lessons);
                Ok(credential)
            }
            Err(failure) => {
                warn!("Login failed: {}", failure);
                Err(failure.describe(
                    |status| format!("Login failed with status {}", status),
                    "Network or server error",
                ))
            }
        }
    }

    /// Forgets the credential and returns to the login view.
    pub fn sign_out(&self) {
        self.store.clear();
        info!("Signed out.");
        self.navigator.navigate(Route::Login);
    }

    pub(crate) fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub(crate) fn api(&self) -> &Arc<dyn LessonApi> {
        &self.api
    }
}

//=========================================================================================
// In-Memory Credential Store
//=========================================================================================

/// A credential slot that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, credential: Credential) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
