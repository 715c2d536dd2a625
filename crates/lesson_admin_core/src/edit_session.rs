//! crates/lesson_admin_core/src/edit_session.rs
//!
//! The lesson edit session: load, edit, validate, save, redirect.
//!
//! State lives behind a lock that is only held between awaits, never across a
//! network call. A session-scoped `CancellationToken` marks teardown: once it
//! fires, late load/save results are dropped and a pending redirect is cancelled.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::domain::{Lesson, LessonId, Route};
use crate::validation::{validate, LessonForm, Violation};

/// Delay between a successful save and the move back to the lesson list.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(800);

pub const SAVE_SUCCESS_MESSAGE: &str = "Lesson saved successfully.";

//=========================================================================================
// Session State
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// Waiting for the initial load; saving is not reachable yet.
    Loading,
    Ready,
    Saving,
    /// Saved; the redirect to the list is pending.
    Saved,
    /// Torn down, either by navigation or by a missing credential.
    Closed,
}

/// Everything a view needs to render the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditView {
    pub session_id: Uuid,
    pub lesson_id: LessonId,
    pub phase: EditPhase,
    pub title: String,
    pub form: LessonForm,
    pub validation_error: Option<Violation>,
    pub api_error: Option<String>,
    pub success_message: Option<String>,
    pub is_saving: bool,
    pub is_loading: bool,
}

impl EditView {
    fn clear_messages(&mut self) {
        self.validation_error = None;
        self.api_error = None;
        self.success_message = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// The load failed; the message is shown and the form keeps its defaults.
    Failed(String),
    /// No credential; the session redirected to login and closed.
    Unauthenticated,
    /// Another load or a save is in flight, or the session is not accepting loads.
    Rejected,
    /// The session was torn down before the result arrived.
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Lesson),
    Invalid(Violation),
    Failed(String),
    Unauthenticated,
    /// Not `Ready`: still loading, already saving, saved, or closed.
    Rejected,
    Discarded,
}

//=========================================================================================
// The Session
//=========================================================================================

/// One editor bound to one lesson. Dropping it tears it down.
pub struct EditSession {
    auth: AuthContext,
    state: Arc<Mutex<EditView>>,
    token: CancellationToken,
    redirect_delay: Duration,
}

impl EditSession {
    /// Creates a session in `Loading`. Call [`EditSession::load`] next.
    pub fn open(auth: AuthContext, lesson_id: LessonId, redirect_delay: Duration) -> Self {
        let session_id = Uuid::new_v4();
        debug!("Opening edit session {} for lesson {}.", session_id, lesson_id);
        Self {
            auth,
            state: Arc::new(Mutex::new(EditView {
                session_id,
                lesson_id,
                phase: EditPhase::Loading,
                title: String::new(),
                form: LessonForm::default(),
                validation_error: None,
                api_error: None,
                success_message: None,
                is_saving: false,
                is_loading: false,
            })),
            token: CancellationToken::new(),
            redirect_delay,
        }
    }

    /// A snapshot of the current state.
    pub fn view(&self) -> EditView {
        lock(&self.state).clone()
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the session is torn down, e.g. after the post-save redirect.
    pub async fn closed(&self) {
        self.token.cancelled().await
    }

    /// Live feedback: the violation the form would fail with right now.
    pub fn preview(&self) -> Option<Violation> {
        validate(&lock(&self.state).form).err()
    }

    /// Applies a user edit. Ignored unless the form is on screen.
    pub fn edit(&self, change: impl FnOnce(&mut LessonForm)) -> bool {
        let mut state = lock(&self.state);
        match state.phase {
            EditPhase::Ready | EditPhase::Saving => {
                change(&mut state.form);
                true
            }
            _ => false,
        }
    }

    /// Fetches the lesson and populates the form from it. A failed load
    /// leaves every field at its default, even on a reload.
    pub async fn load(&self) -> LoadOutcome {
        let Some(credential) = self.auth.guard() else {
            self.close();
            return LoadOutcome::Unauthenticated;
        };

        let (session_id, lesson_id) = {
            let mut state = lock(&self.state);
            if state.is_loading || !matches!(state.phase, EditPhase::Loading | EditPhase::Ready) {
                return LoadOutcome::Rejected;
            }
            state.clear_messages();
            state.phase = EditPhase::Loading;
            state.is_loading = true;
            (state.session_id, state.lesson_id.clone())
        };
        let in_flight = InFlight::load(self.state.clone());

        info!("[{}] Loading lesson {}.", session_id, lesson_id);
        let result = self.auth.api().fetch_lesson(&lesson_id, &credential).await;

        if self.token.is_cancelled() {
            debug!("[{}] Session closed before the load finished.", session_id);
            return in_flight.complete(|_| LoadOutcome::Discarded);
        }

        in_flight.complete(|state| {
            state.phase = EditPhase::Ready;
            match result {
                Ok(lesson) => {
                    state.form = LessonForm::from_lesson(&lesson);
                    state.title = lesson.title;
                    LoadOutcome::Loaded
                }
                Err(failure) => {
                    error!("[{}] Failed to load lesson: {}", session_id, failure);
                    let message = failure.describe(
                        |status| format!("Failed to load lesson ({})", status),
                        "Network error while loading lesson.",
                    );
                    state.form = LessonForm::default();
                    state.title.clear();
                    state.api_error = Some(message.clone());
                    LoadOutcome::Failed(message)
                }
            }
        })
    }

    /// Validates the form and, if it passes, sends it to the server.
    pub async fn save(&self) -> SaveOutcome {
        let (session_id, lesson_id, form) = {
            let mut state = lock(&self.state);
            if state.phase != EditPhase::Ready || state.is_saving {
                return SaveOutcome::Rejected;
            }
            state.clear_messages();
            state.phase = EditPhase::Saving;
            state.is_saving = true;
            (state.session_id, state.lesson_id.clone(), state.form.clone())
        };
        let in_flight = InFlight::save(self.state.clone());

        let patch = match form.to_patch() {
            Ok(patch) => patch,
            Err(violation) => {
                debug!("[{}] Save blocked: {}", session_id, violation);
                return in_flight.complete(|state| {
                    state.validation_error = Some(violation);
                    SaveOutcome::Invalid(violation)
                });
            }
        };

        let credential = match self.auth.require() {
            Ok(credential) => credential,
            Err(_) => {
                warn!("[{}] Access token disappeared before saving.", session_id);
                in_flight.complete(|state| state.phase = EditPhase::Closed);
                self.close();
                self.auth.navigator().navigate(Route::Login);
                return SaveOutcome::Unauthenticated;
            }
        };

        info!("[{}] Saving lesson {}.", session_id, lesson_id);
        let result = self
            .auth
            .api()
            .patch_lesson(&lesson_id, &patch, &credential)
            .await;

        if self.token.is_cancelled() {
            debug!("[{}] Session closed before the save finished.", session_id);
            return in_flight.complete(|_| SaveOutcome::Discarded);
        }

        match result {
            Ok(lesson) => {
                info!("[{}] Lesson {} saved.", session_id, lesson_id);
                in_flight.complete(|state| {
                    state.form = LessonForm::from_lesson(&lesson);
                    state.title = lesson.title.clone();
                    state.success_message = Some(SAVE_SUCCESS_MESSAGE.to_string());
                    state.phase = EditPhase::Saved;
                });
                self.schedule_redirect();
                SaveOutcome::Saved(lesson)
            }
            Err(failure) => {
                error!("[{}] Failed to save lesson: {}", session_id, failure);
                let message = failure.describe(
                    |status| format!("Save failed ({})", status),
                    "Network error while saving.",
                );
                in_flight.complete(|state| {
                    state.api_error = Some(message.clone());
                    SaveOutcome::Failed(message)
                })
            }
        }
    }

    /// Tears the session down: pending redirects are cancelled and results
    /// still in flight will be ignored.
    pub fn close(&self) {
        self.token.cancel();
        lock(&self.state).phase = EditPhase::Closed;
    }

    fn schedule_redirect(&self) {
        let token = self.token.clone();
        let navigator = self.auth.navigator().clone();
        let state = self.state.clone();
        let delay = self.redirect_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Redirect after save cancelled.");
                }
                _ = tokio::time::sleep(delay) => {
                    token.cancel();
                    lock(&state).phase = EditPhase::Closed;
                    navigator.navigate(Route::Lessons);
                }
            }
        });
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

//=========================================================================================
// Helpers
//=========================================================================================

fn lock(state: &Mutex<EditView>) -> MutexGuard<'_, EditView> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears `is_loading` or `is_saving` when an attempt ends, including when
/// the future running it is dropped halfway.
struct InFlight {
    state: Arc<Mutex<EditView>>,
    settle: fn(&mut EditView),
    armed: bool,
}

impl InFlight {
    fn load(state: Arc<Mutex<EditView>>) -> Self {
        Self {
            state,
            settle: settle_load,
            armed: true,
        }
    }

    fn save(state: Arc<Mutex<EditView>>) -> Self {
        Self {
            state,
            settle: settle_save,
            armed: true,
        }
    }

    fn complete<R>(mut self, finish: impl FnOnce(&mut EditView) -> R) -> R {
        self.armed = false;
        let mut state = lock(&self.state);
        let result = finish(&mut state);
        (self.settle)(&mut state);
        result
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            (self.settle)(&mut lock(&self.state));
        }
    }
}

fn settle_load(state: &mut EditView) {
    state.is_loading = false;
}

fn settle_save(state: &mut EditView) {
    state.is_saving = false;
    if state.phase == EditPhase::Saving {
        state.phase = EditPhase::Ready;
    }
}
