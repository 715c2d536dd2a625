//! crates/lesson_admin_core/src/list_view.rs
//!
//! Read-only list views: the lesson dashboard and the program list.
//! Each load replaces the displayed collection wholesale.

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::auth::AuthContext;
use crate::domain::{Lesson, LessonId, ListScope, Program, Route};
use crate::ports::ApiFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Error,
    Success,
}

/// What a list view currently displays.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub status: LoadStatus,
    pub items: Vec<T>,
    pub error_message: Option<String>,
    /// Set only when a load succeeds.
    pub last_updated: Option<DateTime<Utc>>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            items: Vec::new(),
            error_message: None,
            last_updated: None,
        }
    }
}

impl<T> Listing<T> {
    fn begin(&mut self) {
        self.status = LoadStatus::Loading;
        self.error_message = None;
    }

    fn succeed(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LoadStatus::Success;
        self.last_updated = Some(Utc::now());
    }

    fn fail(&mut self, message: String) {
        self.status = LoadStatus::Error;
        self.error_message = Some(message);
    }
}

//=========================================================================================
// Lesson Dashboard
//=========================================================================================

pub struct LessonListView {
    auth: AuthContext,
    listing: Listing<Lesson>,
}

impl LessonListView {
    /// Enters the view. Without a credential this redirects to login and
    /// returns `None`.
    pub fn enter(auth: AuthContext) -> Option<Self> {
        auth.guard()?;
        Some(Self {
            auth,
            listing: Listing::default(),
        })
    }

    pub fn listing(&self) -> &Listing<Lesson> {
        &self.listing
    }

    pub async fn load(&mut self, scope: ListScope) -> &Listing<Lesson> {
        let Some(credential) = self.auth.guard() else {
            return &self.listing;
        };
        self.listing.begin();
        match self.auth.api().list_lessons(scope, &credential).await {
            Ok(lessons) => {
                info!("Loaded {} lesson(s) from {}.", lessons.len(), scope.path());
                self.listing.succeed(lessons);
            }
            Err(failure) => {
                error!("Failed to fetch lessons: {}", failure);
                self.listing.fail(list_failure_message(&failure, "lessons"));
            }
        }
        &self.listing
    }

    /// Hands off to the edit view for one lesson.
    pub fn open(&self, id: LessonId) {
        self.auth.navigator().navigate(Route::LessonEdit(id));
    }
}

//=========================================================================================
// Program List
//=========================================================================================

pub struct ProgramListView {
    auth: AuthContext,
    listing: Listing<Program>,
}

impl ProgramListView {
    pub fn enter(auth: AuthContext) -> Option<Self> {
        auth.guard()?;
        Some(Self {
            auth,
            listing: Listing::default(),
        })
    }

    pub fn listing(&self) -> &Listing<Program> {
        &self.listing
    }

    pub async fn load(&mut self) -> &Listing<Program> {
        let Some(credential) = self.auth.guard() else {
            return &self.listing;
        };
        self.listing.begin();
        match self.auth.api().list_programs(&credential).await {
            Ok(programs) => {
                info!("Loaded {} program(s).", programs.len());
                self.listing.succeed(programs);
            }
            Err(failure) => {
                error!("Failed to fetch programs: {}", failure);
                self.listing.fail(list_failure_message(&failure, "programs"));
            }
        }
        &self.listing
    }
}

fn list_failure_message(failure: &ApiFailure, noun: &str) -> String {
    failure.describe(
        |status| format!("Failed to fetch {} ({})", noun, status),
        &format!("Network error while fetching {}.", noun),
    )
}
