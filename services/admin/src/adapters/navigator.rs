//! services/admin/src/adapters/navigator.rs
//!
//! The command-line client has no screens to switch; navigation is logged and
//! the last target is kept so the CLI can tell the operator where to go next.

use std::sync::{Mutex, PoisonError};

use lesson_admin_core::domain::Route;
use lesson_admin_core::ports::Navigator;
use tracing::info;

#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_route(&self) -> Option<Route> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
