//! Client-side routes and the navigation hook used on authentication failure.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A navigable client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Browse / search landing page.
    Home,
    /// Login form.
    Login,
    /// Registration form.
    Register,
    /// Personal dashboard (recommendations, watchlist, search tabs).
    Dashboard,
    /// Movie detail by route id.
    Movie(u64),
}

impl Route {
    /// Returns the canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Login => String::from("/login"),
            Self::Register => String::from("/register"),
            Self::Dashboard => String::from("/dashboard"),
            Self::Movie(id) => format!("/movie/{id}"),
        }
    }

    /// Parses a path such as `/movie/603`. Unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Home),
            "/login" => Some(Self::Login),
            "/register" => Some(Self::Register),
            "/dashboard" => Some(Self::Dashboard),
            other => other
                .strip_prefix("/movie/")
                .and_then(|id| id.parse().ok())
                .map(Self::Movie),
        }
    }

    /// Whether the view is only meaningful with a session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Receives navigation requests raised from inside response handling.
pub trait Navigator: Send + Sync + fmt::Debug {
    /// Requests a switch to `route`.
    fn navigate(&self, route: Route);
}

/// Navigator that ignores every request (non-interactive use).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigation ignored");
    }
}

/// Navigator that records the latest request in a shared slot.
///
/// The TUI shell drains the slot once per tick; tests inspect it directly.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    pending: Arc<Mutex<Option<Route>>>,
}

impl RecordingNavigator {
    /// Creates an empty navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the pending route, leaving the slot empty.
    #[must_use]
    pub fn take(&self) -> Option<Route> {
        self.pending.lock().map_or(None, |mut slot| slot.take())
    }

    /// Returns the pending route without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<Route> {
        self.pending.lock().map_or(None, |slot| *slot)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut slot) = self.pending.lock() {
            *slot = Some(route);
        }
    }
}
