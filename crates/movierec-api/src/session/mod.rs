//! Session persistence.
//!
//! A session is the bearer token and user record obtained on login. It is
//! persisted through a [`SessionStore`] and read by every request through a
//! [`SessionContext`] handed to the client explicitly.

mod context;
mod store;

use serde::{Deserialize, Serialize};

use crate::types::User;

pub use context::SessionContext;
#[allow(clippy::module_name_repetitions)]
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Persisted authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token (JWT access token).
    pub token: String,
    /// The logged-in user.
    pub user: User,
    /// Refresh token, needed by the logout endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Session {
    /// Creates a session without a refresh token.
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            refresh_token: None,
        }
    }

    /// Attaches a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh.into());
        self
    }
}
