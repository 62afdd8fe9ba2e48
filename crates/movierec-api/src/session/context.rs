//! `SessionContext` - the session handle shared by the client and the UI.

use std::sync::{Arc, RwLock};

use anyhow::{Result, anyhow};

use super::store::{MemorySessionStore, SessionStore};
use super::Session;
use crate::types::User;

/// Explicitly passed session handle.
///
/// Clones share the same state. The current session is cached in memory
/// and written through to the store; token and user always change together.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    /// Creates a context over `store`, restoring any persisted session.
    ///
    /// An unreadable stored session is discarded and the store cleared.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let restored = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session");
                if let Err(clear_err) = store.clear() {
                    tracing::warn!(error = %clear_err, "failed to clear unreadable session");
                }
                None
            }
        };
        Self {
            store,
            current: Arc::new(RwLock::new(restored)),
        }
    }

    /// Creates a context backed by an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.current.read().map_or(None, |slot| slot.clone())
    }

    /// Returns the bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.current
            .read()
            .map_or(None, |slot| slot.as_ref().map(|s| s.token.clone()))
    }

    /// Returns the logged-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.current
            .read()
            .map_or(None, |slot| slot.as_ref().map(|s| s.user.clone()))
    }

    /// Returns the refresh token, if one was issued.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .map_or(None, |slot| slot.as_ref().and_then(|s| s.refresh_token.clone()))
    }

    /// Token absent implies unauthenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persists and activates `session`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot save the session.
    pub fn establish(&self, session: Session) -> Result<()> {
        self.store.save(&session)?;
        let mut slot = self
            .current
            .write()
            .map_err(|_| anyhow!("session lock poisoned"))?;
        tracing::debug!(username = %session.user.username, "session established");
        *slot = Some(session);
        Ok(())
    }

    /// Drops the session from memory and storage.
    ///
    /// The in-memory session is cleared even when the store fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot remove the session.
    pub fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.current.write() {
            *slot = None;
        }
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::session::FileSessionStore;

    #[test]
    fn test_in_memory_starts_unauthenticated() {
        // Arrange & Act
        let ctx = SessionContext::in_memory();

        // Assert
        assert!(!ctx.is_authenticated());
        assert!(ctx.token().is_none());
        assert!(ctx.user().is_none());
    }

    #[test]
    fn test_restores_stored_session_and_clears_store() {
        // Arrange
        let store = Arc::new(MemorySessionStore::with_session(
            Session::new("tok", User::named(4, "morpheus")).with_refresh_token("ref"),
        ));

        // Act
        let ctx = SessionContext::new(store.clone());

        // Assert
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token().as_deref(), Some("tok"));
        assert_eq!(ctx.refresh_token().as_deref(), Some("ref"));
        ctx.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_establish_and_clear() {
        // Arrange
        let ctx = SessionContext::in_memory();
        let other = ctx.clone();

        // Act
        ctx.establish(Session::new("tok", User::named(1, "trinity")))
            .unwrap();

        // Assert: clones observe the same session
        assert_eq!(other.token().as_deref(), Some("tok"));
        assert_eq!(other.user().unwrap().username, "trinity");

        // Act
        other.clear().unwrap();

        // Assert
        assert!(!ctx.is_authenticated());
        assert!(ctx.user().is_none());
    }

    #[test]
    fn test_restores_persisted_session() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let first = SessionContext::new(Arc::new(FileSessionStore::new(&path)));
        first
            .establish(Session::new("persisted", User::named(2, "morpheus")).with_refresh_token("r"))
            .unwrap();

        // Act
        let second = SessionContext::new(Arc::new(FileSessionStore::new(&path)));

        // Assert
        assert_eq!(second.token().as_deref(), Some("persisted"));
        assert_eq!(second.refresh_token().as_deref(), Some("r"));
    }

    #[test]
    fn test_unreadable_session_is_discarded() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        // Act
        let ctx = SessionContext::new(Arc::new(FileSessionStore::new(&path)));

        // Assert
        assert!(!ctx.is_authenticated());
        assert!(!path.exists());
    }
}
