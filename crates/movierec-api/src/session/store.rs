//! Session storage backends.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use super::Session;

/// Storage for the persisted session.
///
/// Token and user record are written and removed together.
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Loads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Session>>;

    /// Replaces the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Removing an absent session succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be removed.
    fn clear(&self) -> Result<()>;
}

/// JSON file store, the terminal counterpart of browser local storage.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Creates a store backed by `path`. The file is created lazily.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let session = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(session).context("failed to serialize session")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `session`.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("session store lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::User;

    fn sample_session() -> Session {
        Session::new("access-token", User::named(7, "neo")).with_refresh_token("refresh-token")
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        // Act
        let loaded = store.load().unwrap();

        // Assert
        assert!(loaded.is_none());
    }

    #[test]
    fn test_file_store_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        // Act
        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap();

        // Assert
        assert_eq!(loaded, Some(sample_session()));
    }

    #[test]
    fn test_file_store_clear_removes_token_and_user() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);
        store.save(&sample_session()).unwrap();

        // Act
        store.clear().unwrap();

        // Assert
        assert!(!path.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_clear_missing_file_succeeds() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        // Act & Assert
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileSessionStore::new(&path);

        // Act
        let result = store.load();

        // Assert
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        // Arrange
        let store = MemorySessionStore::new();

        // Act
        store.save(&sample_session()).unwrap();
        let loaded = store.load().unwrap();
        store.clear().unwrap();

        // Assert
        assert_eq!(loaded, Some(sample_session()));
        assert!(store.load().unwrap().is_none());
    }
}
