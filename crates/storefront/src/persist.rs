//! Session persistence.
//!
//! The login session survives restarts through a small key-value port.
//! [`FileStore`] is the production implementation, one JSON document on
//! disk; [`MemoryStore`] backs tests and callers that want no disk at all.
//!
//! Persistence is best-effort: the session layer logs failures and carries
//! on with in-memory state, so a read-only disk never blocks a login.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Keys the login session is stored under.
pub mod session_keys {
    /// Bearer token from the last successful login.
    pub const TOKEN: &str = "token";
    /// Username the token was issued for.
    pub const USERNAME: &str = "username";
}

/// Errors that can occur in the persistence layer.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// String key-value storage for the login session.
///
/// Object-safe so the [`crate::store::Store`] can hold `Box<dyn KeyValueStore>`
/// and tests can swap in [`MemoryStore`].
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Write a value, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete a value. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// Key-value storage backed by one JSON file.
///
/// The whole document is read and rewritten on each operation; it only ever
/// holds the handful of session keys.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given file path. The file is created lazily
    /// on the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, PersistError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory key-value storage. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);

        store.set(session_keys::TOKEN, "abc123").unwrap();
        assert_eq!(
            store.get(session_keys::TOKEN).unwrap().as_deref(),
            Some("abc123")
        );

        store.remove(session_keys::TOKEN).unwrap();
        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);
    }

    #[test]
    fn test_memory_store_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove("nothing").unwrap();
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let store = FileStore::new(temp.path().join("session.json"));

        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);

        store.set(session_keys::TOKEN, "jwt-token").unwrap();
        store.set(session_keys::USERNAME, "mor_2314").unwrap();

        // A second store over the same path sees the data.
        let reopened = FileStore::new(store.path());
        assert_eq!(
            reopened.get(session_keys::TOKEN).unwrap().as_deref(),
            Some("jwt-token")
        );
        assert_eq!(
            reopened.get(session_keys::USERNAME).unwrap().as_deref(),
            Some("mor_2314")
        );

        reopened.remove(session_keys::TOKEN).unwrap();
        assert_eq!(store.get(session_keys::TOKEN).unwrap(), None);
        assert_eq!(
            store.get(session_keys::USERNAME).unwrap().as_deref(),
            Some("mor_2314")
        );
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b").join("session.json");
        let store = FileStore::new(&nested);

        store.set(session_keys::TOKEN, "t").unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_document() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get(session_keys::TOKEN),
            Err(PersistError::Parse(_))
        ));
    }
}
