//! Session store implementations.
//!
//! `JsonFileSessionStore` persists the single session record as one JSON
//! file with atomic temp-file + rename writes. `MemorySessionStore` backs
//! tests and ephemeral demo runs.

use crate::paths::IntervuPaths;
use async_trait::async_trait;
use intervu_core::error::{IntervuError, Result};
use intervu_core::session::{SessionStore, StoredSession};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;

/// File-backed session store (one JSON record on disk).
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    /// Creates a store at the default platform location
    /// (`<data dir>/intervu/session.json`).
    pub fn default_location() -> Result<Self> {
        let path = IntervuPaths::session_file()
            .map_err(|e| IntervuError::data_access(format!("cannot resolve session path: {}", e)))?;
        Ok(Self::new(path))
    }

    /// Creates a store at an explicit path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // A present-but-unparsable record is reported, not discarded;
        // the session manager decides to self-heal.
        let record: StoredSession = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    async fn save(&self, record: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(record)?;

        // Atomic write: temp file in the same directory, then rename.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;
        tracing::debug!(path = %self.path.display(), "session record saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory session store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self
            .record
            .lock()
            .map_err(|_| IntervuError::internal("session store lock poisoned"))?
            .clone())
    }

    async fn save(&self, record: &StoredSession) -> Result<()> {
        *self
            .record
            .lock()
            .map_err(|_| IntervuError::internal("session store lock poisoned"))? =
            Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self
            .record
            .lock()
            .map_err(|_| IntervuError::internal("session store lock poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervu_core::user::{UserRole, UserSession};
    use tempfile::tempdir;

    fn session() -> UserSession {
        UserSession {
            id: "user-1".to_string(),
            display_name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            role: UserRole::Standard,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let record = StoredSession::new(session());
        store.save(&record).await.unwrap();

        let loaded = store.load().await.unwrap().expect("record exists");
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error_and_stays_put() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "{not valid json").await.unwrap();

        let store = JsonFileSessionStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(err.is_serialization());
        // The store itself does not self-heal; the manager owns that.
        assert!(path.exists());

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));
        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_save_replaces_existing_record() {
        let dir = tempdir().unwrap();
        let store = JsonFileSessionStore::new(dir.path().join("session.json"));

        store.save(&StoredSession::new(session())).await.unwrap();

        let mut other = session();
        other.id = "user-2".to_string();
        store.save(&StoredSession::new(other.clone())).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.session.id, "user-2");
    }

    #[tokio::test]
    async fn test_memory_store_round_trips() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.save(&StoredSession::new(session())).await.unwrap();
        assert!(store.load().await.unwrap().is_some());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
