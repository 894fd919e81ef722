//! Pluggable snapshot persistence

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

use crate::store::snapshot::Snapshot;

/// Persistence failures. In-memory state is never rolled back on a failed
/// save; callers may retry the checkpoint.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read state: {0}")]
    Read(String),

    #[error("failed to write state: {0}")]
    Write(String),

    #[error("stored state is corrupt: {0}")]
    Corrupt(String),

    #[error("no persistence backend configured")]
    NotConfigured,
}

/// Where snapshots come from and go to.
///
/// `load` answers `None` on a cold start so the caller can fall back to
/// seed data.
pub trait PersistencePort: Send + Sync {
    fn load(&self) -> Result<Option<Snapshot>, PersistError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

/// File-backed persistence: one pretty-printed JSON document
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistencePort for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| PersistError::Read(e.to_string()))?;
        let snapshot =
            serde_json::from_str(&content).map_err(|e| PersistError::Corrupt(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "loaded state file");
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistError::Write(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(snapshot)
            .map_err(|e| PersistError::Write(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| PersistError::Write(e.to_string()))?;
        tracing::debug!(path = %self.path.display(), "saved state file");
        Ok(())
    }
}

/// In-memory persistence for tests
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(Some(snapshot)),
        }
    }

    /// What the last save wrote, if anything
    pub fn stored(&self) -> Option<Snapshot> {
        self.state.read().clone()
    }
}

impl PersistencePort for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        Ok(self.state.read().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        *self.state.write() = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cold_start_loads_nothing() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("state.json"));

        let mut snapshot = Snapshot::default();
        snapshot.flags.maintenance_mode = true;
        store.save(&snapshot).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.flags.maintenance_mode);
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_corrupt_file_is_reported_not_swallowed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Corrupt(_))));
    }

    #[test]
    fn test_memory_store_remembers_last_save() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let snapshot = Snapshot::default();
        store.save(&snapshot).unwrap();
        assert_eq!(store.stored(), Some(snapshot));
    }
}
