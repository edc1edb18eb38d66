//! Ledger store adapters.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::domain::StoreError;
use crate::ports::LedgerStore;

// =============================================================================
// MemoryLedgerStore
// =============================================================================

/// In-process store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryLedgerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-seed `key` with a raw snapshot.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.write().insert(key.to_string(), value.to_string());
        self
    }

    /// Raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// FileLedgerStore
// =============================================================================

/// One JSON file per key under a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct FileLedgerStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLedgerStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
                _ => '_',
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let _guard = self.write_lock.lock();
        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &target).map_err(io_err)?;

        debug!(key, path = %target.display(), bytes = value.len(), "Ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryLedgerStore::new();
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v1").unwrap();
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLedgerStore::new(dir.path().join("ledgers"));
        assert_eq!(store.load("d2a.peer_reputation").unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileLedgerStore::new(dir.path())
            .save("d2a.peer_reputation", "{\"version\":1,\"entries\":[]}")
            .unwrap();

        let reopened = FileLedgerStore::new(dir.path());
        assert_eq!(
            reopened.load("d2a.peer_reputation").unwrap().as_deref(),
            Some("{\"version\":1,\"entries\":[]}")
        );
        assert!(dir.path().join("d2a.peer_reputation.json").exists());
        assert!(!dir.path().join("d2a.peer_reputation.json.tmp").exists());
    }

    #[test]
    fn test_file_store_sanitizes_key() {
        let store = FileLedgerStore::new("/tmp/ledgers");
        assert_eq!(
            store.path_for("../evil/key"),
            PathBuf::from("/tmp/ledgers/.._evil_key.json")
        );
    }

    #[test]
    fn test_file_store_unreadable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileLedgerStore::new(dir.path());
        // A directory where the file should be
        fs::create_dir_all(store.path_for("k")).unwrap();
        assert!(matches!(store.load("k"), Err(StoreError::Io { .. })));
    }
}
