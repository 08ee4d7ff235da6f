//! Key-value persistence for session and preference data.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::DashboardResult;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> DashboardResult<()>;

    fn remove(&self, key: &str) -> DashboardResult<()>;
}

/// Process-lifetime store; also serves as the session-scoped store.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DashboardResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Store persisted as a flat JSON object, rewritten on every change.
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileKvStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> DashboardResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened key-value store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> DashboardResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw).inspect_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to write key-value store");
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DashboardResult<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> DashboardResult<()> {
        let mut entries = self.entries.write();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileKvStore::open(&path).unwrap();
        store.set("theme", "light").unwrap();

        // a directory in place of the file makes every flush fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set("theme", "dark").is_err());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert!(store.remove("theme").is_err());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileKvStore::open(&path).unwrap();
        store.set("authToken", "mock_jwt_token_1").unwrap();
        store.set("theme", "dark").unwrap();
        store.remove("theme").unwrap();
        drop(store);

        let reopened = FileKvStore::open(&path).unwrap();
        assert_eq!(reopened.get("authToken").as_deref(), Some("mock_jwt_token_1"));
        assert_eq!(reopened.get("theme"), None);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        assert!(FileKvStore::open(&path).is_err());
    }
}
