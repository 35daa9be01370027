//! Durable key-value storage.
//!
//! The interaction store and the session only ever read, write or remove a
//! whole value under a small fixed set of keys, so the storage interface is
//! exactly that. Implementations may be in memory or on disk.

use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Whole-value storage keyed by short logical names
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store, optionally limited to a total number of value bytes
/// the way browser storage quotas are.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once values would exceed `bytes` in total
    pub fn with_capacity_limit(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(bytes),
        }
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock can't leave a half-written String behind
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries();
        if let Some(limit) = self.capacity {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let required = others + value.len();
            if required > limit {
                return Err(StoreError::Capacity {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !valid {
            return Err(StoreError::validation("key", key));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Persistence {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let persistence = |source| StoreError::Persistence {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(persistence)?;
        fs::write(&tmp, value).map_err(persistence)?;
        fs::rename(&tmp, &path).map_err(persistence)?;

        debug!(key, bytes = value.len(), "Wrote {:?}", path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Persistence {
                key: key.to_string(),
                source,
            }),
        }
    }
}
