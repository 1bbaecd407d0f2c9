//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes entire dataset
//! - **Best for**: a handful of keys, writes on user action

use crate::domain::error::{GridlaunchError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// String lists indexed by key.
    #[serde(default)]
    lists: BTreeMap<String, Vec<String>>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            lists: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The whole document is kept in memory and rewritten on every mutation.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by a single registry that
/// serializes all writes through `&mut self`.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "lists": {
///     "favoriteApps": [
///       "/Applications/Mail.app",
///       "/Applications/Safari.app"
///     ]
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the document, loaded on creation.
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. A missing file starts empty, and
    /// so does an unreadable or malformed one (logged at `warn`); the next write
    /// replaces it. Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "ignoring unreadable storage file");
                StorageData::default()
            })
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(key_count = data.lists.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| GridlaunchError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(version = data.version, keys = data.lists.len(), "loaded storage data");

        Ok(data)
    }

    /// Saves `data` to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename fails.
    fn save_to_file(&self, data: &StorageData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| GridlaunchError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl KeyValueStore for JsonStorage {
    fn read_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.data.lists.get(key).cloned())
    }

    fn write_string_list(&mut self, key: &str, values: &[String]) -> Result<()> {
        let _span = tracing::debug_span!("json_write_string_list", key = %key, count = values.len())
            .entered();

        let mut next = self.data.clone();
        next.lists.insert(key.to_string(), values.to_vec());

        self.save_to_file(&next)?;
        self.data = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("nested/state.json")).unwrap();

        assert_eq!(storage.read_string_list("favoriteApps").unwrap(), None);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage
            .write_string_list("favoriteApps", &["/Applications/Mail.app".to_string()])
            .unwrap();
        drop(storage);

        let reopened = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(
            reopened.read_string_list("favoriteApps").unwrap(),
            Some(vec!["/Applications/Mail.app".to_string()])
        );
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn malformed_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        assert_eq!(storage.read_string_list("favoriteApps").unwrap(), None);

        storage.write_string_list("favoriteApps", &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"favoriteApps\""));
    }

    #[test]
    fn failed_write_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let mut storage = JsonStorage {
            file_path: blocker.join("state.json"),
            data: StorageData::default(),
        };

        assert!(storage.write_string_list("k", &["v".to_string()]).is_err());
        assert_eq!(storage.read_string_list("k").unwrap(), None);
    }
}
