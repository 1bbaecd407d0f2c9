//! In-memory storage backend.
//!
//! Keeps lists in a map for the lifetime of the process. Used by tests and as
//! the fallback when no data directory is available.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Non-persistent [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    lists: HashMap<String, Vec<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one list.
    #[must_use]
    pub fn with_list(key: &str, values: Vec<String>) -> Self {
        let mut lists = HashMap::new();
        lists.insert(key.to_string(), values);
        Self { lists }
    }
}

impl KeyValueStore for MemoryStorage {
    fn read_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        Ok(self.lists.get(key).cloned())
    }

    fn write_string_list(&mut self, key: &str, values: &[String]) -> Result<()> {
        self.lists.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}
