//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait the favorites registry persists
//! through. It is deliberately narrow: the launcher only ever needs to read and
//! replace a list of strings under a fixed key.

use crate::domain::error::Result;

/// Abstraction over persistent key/value backends holding string lists.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-process map for tests and fallbacks
///
/// # Examples
///
/// ```no_run
/// use gridlaunch::storage::{JsonStorage, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/gridlaunch.json"))?;
/// storage.write_string_list("favoriteApps", &["/Applications/Mail.app".to_string()])?;
/// let favorites = storage.read_string_list("favoriteApps")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the list stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read_string_list(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replaces the list stored under `key`.
    ///
    /// The write must be durable when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write_string_list(&mut self, key: &str, values: &[String]) -> Result<()>;
}
