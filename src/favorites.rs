//! Favorites registry.
//!
//! Owns the set of bundle paths the user marked as favorite and keeps the
//! persisted copy in step with it. Every mutation writes the full set through to
//! the [`KeyValueStore`] before returning; nothing is buffered.
//!
//! # Failure Model
//!
//! - A failed or missing read at load time yields an empty set
//! - A failed write is logged and not retried; the in-memory set stays
//!   authoritative for the session and the next successful write reconciles
//!
//! # Example
//!
//! ```
//! use gridlaunch::favorites::FavoritesRegistry;
//! use gridlaunch::storage::MemoryStorage;
//!
//! let mut favorites = FavoritesRegistry::load(Box::new(MemoryStorage::new()));
//! favorites.toggle_favorite("/Applications/Mail.app");
//! assert!(favorites.is_favorite("/Applications/Mail.app"));
//! ```

use crate::domain::CatalogEntry;
use crate::storage::KeyValueStore;
use std::collections::BTreeSet;

/// Storage key the favorites list lives under.
pub const FAVORITES_KEY: &str = "favoriteApps";

/// Registry of favorite bundle paths with write-through persistence.
///
/// Mutations take `&mut self`, so concurrent callers must go through a single
/// owner; the last write wins and no torn state is observable.
pub struct FavoritesRegistry {
    favorites: BTreeSet<String>,
    storage: Box<dyn KeyValueStore>,
    last_write_failed: bool,
}

impl FavoritesRegistry {
    /// Loads the favorites set from `storage`.
    ///
    /// Absence of a stored list, or a read error, produces an empty set.
    #[must_use]
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let favorites = match storage.read_string_list(FAVORITES_KEY) {
            Ok(Some(list)) => list.into_iter().collect(),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                BTreeSet::new()
            }
        };

        tracing::debug!(count = favorites.len(), "favorites loaded");

        Self {
            favorites,
            storage,
            last_write_failed: false,
        }
    }

    #[must_use]
    pub fn is_favorite(&self, path: &str) -> bool {
        self.favorites.contains(path)
    }

    /// Flips the favorite state of `path` and returns the new state.
    pub fn toggle_favorite(&mut self, path: &str) -> bool {
        let now_favorite = if self.favorites.remove(path) {
            false
        } else {
            self.favorites.insert(path.to_string());
            true
        };

        tracing::debug!(path = %path, favorite = now_favorite, "favorite toggled");
        self.persist();
        now_favorite
    }

    pub fn add_favorite(&mut self, path: &str) {
        self.favorites.insert(path.to_string());
        self.persist();
    }

    pub fn remove_favorite(&mut self, path: &str) {
        self.favorites.remove(path);
        self.persist();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Returns the catalog entries that are favorites, in catalog order.
    ///
    /// Favorites whose bundle is no longer in the catalog are simply absent.
    #[must_use]
    pub fn favorite_entries<'a>(&self, catalog: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        catalog
            .iter()
            .filter(|entry| self.is_favorite(&entry.favorite_key()))
            .collect()
    }

    /// Whether the most recent write-through failed.
    #[must_use]
    pub const fn last_write_failed(&self) -> bool {
        self.last_write_failed
    }

    fn persist(&mut self) {
        let list: Vec<String> = self.favorites.iter().cloned().collect();
        match self.storage.write_string_list(FAVORITES_KEY, &list) {
            Ok(()) => self.last_write_failed = false,
            Err(e) => {
                tracing::warn!(error = %e, count = list.len(), "failed to persist favorites");
                self.last_write_failed = true;
            }
        }
    }
}

impl std::fmt::Debug for FavoritesRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesRegistry")
            .field("favorites", &self.favorites)
            .field("last_write_failed", &self.last_write_failed)
            .finish_non_exhaustive()
    }
}
