//! Gridlaunch: the core of a full-screen application launcher.
//!
//! Gridlaunch discovers launchable application bundles, filters them live against
//! a search query, and lays the result out on a paged grid that can be navigated
//! by drag, scroll wheel, keyboard, and page indicator. Users can pin favorites,
//! which persist across sessions.
//!
//! - Recursive, deduplicated bundle discovery over ordered roots
//! - Case-insensitive substring filtering on every keystroke
//! - Wraparound paging with automatic re-clamping on content or geometry change
//! - Four input channels serialized into one ordered command stream
//! - Write-through favorites persisted as JSON
//! - Background catalog scans with ordered, stale-proof publication
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI front end (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Single mutating context
//! │  - Event handling, actions                          │
//! │  - Filter, pager, input arbitration                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Favorites &   │   │ Worker Layer  │
//! │ (catalog/)    │   │ Storage       │   │ (worker/)     │
//! │ - Discovery   │   │ - Registry    │   │ - Scan thread │
//! │ - Icons       │   │ - JSON file   │   │ - Channels    │
//! │ - Store       │   │ - Memory      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types, catalog entry (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Configuration is read from a TOML file; every key is optional:
//!
//! ```toml
//! roots = ["/Applications", "~/Applications", "/System/Applications"]
//! columns = 7
//! rows = 5
//! trace_level = "debug"
//! favorites_file = "~/.local/share/gridlaunch/favorites.json"
//! ```
//!
//! # Example
//!
//! ```
//! use gridlaunch::storage::MemoryStorage;
//! use gridlaunch::{handle_event, initialize, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config, Box::new(MemoryStorage::new()));
//!
//! for event in [Event::Refresh, Event::Escape] {
//!     let (_render, _actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), gridlaunch::GridlaunchError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod favorites;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Geometry, ViewMode};
pub use domain::{CatalogEntry, GridlaunchError, Result};

use crate::favorites::FavoritesRegistry;
use crate::infrastructure::paths;
use crate::storage::{JsonStorage, KeyValueStore, MemoryStorage};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the favorites store inside the data directory.
pub const FAVORITES_FILE_NAME: &str = "favorites.json";

/// Launcher configuration.
///
/// Deserialized from TOML; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to scan for bundles, in priority order.
    ///
    /// A leading `~` is expanded to the home directory. Default:
    /// `/Applications`, `~/Applications`, `/System/Applications`.
    pub roots: Vec<String>,

    /// Grid columns. Values below 1 are clamped to 1. Default: 7
    pub columns: i64,

    /// Grid rows. Values below 1 are clamped to 1. Default: 5
    pub rows: i64,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where favorites are stored. Default: `<data_dir>/favorites.json`
    pub favorites_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: paths::default_roots(),
            columns: 7,
            rows: 5,
            trace_level: None,
            favorites_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GridlaunchError::Config`] if the TOML is malformed or a value has
    /// the wrong type.
    ///
    /// # Example
    ///
    /// ```
    /// use gridlaunch::Config;
    ///
    /// let config = Config::from_toml_str("columns = 4\nroots = [\"~/Apps\"]")?;
    /// assert_eq!(config.columns, 4);
    /// assert_eq!(config.rows, 5);
    /// # Ok::<(), gridlaunch::GridlaunchError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| GridlaunchError::Config(format!("Failed to parse config TOML: {e}")))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GridlaunchError::Config`] if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            GridlaunchError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Default config file location: `<config_dir>/config.toml`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        paths::get_config_dir().join("config.toml")
    }

    /// Roots with `~` expanded, in configured order.
    #[must_use]
    pub fn resolved_roots(&self) -> Vec<PathBuf> {
        self.roots.iter().map(|root| paths::expand_tilde(root)).collect()
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.columns, self.rows)
    }

    /// Path of the favorites store.
    #[must_use]
    pub fn favorites_path(&self) -> PathBuf {
        self.favorites_file.as_deref().map_or_else(
            || paths::get_data_dir().join(FAVORITES_FILE_NAME),
            paths::expand_tilde,
        )
    }
}

/// Opens the configured favorites store.
///
/// Falls back to an in-memory store when the file store cannot be created, so
/// favorites still work for the session.
#[must_use]
pub fn open_favorites_storage(config: &Config) -> Box<dyn KeyValueStore> {
    let path = config.favorites_path();
    match JsonStorage::new(path.clone()) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "favorites store unavailable, using memory");
            Box::new(MemoryStorage::new())
        }
    }
}

/// Builds the launcher state from configuration.
///
/// The catalog starts empty; post [`Event::Refresh`] to populate it.
#[must_use]
pub fn initialize(config: &Config, favorites_storage: Box<dyn KeyValueStore>) -> AppState {
    let roots = config.resolved_roots();
    let geometry = config.geometry();

    tracing::debug!(
        roots = ?roots,
        columns = geometry.columns(),
        rows = geometry.rows(),
        "initializing gridlaunch"
    );

    let favorites = FavoritesRegistry::load(favorites_storage);
    let mut state = AppState::new(roots, geometry, favorites);
    state.apply_search_filter();
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.geometry().capacity(), 35);
    }

    #[test]
    fn degenerate_geometry_is_clamped_not_rejected() {
        let config = Config::from_toml_str("columns = 0\nrows = -2").unwrap();
        assert_eq!(config.geometry().capacity(), 1);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("columns = \"wide\"").unwrap_err();
        assert!(matches!(err, GridlaunchError::Config(_)));
    }

    #[test]
    fn explicit_favorites_file_wins() {
        let config = Config {
            favorites_file: Some("/tmp/gl/favs.json".to_string()),
            ..Config::default()
        };
        assert_eq!(config.favorites_path(), PathBuf::from("/tmp/gl/favs.json"));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "rows = 3\ntrace_level = \"debug\"").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.rows, 3);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(matches!(Config::load(dir.path().join("missing.toml")), Err(GridlaunchError::Config(_))));
    }

    #[test]
    fn initialize_loads_favorites_and_roots() {
        let storage = MemoryStorage::with_list(favorites::FAVORITES_KEY, vec!["/A.app".to_string()]);
        let config = Config {
            roots: vec!["/Applications".to_string()],
            ..Config::default()
        };
        let state = initialize(&config, Box::new(storage));
        assert!(state.favorites.is_favorite("/A.app"));
        assert_eq!(state.roots, vec![PathBuf::from("/Applications")]);
        assert!(state.filtered.is_empty());
    }
}
