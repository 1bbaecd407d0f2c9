//! Path utilities for launcher storage, configuration, and discovery roots.
//!
//! This module resolves the per-user data and configuration directories, expands
//! `~` in configured roots, and supplies the default set of application roots.

use std::path::PathBuf;

/// Directory name used under the platform data and config directories.
const APP_DIR_NAME: &str = "gridlaunch";

/// Returns the data directory for launcher state (favorites, logs).
///
/// Resolves to the platform data directory (e.g. `~/Library/Application Support`
/// on macOS, `~/.local/share` on Linux) joined with `gridlaunch`. Falls back to
/// a relative `.gridlaunch` directory when the platform directory is unknown.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".gridlaunch"))
}

/// Returns the directory holding `config.toml`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".gridlaunch"))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use gridlaunch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/Applications"), std::path::PathBuf::from("/Applications"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Default application roots, in discovery priority order.
///
/// System-wide applications come first so that they win deduplication ties.
#[must_use]
pub fn default_roots() -> Vec<String> {
    vec![
        "/Applications".to_string(),
        "~/Applications".to_string(),
        "/System/Applications".to_string(),
    ]
}
