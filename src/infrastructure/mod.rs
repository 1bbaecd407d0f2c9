//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides platform path handling: where launcher state lives,
//! where configuration is read from, and how configured roots are expanded.

pub mod paths;

pub use paths::{default_roots, expand_tilde, get_config_dir, get_data_dir};
