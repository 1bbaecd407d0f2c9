//! Storage layer for persistent launcher state.
//!
//! This module provides the key/value persistence boundary used by the favorites
//! registry. Values are plain string lists; there is no schema versioning beyond
//! the file format version in the JSON backend.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: In-process storage for tests and fallbacks

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
