//! Domain layer for the launcher.
//!
//! This module contains the core domain types shared by every other layer,
//! independent of how entries are discovered, drawn, or persisted.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`entry`]: Catalog entry model and its opaque handles
//!
//! # Examples
//!
//! ```
//! use gridlaunch::domain::{CatalogEntry, Result};
//! use std::path::PathBuf;
//!
//! fn make_entry() -> Result<CatalogEntry> {
//!     Ok(CatalogEntry::new(PathBuf::from("/Applications/Safari.app"), None))
//! }
//! ```

pub mod entry;
pub mod error;

pub use entry::{CatalogEntry, EntryId, IconHandle};
pub use error::{GridlaunchError, Result};
