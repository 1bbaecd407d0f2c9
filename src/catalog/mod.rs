//! Application catalog: discovery, icon resolution, and the published store.
//!
//! # Modules
//!
//! - `discovery`: Recursive, deduplicated bundle walk over the configured roots
//! - `icons`: [`IconResolver`] seam and the built-in resolvers
//! - `store`: [`CatalogStore`] holding the current snapshot with ordered publishes

pub mod discovery;
pub mod icons;
pub mod store;

pub use discovery::{discover, is_bundle_name, sort_entries, BUNDLE_EXTENSION};
pub use icons::{BundleIconResolver, IconResolver, NoIcons};
pub use store::{CatalogSnapshot, CatalogStore, PublishOutcome};
