//! Icon resolution seam.
//!
//! The catalog asks an [`IconResolver`] for a handle per discovered bundle. The
//! handle is opaque to the core; whoever draws the grid decides what it means.
//! Resolution failures are never fatal: the entry is kept with no icon.

use crate::domain::IconHandle;
use std::path::Path;

/// External collaborator that turns a bundle path into an icon handle.
///
/// Implementations must be shareable across threads because discovery may run
/// on the scan worker.
pub trait IconResolver: Send + Sync {
    /// Returns a handle for the bundle's icon, or `None` if none can be produced.
    fn resolve_icon(&self, bundle: &Path) -> Option<IconHandle>;
}

/// Resolver that never produces an icon.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn resolve_icon(&self, _bundle: &Path) -> Option<IconHandle> {
        None
    }
}

/// Resolves icons from the bundle's `Contents/Resources` directory.
///
/// Returns the path of the first `.icns` file (in name order) as the handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleIconResolver;

impl IconResolver for BundleIconResolver {
    fn resolve_icon(&self, bundle: &Path) -> Option<IconHandle> {
        let resources = bundle.join("Contents").join("Resources");
        let read_dir = match std::fs::read_dir(&resources) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                tracing::trace!(bundle = ?bundle, error = %e, "no resources directory");
                return None;
            }
        };

        let mut icons: Vec<_> = read_dir
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "icns"))
            .collect();
        icons.sort();

        icons
            .into_iter()
            .next()
            .map(|icon| IconHandle::new(icon.to_string_lossy().into_owned()))
    }
}
