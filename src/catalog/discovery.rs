//! Filesystem discovery of application bundles.
//!
//! Walks every configured root in order, collects entries whose name carries the
//! bundle extension, deduplicates them by canonical path, and returns the list
//! sorted for display.
//!
//! # Walk Rules
//!
//! 1. Hidden entries (name starts with `.`) are skipped, and hidden directories are
//!    not descended into
//! 2. A bundle is an opaque leaf: once recognized, its contents are never walked
//! 3. The first root to reach a canonical path owns it; later sightings are dropped
//! 4. Unreadable roots and subtrees are skipped without failing the scan
//!
//! # Ordering
//!
//! Entries are sorted by display name with case and diacritics folded, so `Élan`
//! sorts beside `Elan` rather than after `Z`. Names equal under folding fall back
//! to their lowercase form, then to the canonical path, so that repeated scans of
//! the same tree produce the same order.

use crate::catalog::icons::IconResolver;
use crate::domain::CatalogEntry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use walkdir::{DirEntry, WalkDir};

/// File extension that marks a launchable bundle.
pub const BUNDLE_EXTENSION: &str = "app";

/// Scans `roots` in order and returns the deduplicated, sorted catalog.
///
/// Icons are requested from `icons` once per kept entry.
///
/// # Examples
///
/// ```no_run
/// use gridlaunch::catalog::{discover, NoIcons};
/// use std::path::PathBuf;
///
/// let entries = discover(&[PathBuf::from("/Applications")], &NoIcons);
/// for entry in &entries {
///     println!("{}", entry.display_name);
/// }
/// ```
pub fn discover(roots: &[PathBuf], icons: &dyn IconResolver) -> Vec<CatalogEntry> {
    let _span = tracing::debug_span!("discover", root_count = roots.len()).entered();

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut entries = Vec::new();

    for root in roots {
        let before = entries.len();
        for bundle in bundles_under(root) {
            let canonical = canonicalize_or_keep(&bundle);
            if !seen.insert(canonical.clone()) {
                tracing::trace!(path = ?canonical, "duplicate bundle skipped");
                continue;
            }

            let icon = icons.resolve_icon(&canonical);
            entries.push(CatalogEntry::found_at(&bundle, canonical, icon));
        }
        tracing::debug!(root = ?root, found = entries.len() - before, "root scanned");
    }

    sort_entries(&mut entries);

    tracing::debug!(total = entries.len(), "discovery complete");
    entries
}

/// Sorts entries by folded display name, then lowercase name, then path.
pub fn sort_entries(entries: &mut [CatalogEntry]) {
    entries.sort_by_cached_key(|entry| {
        let lower = entry.display_name.to_lowercase();
        (collation_key(&lower), lower, entry.path.clone())
    });
}

/// Strips combining marks after canonical decomposition.
fn collation_key(name: &str) -> String {
    name.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Returns `true` if the file name carries the bundle extension.
#[must_use]
pub fn is_bundle_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == BUNDLE_EXTENSION)
}

/// Collects every bundle path below `root`, in walk order.
fn bundles_under(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).follow_links(false).into_iter();

    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) => {
                tracing::debug!(root = ?root, error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() > 0 && is_hidden(&entry) {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let is_bundle = entry.depth() > 0 && is_bundle_name(&entry.file_name().to_string_lossy());
        if is_bundle {
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            found.push(entry.into_path());
        }
    }

    found
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn canonicalize_or_keep(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|e| {
        tracing::trace!(path = ?path, error = %e, "canonicalize failed, keeping path as found");
        path.to_path_buf()
    })
}
