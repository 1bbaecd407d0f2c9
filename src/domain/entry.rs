//! Catalog entry domain model.
//!
//! A [`CatalogEntry`] is one launchable application bundle discovered on disk.
//! Entries are created during a catalog refresh and never mutated afterwards; a
//! later refresh replaces the whole list.

use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier of a catalog entry.
///
/// Derived from the canonical bundle path, so it is unique within a catalog and
/// stable across rescans of the same install.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    /// Derives the identifier for a canonical bundle path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to a rendered icon.
///
/// The core never looks inside; it only carries whatever the icon resolver
/// handed back so the presentation layer can draw it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconHandle(String);

impl IconHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One launchable application in the catalog.
///
/// # Fields
///
/// - `id`: Stable identifier derived from `path`
/// - `display_name`: Bundle file name without its extension
/// - `path`: Canonical absolute bundle path; also the favorites key
/// - `icon`: Icon handle from the resolver, `None` when resolution failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub display_name: String,
    pub path: PathBuf,
    pub icon: Option<IconHandle>,
}

impl CatalogEntry {
    /// Builds an entry for a canonical bundle path.
    ///
    /// The display name is the final path component with its extension removed,
    /// falling back to the full component when there is no stem.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlaunch::domain::CatalogEntry;
    /// use std::path::PathBuf;
    ///
    /// let entry = CatalogEntry::new(PathBuf::from("/Applications/Utilities/Terminal.app"), None);
    /// assert_eq!(entry.display_name, "Terminal");
    /// ```
    #[must_use]
    pub fn new(path: PathBuf, icon: Option<IconHandle>) -> Self {
        Self::found_at(&path, path.clone(), icon)
    }

    /// Builds an entry for a bundle seen at `found` that resolves to `canonical`.
    ///
    /// The display name comes from `found`, so a symlinked bundle keeps the name
    /// of its link even when the target is named differently. `id` and `path`
    /// use the canonical location.
    #[must_use]
    pub fn found_at(found: &Path, canonical: PathBuf, icon: Option<IconHandle>) -> Self {
        Self {
            id: EntryId::from_path(&canonical),
            display_name: display_name_of(found),
            path: canonical,
            icon,
        }
    }

    /// Returns the key this entry is stored under in the favorites set.
    #[must_use]
    pub fn favorite_key(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_only_the_bundle_extension() {
        let entry = CatalogEntry::new(PathBuf::from("/Applications/Visual Studio Code.app"), None);
        assert_eq!(entry.display_name, "Visual Studio Code");

        let dotted = CatalogEntry::new(PathBuf::from("/Applications/Foo.Bar.app"), None);
        assert_eq!(dotted.display_name, "Foo.Bar");
    }

    #[test]
    fn found_name_with_canonical_path() {
        let entry = CatalogEntry::found_at(
            Path::new("/Applications/Chrome.app"),
            PathBuf::from("/opt/store/chrome-123/Google Chrome.app"),
            None,
        );
        assert_eq!(entry.display_name, "Chrome");
        assert_eq!(entry.id.as_str(), "/opt/store/chrome-123/Google Chrome.app");
    }

    #[test]
    fn id_and_favorite_key_follow_the_path() {
        let entry = CatalogEntry::new(PathBuf::from("/Applications/Mail.app"), None);
        assert_eq!(entry.id.as_str(), "/Applications/Mail.app");
        assert_eq!(entry.favorite_key(), "/Applications/Mail.app");
    }
}
