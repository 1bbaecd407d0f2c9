//! Live text filter over the catalog.
//!
//! The filter is a pure function: an empty query returns the catalog unchanged,
//! otherwise an entry is kept iff its display name contains the query as a
//! case-insensitive substring. Catalog order is preserved.

use crate::domain::CatalogEntry;

/// Filters `entries` by `query`, keeping catalog order.
///
/// # Examples
///
/// ```
/// use gridlaunch::app::filter_entries;
/// use gridlaunch::domain::CatalogEntry;
/// use std::path::PathBuf;
///
/// let catalog = vec![
///     CatalogEntry::new(PathBuf::from("/Applications/Safari.app"), None),
///     CatalogEntry::new(PathBuf::from("/Applications/Mail.app"), None),
/// ];
/// let hits = filter_entries(&catalog, "FAR");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].display_name, "Safari");
/// ```
#[must_use]
pub fn filter_entries<'a, I>(entries: I, query: &str) -> Vec<CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    if query.is_empty() {
        return entries.into_iter().cloned().collect();
    }

    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|entry| entry.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn catalog(names: &[&str]) -> Vec<CatalogEntry> {
        names
            .iter()
            .map(|name| CatalogEntry::new(PathBuf::from(format!("/Apps/{name}.app")), None))
            .collect()
    }

    fn names(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.display_name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_catalog_unchanged() {
        let entries = catalog(&["Books", "Calendar", "Mail"]);
        assert_eq!(filter_entries(&entries, ""), entries);
    }

    #[test]
    fn matches_substrings_anywhere_ignoring_case() {
        let entries = catalog(&["Calculator", "Calendar", "Mail", "Photo Booth"]);
        assert_eq!(names(&filter_entries(&entries, "CAL")), vec!["Calculator", "Calendar"]);
        assert_eq!(names(&filter_entries(&entries, "booth")), vec!["Photo Booth"]);
        assert_eq!(names(&filter_entries(&entries, "o b")), vec!["Photo Booth"]);
    }

    #[test]
    fn is_not_fuzzy() {
        let entries = catalog(&["Calendar"]);
        assert!(filter_entries(&entries, "cdr").is_empty());
    }

    #[test]
    fn result_is_an_ordered_subsequence() {
        let entries = catalog(&["Alpha", "beta", "Gamma", "alphabet", "Delta"]);
        let hits = filter_entries(&entries, "a");
        let mut cursor = entries.iter();
        for hit in &hits {
            assert!(cursor.any(|e| e == hit), "{} out of order", hit.display_name);
            assert!(hit.display_name.to_lowercase().contains('a'));
        }
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn handles_non_ascii_case_folding() {
        let entries = catalog(&["Über Tool", "Straße"]);
        assert_eq!(names(&filter_entries(&entries, "über")), vec!["Über Tool"]);
    }
}
