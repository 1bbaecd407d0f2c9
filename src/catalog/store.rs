//! Catalog store with ordered, all-or-nothing publication.
//!
//! The store owns the published catalog as an immutable, reference-counted
//! snapshot. A refresh is split in two halves so that discovery can run away from
//! the mutating context:
//!
//! 1. [`CatalogStore::begin_refresh`] hands out a monotonically increasing sequence
//!    number (on the mutating context)
//! 2. Discovery runs anywhere and produces a complete entry list
//! 3. [`CatalogStore::publish`] installs the list as a new snapshot (back on the
//!    mutating context), unless a newer sequence has already been published
//!
//! Readers hold an `Arc<CatalogSnapshot>` and never observe a partially built list.

use crate::catalog::discovery::discover;
use crate::catalog::icons::IconResolver;
use crate::domain::CatalogEntry;
use std::path::PathBuf;
use std::sync::Arc;

/// Immutable view of one published catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// Sequence number of the refresh that produced this snapshot (0 = initial empty).
    pub seq: u64,
    /// Sorted, deduplicated entries.
    pub entries: Vec<CatalogEntry>,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The result became the current snapshot.
    Installed,
    /// The result was older than (or the same age as) the current snapshot and was dropped.
    Stale,
}

/// Owner of the published application catalog.
#[derive(Debug, Default)]
pub struct CatalogStore {
    snapshot: Arc<CatalogSnapshot>,
    last_issued: u64,
}

impl CatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Returns the current entries.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.snapshot.entries
    }

    /// Sequence number of the currently published snapshot.
    #[must_use]
    pub fn published_seq(&self) -> u64 {
        self.snapshot.seq
    }

    /// Reserves the sequence number for a new refresh.
    ///
    /// Every call supersedes refreshes started earlier: their results will be
    /// dropped if they arrive after this one has been published.
    pub fn begin_refresh(&mut self) -> u64 {
        self.last_issued += 1;
        tracing::debug!(seq = self.last_issued, "catalog refresh started");
        self.last_issued
    }

    /// Installs a completed refresh result.
    ///
    /// Results whose sequence is not newer than the published snapshot are
    /// discarded, so a slow scan can never overwrite a faster, newer one.
    pub fn publish(&mut self, seq: u64, entries: Vec<CatalogEntry>) -> PublishOutcome {
        if seq <= self.snapshot.seq {
            tracing::debug!(
                seq = seq,
                published = self.snapshot.seq,
                "dropping stale catalog result"
            );
            return PublishOutcome::Stale;
        }

        tracing::debug!(seq = seq, entries = entries.len(), "catalog published");
        self.snapshot = Arc::new(CatalogSnapshot { seq, entries });
        PublishOutcome::Installed
    }

    /// Runs a full refresh on the calling thread.
    ///
    /// Equivalent to `begin_refresh`, `discover`, `publish` in sequence.
    pub fn refresh(&mut self, roots: &[PathBuf], icons: &dyn IconResolver) -> PublishOutcome {
        let seq = self.begin_refresh();
        let entries = discover(roots, icons);
        self.publish(seq, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::icons::NoIcons;
    use std::fs;

    fn entry(path: &str) -> CatalogEntry {
        CatalogEntry::new(PathBuf::from(path), None)
    }

    #[test]
    fn starts_empty() {
        let store = CatalogStore::new();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.published_seq(), 0);
    }

    #[test]
    fn newer_result_replaces_snapshot() {
        let mut store = CatalogStore::new();
        let seq = store.begin_refresh();
        assert_eq!(store.publish(seq, vec![entry("/A.app")]), PublishOutcome::Installed);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.published_seq(), seq);
    }

    #[test]
    fn late_stale_result_is_discarded() {
        let mut store = CatalogStore::new();
        let slow = store.begin_refresh();
        let fast = store.begin_refresh();

        assert_eq!(
            store.publish(fast, vec![entry("/New.app"), entry("/Other.app")]),
            PublishOutcome::Installed
        );
        assert_eq!(store.publish(slow, vec![entry("/Old.app")]), PublishOutcome::Stale);

        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.published_seq(), fast);
    }

    #[test]
    fn readers_keep_their_snapshot_across_publish() {
        let mut store = CatalogStore::new();
        let seq = store.begin_refresh();
        store.publish(seq, vec![entry("/A.app")]);
        let held = store.snapshot();

        let seq = store.begin_refresh();
        store.publish(seq, vec![]);

        assert_eq!(held.len(), 1);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn blocking_refresh_scans_roots() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Calendar.app")).unwrap();

        let mut store = CatalogStore::new();
        let outcome = store.refresh(&[dir.path().to_path_buf()], &NoIcons);

        assert_eq!(outcome, PublishOutcome::Installed);
        assert_eq!(store.entries()[0].display_name, "Calendar");
    }
}
