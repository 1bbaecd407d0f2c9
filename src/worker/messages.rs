//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the launcher
//! thread and the background scan worker. Messages are plain owned data so they
//! can move through a channel without sharing anything with the caller.

use crate::domain::CatalogEntry;
use std::path::PathBuf;

/// Messages sent from the launcher thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Walk `roots` and report the discovered catalog.
    Scan {
        /// Refresh sequence reserved with `CatalogStore::begin_refresh`.
        seq: u64,

        /// Roots to enumerate, in priority order.
        roots: Vec<PathBuf>,
    },

    /// Stop the worker loop after finishing queued work.
    Shutdown,
}

impl WorkerMessage {
    /// Creates a scan request.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlaunch::worker::WorkerMessage;
    /// use std::path::PathBuf;
    ///
    /// let message = WorkerMessage::scan(3, vec![PathBuf::from("/Applications")]);
    /// assert!(matches!(message, WorkerMessage::Scan { seq: 3, .. }));
    /// ```
    #[must_use]
    pub fn scan(seq: u64, roots: Vec<PathBuf>) -> Self {
        Self::Scan { seq, roots }
    }
}

/// Responses sent from the worker thread back to the launcher thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// A scan finished.
    CatalogScanned {
        /// Sequence number echoed from the request.
        seq: u64,

        /// Sorted, deduplicated entries.
        entries: Vec<CatalogEntry>,
    },
}
