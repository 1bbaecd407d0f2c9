//! Background scan worker.
//!
//! Catalog discovery walks the filesystem and resolves icons, which is far too
//! slow for the thread that handles input. The [`ScanWorker`] runs discovery on a
//! dedicated thread and hands the finished list back over a channel; the caller
//! publishes it into its `CatalogStore` on its own thread.
//!
//! ```text
//! launcher thread                         worker thread
//!   post(Scan { seq, roots })  ──────────▶  discover(roots)
//!   responses()                ◀──────────  CatalogScanned { seq, entries }
//! ```

use crate::catalog::{discover, IconResolver};
use crate::domain::error::{GridlaunchError, Result};
use crate::worker::{WorkerMessage, WorkerResponse};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker state living on the scan thread.
pub struct ScanWorker {
    icons: Arc<dyn IconResolver>,
}

impl ScanWorker {
    #[must_use]
    pub fn new(icons: Arc<dyn IconResolver>) -> Self {
        Self { icons }
    }

    /// Spawns the worker on its own thread and returns the launcher-side handle.
    ///
    /// # Errors
    ///
    /// Returns [`GridlaunchError::Worker`] if the OS refuses to create the thread.
    pub fn spawn(icons: Arc<dyn IconResolver>) -> Result<WorkerHandle> {
        let (request_tx, request_rx) = unbounded::<WorkerMessage>();
        let (response_tx, response_rx) = unbounded::<WorkerResponse>();
        let mut worker = Self::new(icons);

        let join = thread::Builder::new()
            .name("gridlaunch-scan".to_string())
            .spawn(move || worker.run(&request_rx, &response_tx))
            .map_err(|e| GridlaunchError::Worker(format!("failed to spawn scan thread: {e}")))?;

        tracing::debug!("scan worker started");

        Ok(WorkerHandle {
            requests: request_tx,
            responses: response_rx,
            join: Some(join),
        })
    }

    /// Processes a worker message and returns the response, if any.
    ///
    /// `Shutdown` produces no response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> Option<WorkerResponse> {
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::Scan { seq, roots } => Some(self.handle_scan(seq, &roots)),
            WorkerMessage::Shutdown => None,
        }
    }

    fn handle_scan(&self, seq: u64, roots: &[PathBuf]) -> WorkerResponse {
        let entries = discover(roots, self.icons.as_ref());
        tracing::debug!(seq = seq, entries = entries.len(), "scan finished");
        WorkerResponse::CatalogScanned { seq, entries }
    }

    fn run(&mut self, requests: &Receiver<WorkerMessage>, responses: &Sender<WorkerResponse>) {
        while let Ok(message) = requests.recv() {
            if matches!(message, WorkerMessage::Shutdown) {
                tracing::debug!("scan worker shutting down");
                break;
            }

            if let Some(response) = self.handle_message(message) {
                if responses.send(response).is_err() {
                    tracing::debug!("launcher side dropped, stopping scan worker");
                    break;
                }
            }
        }
    }
}

/// Launcher-side handle to a running [`ScanWorker`].
///
/// Dropping the handle shuts the worker down and waits for it.
pub struct WorkerHandle {
    requests: Sender<WorkerMessage>,
    responses: Receiver<WorkerResponse>,
    join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`GridlaunchError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.requests
            .send(message)
            .map_err(|_| GridlaunchError::Worker("scan worker is not running".to_string()))
    }

    /// Response channel, for use in `crossbeam_channel::select!`.
    #[must_use]
    pub const fn responses(&self) -> &Receiver<WorkerResponse> {
        &self.responses
    }

    /// Waits up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WorkerResponse> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stops the worker and joins its thread.
    pub fn shutdown(&mut self) {
        let _ = self.requests.send(WorkerMessage::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!("scan worker panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
