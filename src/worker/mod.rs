//! Background worker thread for catalog scans.
//!
//! Discovery runs off the input-handling thread so a slow filesystem never
//! stalls paging or typing. Results come back as messages and are published on
//! the launcher thread.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation, thread spawning, and the launcher-side handle

pub mod handler;
pub mod messages;

pub use handler::{ScanWorker, WorkerHandle};
pub use messages::{WorkerMessage, WorkerResponse};
