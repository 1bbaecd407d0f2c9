//! Side effects requested by the event handler.
//!
//! The handler never launches processes or touches the desktop itself. It returns
//! a `Vec<Action>` and the front end executes the actions in order, which keeps
//! state transitions testable without an operating system in the loop.
//!
//! # Example
//!
//! ```
//! use gridlaunch::app::Action;
//! use std::path::PathBuf;
//!
//! let actions = vec![
//!     Action::Launch { path: PathBuf::from("/Applications/Mail.app") },
//!     Action::Close,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::worker::WorkerMessage;
use std::path::PathBuf;

/// Commands for the external collaborators of the launcher core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hands a bundle to the OS application launcher.
    Launch {
        /// Canonical bundle path.
        path: PathBuf,
    },

    /// Shows the bundle in the platform file browser.
    RevealInFileBrowser { path: PathBuf },

    /// Opens the platform info panel for the bundle.
    ShowInfo { path: PathBuf },

    /// Posts a message to the background scan worker.
    PostToWorker(WorkerMessage),

    /// Dismisses the launcher.
    Close,
}
