//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the front end (main.rs) and the catalog, favorites,
//! and worker layers. It implements the single mutating context of the launcher.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! Paging input takes a detour through the [`InputArbitrator`], which turns raw
//! drags, scrolls, keys, and taps into one ordered stream of [`NavCommand`]s for
//! the [`Pager`].
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Case-insensitive substring filter over the catalog
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`input`]: Input channels and the command arbitrator
//! - [`modes`]: Focus and view mode types
//! - [`pager`]: Page geometry, page ranges, and wraparound navigation
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod filter;
pub mod handler;
pub mod input;
pub mod modes;
pub mod pager;
pub mod state;

pub use actions::Action;
pub use filter::filter_entries;
pub use handler::{handle_event, Event};
pub use input::{
    drag_command, key_command, CommandSender, DragTracker, InputArbitrator, InputEvent, KeyFocus,
    NavCommand, NavKey, ScrollDelta, WheelAccumulator,
};
pub use modes::{Focus, ViewMode};
pub use pager::{Geometry, Pager, PagerState};
pub use state::AppState;
