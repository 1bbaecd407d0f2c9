//! User interface layer: view models and a plain-text renderer.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → GridViewModel → render → text output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable launcher state
//! - [`renderer`]: Fixed-width tile renderer over any `io::Write`

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{EmptyState, GridCell, GridViewModel, HeaderInfo, PageDot, SearchBarInfo};
