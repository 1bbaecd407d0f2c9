//! View model types representing renderable launcher state.
//!
//! View models are immutable snapshots computed by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain no
//! business logic, only display-ready data for the current page.
//!
//! # Example
//!
//! ```
//! use gridlaunch::ui::{GridViewModel, HeaderInfo, SearchBarInfo};
//!
//! let vm = GridViewModel {
//!     header: HeaderInfo { title: " Applications (0) ".to_string() },
//!     search_bar: SearchBarInfo { query: String::new(), caret: Some(0) },
//!     columns: 7,
//!     cells: vec![],
//!     indicator: vec![],
//!     empty_state: None,
//! };
//! assert!(vm.cells.is_empty());
//! ```

/// Complete view model for one frame of the launcher grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridViewModel {
    pub header: HeaderInfo,

    pub search_bar: SearchBarInfo,

    /// Grid width in cells; rows are implied by the cells' `row` fields.
    pub columns: usize,

    /// Cells of the current page in row-major order.
    pub cells: Vec<GridCell>,

    /// One dot per page; empty when there are no pages.
    pub indicator: Vec<PageDot>,

    /// Set when there is nothing to show.
    pub empty_state: Option<EmptyState>,
}

/// One application tile on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Position within the page; this is the index item events refer to.
    pub index_on_page: usize,

    pub row: usize,

    pub column: usize,

    /// Display name, truncated to fit the tile.
    pub name: String,

    /// Full bundle path.
    pub path: String,

    /// Icon handle text, if one was resolved.
    pub icon: Option<String>,

    pub is_favorite: bool,
}

/// Page indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDot {
    pub page: usize,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

/// Search field contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Caret position when the field has focus.
    pub caret: Option<usize>,
}

/// Message shown instead of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No applications found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
