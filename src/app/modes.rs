//! View and focus state types for the launcher.
//!
//! # State Machine
//!
//! Keyboard focus is either on the search field or on the grid:
//! - **Search**: text editing is live; arrow keys only page at caret boundaries
//! - **Grid**: every paging key pages
//!
//! View modes control which catalog entries are candidates for filtering:
//! - **All**: the whole catalog
//! - **Favorites**: only entries the user marked as favorite
//!
//! # Example
//!
//! ```
//! use gridlaunch::app::{Focus, ViewMode};
//!
//! let focus = Focus::Search { caret: 0 };
//! assert_eq!(ViewMode::default(), ViewMode::All);
//! assert!(focus.is_search());
//! ```

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The search field has focus; `caret` is a character offset into the query.
    Search { caret: usize },

    /// The grid has focus.
    Grid,
}

impl Default for Focus {
    fn default() -> Self {
        Self::Search { caret: 0 }
    }
}

impl Focus {
    #[must_use]
    pub const fn is_search(&self) -> bool {
        matches!(self, Self::Search { .. })
    }
}

/// Which entries are shown before the text filter runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// Every catalog entry.
    #[default]
    All,

    /// Favorites only, in catalog order.
    Favorites,
}

impl ViewMode {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::All => "Applications",
            Self::Favorites => "Favorites",
        }
    }
}
