//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single mutating context of the launcher.
//! It owns the catalog store, the favorites registry, the search query, the pager,
//! and the input arbitrator, and derives the filtered list and the grid view model
//! from them.
//!
//! # Architecture
//!
//! `AppState` separates core data (catalog snapshot, favorites) from derived state
//! (filtered entries, page ranges). Every mutation that can change the filtered
//! list goes through [`AppState::apply_search_filter`], which also re-clamps the
//! pager, so the current page is valid after every step.
//!
//! # State Components
//!
//! - **Catalog**: Published snapshot of discovered applications
//! - **Favorites**: Favorite bundle paths with write-through persistence
//! - **Filtered Entries**: Catalog (or favorites) restricted by the search query
//! - **Pager**: Page geometry and the current page
//! - **Focus**: Search field or grid; decides how arrow keys are interpreted
//! - **View Mode**: All applications or favorites only
//!
//! # Example
//!
//! ```
//! use gridlaunch::app::{AppState, Geometry};
//! use gridlaunch::favorites::FavoritesRegistry;
//! use gridlaunch::storage::MemoryStorage;
//!
//! let favorites = FavoritesRegistry::load(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(vec![], Geometry::default(), favorites);
//! state.set_search("mail", 4);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.empty_state.is_some());
//! ```

use super::filter::filter_entries;
use super::input::{InputArbitrator, InputEvent, KeyFocus};
use super::modes::{Focus, ViewMode};
use super::pager::{Geometry, Pager};
use crate::catalog::{CatalogStore, PublishOutcome};
use crate::domain::CatalogEntry;
use crate::favorites::FavoritesRegistry;
use crate::ui::viewmodel::{EmptyState, GridCell, GridViewModel, HeaderInfo, PageDot, SearchBarInfo};
use std::path::PathBuf;

/// Longest display name shown on a tile before truncation.
const MAX_TILE_NAME: usize = 14;

/// Central launcher state container.
///
/// Mutated only by the event handler on one thread. Background scans hand their
/// results back through [`AppState::install_catalog`].
#[derive(Debug)]
pub struct AppState {
    /// Discovery roots in priority order.
    pub roots: Vec<PathBuf>,

    /// Owner of the published catalog snapshot.
    pub catalog: CatalogStore,

    pub favorites: FavoritesRegistry,

    /// Current search text.
    pub search_query: String,

    pub focus: Focus,

    pub view_mode: ViewMode,

    /// Entries matching the view mode and search query, in catalog order.
    ///
    /// Recomputed by `apply_search_filter()`; never edited directly.
    pub filtered: Vec<CatalogEntry>,

    pub pager: Pager,

    pub input: InputArbitrator,
}

impl AppState {
    /// Creates a launcher state with an empty catalog.
    ///
    /// Focus starts in the search field with an empty query.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, geometry: Geometry, favorites: FavoritesRegistry) -> Self {
        Self {
            roots,
            catalog: CatalogStore::new(),
            favorites,
            search_query: String::new(),
            focus: Focus::default(),
            view_mode: ViewMode::default(),
            filtered: vec![],
            pager: Pager::new(geometry),
            input: InputArbitrator::new(),
        }
    }

    /// Recomputes the filtered list and re-clamps the pager.
    ///
    /// # Filtering Algorithm
    ///
    /// 1. **View Mode**: All entries, or favorites only (catalog order)
    /// 2. **Query**: Case-insensitive substring match on the display name
    /// 3. **Re-clamp**: Pager item count updated, current page wrapped into range
    pub fn apply_search_filter(&mut self) {
        let _span = tracing::debug_span!("apply_search_filter",
            total_entries = self.catalog.entries().len(),
            query_len = self.search_query.len(),
            view_mode = ?self.view_mode
        ).entered();

        let entries = self.catalog.entries();
        self.filtered = match self.view_mode {
            ViewMode::All => filter_entries(entries, &self.search_query),
            ViewMode::Favorites => {
                filter_entries(self.favorites.favorite_entries(entries), &self.search_query)
            }
        };
        self.pager.set_item_count(self.filtered.len());

        tracing::debug!(
            filtered_count = self.filtered.len(),
            page_count = self.pager.page_count(),
            current_page = self.pager.current_page(),
            "search filter applied"
        );
    }

    /// Replaces the search text and moves focus into the search field.
    ///
    /// `caret` is clamped to the query length in characters.
    pub fn set_search(&mut self, query: &str, caret: usize) {
        let caret = caret.min(query.chars().count());
        self.focus = Focus::Search { caret };
        if self.search_query != query {
            self.search_query = query.to_string();
            self.apply_search_filter();
        }
    }

    /// Moves keyboard focus to the search field with the caret at the end.
    pub fn focus_search(&mut self) {
        self.focus = Focus::Search {
            caret: self.search_query.chars().count(),
        };
    }

    /// Keyboard focus as seen by the input arbitrator.
    #[must_use]
    pub fn key_focus(&self) -> KeyFocus {
        match self.focus {
            Focus::Grid => KeyFocus::Grid,
            Focus::Search { caret } => KeyFocus::TextField {
                text_len: self.search_query.chars().count(),
                caret,
            },
        }
    }

    /// Feeds one raw input event through the arbitrator and applies the result.
    ///
    /// Returns whether the current page changed.
    pub fn observe_input(&mut self, event: InputEvent) -> bool {
        self.input.observe(event);
        self.drain_input()
    }

    /// Applies every queued navigation command, including ones enqueued by
    /// external producers. Returns whether the current page changed.
    pub fn drain_input(&mut self) -> bool {
        let before = self.pager.current_page();
        self.input.drain_into(&mut self.pager);
        before != self.pager.current_page()
    }

    /// Changes the grid geometry; the pager re-clamps itself.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.pager.set_geometry(geometry);
    }

    /// Installs a finished catalog scan.
    ///
    /// Stale results are dropped by the store and leave the filtered list as is.
    pub fn install_catalog(&mut self, seq: u64, entries: Vec<CatalogEntry>) -> PublishOutcome {
        let outcome = self.catalog.publish(seq, entries);
        if outcome == PublishOutcome::Installed {
            self.apply_search_filter();
        }
        outcome
    }

    /// Entries shown on the current page.
    #[must_use]
    pub fn current_page_entries(&self) -> &[CatalogEntry] {
        self.pager
            .current_range()
            .and_then(|range| self.filtered.get(range))
            .unwrap_or(&[])
    }

    /// Entry at `index` within the current page, if any.
    #[must_use]
    pub fn entry_on_page(&self, index: usize) -> Option<&CatalogEntry> {
        self.current_page_entries().get(index)
    }

    /// Flips the favorite state of an entry and refreshes the favorites view.
    pub fn toggle_favorite(&mut self, path: &str) -> bool {
        let now_favorite = self.favorites.toggle_favorite(path);
        if self.view_mode == ViewMode::Favorites {
            self.apply_search_filter();
        }
        now_favorite
    }

    /// Switches view mode and refilters.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        if self.view_mode != view_mode {
            self.view_mode = view_mode;
            self.apply_search_filter();
        }
    }

    /// Computes a renderable view model of the current page.
    #[must_use]
    pub fn compute_viewmodel(&self) -> GridViewModel {
        let columns = self.pager.geometry().columns();

        let cells = self
            .current_page_entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| GridCell {
                index_on_page: index,
                row: index / columns,
                column: index % columns,
                name: truncate_name(&entry.display_name),
                path: entry.path.to_string_lossy().into_owned(),
                icon: entry.icon.as_ref().map(|icon| icon.as_str().to_string()),
                is_favorite: self.favorites.is_favorite(&entry.favorite_key()),
            })
            .collect();

        let indicator = (0..self.pager.page_count())
            .map(|page| PageDot {
                page,
                is_current: page == self.pager.current_page(),
            })
            .collect();

        GridViewModel {
            header: HeaderInfo {
                title: format!(" {} ({}) ", self.view_mode.title(), self.filtered.len()),
            },
            search_bar: SearchBarInfo {
                query: self.search_query.clone(),
                caret: match self.focus {
                    Focus::Search { caret } => Some(caret),
                    Focus::Grid => None,
                },
            },
            columns,
            cells,
            indicator,
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.filtered.is_empty() {
            return None;
        }

        let (message, subtitle) = if !self.search_query.is_empty() {
            (
                format!("No matches for \"{}\"", self.search_query),
                "Try a shorter or different search".to_string(),
            )
        } else if self.view_mode == ViewMode::Favorites {
            (
                "No favorites yet".to_string(),
                "Mark an application as favorite to pin it here".to_string(),
            )
        } else {
            (
                "No applications found".to_string(),
                "Check the configured roots or refresh the catalog".to_string(),
            )
        };

        Some(EmptyState { message, subtitle })
    }
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > MAX_TILE_NAME {
        let kept: String = name.chars().take(MAX_TILE_NAME - 3).collect();
        format!("{kept}...")
    } else {
        name.to_string()
    }
}
