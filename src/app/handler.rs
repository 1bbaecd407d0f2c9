//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and worker
//! responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the front end or the scan worker
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Search**: `SearchEdited`, `CaretMoved`, `ClearSearch`, `FocusSearch`, `FocusGrid`
//! - **Paging**: `Key`, `Scroll`, `DragBegan`/`DragMoved`/`DragEnded`, `IndicatorTapped`
//! - **Items**: `LaunchItem`, `RevealItem`, `ShowInfo`, `ToggleFavorite`
//! - **View**: `ShowAll`, `ShowFavorites`, `GeometryChanged`
//! - **Catalog**: `Refresh`, `WorkerResponse`
//! - **Lifecycle**: `Escape`
//!
//! # Example
//!
//! ```
//! use gridlaunch::app::{handle_event, Action, AppState, Event, Geometry};
//! use gridlaunch::favorites::FavoritesRegistry;
//! use gridlaunch::storage::MemoryStorage;
//!
//! let favorites = FavoritesRegistry::load(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(vec![], Geometry::default(), favorites);
//! let (_render, actions) = handle_event(&mut state, &Event::Escape)?;
//! assert_eq!(actions, vec![Action::Close]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::input::{InputEvent, NavKey, ScrollDelta};
use crate::app::modes::{Focus, ViewMode};
use crate::app::pager::Geometry;
use crate::app::{Action, AppState};
use crate::catalog::PublishOutcome;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events from the front end or the scan worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search text changed; `caret` is a character offset.
    SearchEdited { query: String, caret: usize },
    /// The caret moved without editing the text.
    CaretMoved { caret: usize },
    /// Clears the query, keeping focus in the search field.
    ClearSearch,
    /// Returns focus to the search field with the caret at the end.
    FocusSearch,
    /// Moves focus to the grid.
    FocusGrid,

    /// Key-down of a paging key; interpreted against the current focus.
    Key(NavKey),
    Scroll(ScrollDelta),
    DragBegan { x: f64, y: f64 },
    DragMoved { x: f64, y: f64 },
    DragEnded { x: f64, y: f64 },
    /// Page indicator dot tapped.
    IndicatorTapped(usize),

    /// Grid geometry changed (e.g., preferences edited). Values are clamped to 1.
    GeometryChanged { columns: i64, rows: i64 },

    /// Launches the item at this position on the current page.
    LaunchItem(usize),
    RevealItem(usize),
    ShowInfo(usize),
    ToggleFavorite(usize),

    ShowAll,
    ShowFavorites,

    /// Starts a background catalog refresh.
    Refresh,
    /// Wraps a response from the scan worker.
    WorkerResponse(WorkerResponse),

    /// Dismisses the launcher.
    Escape,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean tells the caller whether the visible state changed and the grid
/// should be redrawn.
///
/// # Errors
///
/// Returns errors from state mutation methods. Recoverable conditions (stale
/// scans, rejected jumps, missing items) are logged and never surface here.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SearchEdited { query, caret } => {
            state.set_search(query, *caret);
            tracing::trace!(query = %state.search_query, "search query updated");
            Ok((true, vec![]))
        }
        Event::CaretMoved { caret } => {
            let caret = (*caret).min(state.search_query.chars().count());
            state.focus = Focus::Search { caret };
            Ok((false, vec![]))
        }
        Event::ClearSearch => {
            state.set_search("", 0);
            Ok((true, vec![]))
        }
        Event::FocusSearch => {
            state.focus_search();
            Ok((true, vec![]))
        }
        Event::FocusGrid => {
            state.focus = Focus::Grid;
            Ok((true, vec![]))
        }
        Event::Key(key) => {
            let focus = state.key_focus();
            let moved = state.observe_input(InputEvent::Key { key: *key, focus });
            Ok((moved, vec![]))
        }
        Event::Scroll(delta) => Ok((state.observe_input(InputEvent::Scroll(*delta)), vec![])),
        Event::DragBegan { x, y } => {
            Ok((state.observe_input(InputEvent::DragBegan { x: *x, y: *y }), vec![]))
        }
        Event::DragMoved { x, y } => {
            Ok((state.observe_input(InputEvent::DragMoved { x: *x, y: *y }), vec![]))
        }
        Event::DragEnded { x, y } => {
            Ok((state.observe_input(InputEvent::DragEnded { x: *x, y: *y }), vec![]))
        }
        Event::IndicatorTapped(page) => {
            Ok((state.observe_input(InputEvent::IndicatorTapped(*page)), vec![]))
        }
        Event::GeometryChanged { columns, rows } => {
            let geometry = Geometry::new(*columns, *rows);
            tracing::debug!(
                columns = geometry.columns(),
                rows = geometry.rows(),
                "grid geometry changed"
            );
            state.set_geometry(geometry);
            Ok((true, vec![]))
        }
        Event::LaunchItem(index) => {
            let Some(entry) = state.entry_on_page(*index) else {
                tracing::debug!(index = index, "no item to launch");
                return Ok((false, vec![]));
            };

            tracing::debug!(name = %entry.display_name, path = %entry.path.display(), "launching");
            Ok((false, vec![Action::Launch { path: entry.path.clone() }, Action::Close]))
        }
        Event::RevealItem(index) => Ok((
            false,
            state
                .entry_on_page(*index)
                .map(|entry| Action::RevealInFileBrowser { path: entry.path.clone() })
                .into_iter()
                .collect(),
        )),
        Event::ShowInfo(index) => Ok((
            false,
            state
                .entry_on_page(*index)
                .map(|entry| Action::ShowInfo { path: entry.path.clone() })
                .into_iter()
                .collect(),
        )),
        Event::ToggleFavorite(index) => {
            let Some(key) = state.entry_on_page(*index).map(|entry| entry.favorite_key()) else {
                return Ok((false, vec![]));
            };
            state.toggle_favorite(&key);
            Ok((true, vec![]))
        }
        Event::ShowAll => {
            state.set_view_mode(ViewMode::All);
            Ok((true, vec![]))
        }
        Event::ShowFavorites => {
            state.set_view_mode(ViewMode::Favorites);
            Ok((true, vec![]))
        }
        Event::Refresh => {
            let seq = state.catalog.begin_refresh();
            Ok((false, vec![Action::PostToWorker(WorkerMessage::scan(seq, state.roots.clone()))]))
        }
        Event::WorkerResponse(WorkerResponse::CatalogScanned { seq, entries }) => {
            let outcome = state.install_catalog(*seq, entries.clone());
            Ok((outcome == PublishOutcome::Installed, vec![]))
        }
        Event::Escape => Ok((false, vec![Action::Close])),
    }
}
