//! Fixed-capacity pagination with wraparound navigation.
//!
//! The [`Pager`] partitions a list of `item_count` items into pages of
//! `columns × rows` cells and owns the current page index. Pages are never
//! stored: they are derived ranges recomputed from the count and geometry.
//!
//! # State Machine
//!
//! ```text
//!            count/geometry change (pages > 0)
//!   ┌───────┐ ─────────────────────────────▶ ┌───────────────────────┐
//!   │ Empty │                                │ Paged { current, n }  │ ◀─┐ forward / backward /
//!   └───────┘ ◀───────────────────────────── └───────────────────────┘ ──┘ jump / re-clamp
//!            count/geometry change (pages = 0)
//! ```
//!
//! Whenever the page count changes, the current page is re-clamped as
//! `current mod page_count` (or 0 when there are no pages).

use crate::app::input::NavCommand;
use crate::domain::error::{GridlaunchError, Result};
use std::ops::Range;

/// Grid dimensions of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    columns: usize,
    rows: usize,
}

impl Geometry {
    /// Builds a geometry, clamping each dimension to at least 1.
    ///
    /// Degenerate or negative values come from misconfiguration and must never
    /// produce a zero capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridlaunch::app::Geometry;
    ///
    /// let geometry = Geometry::new(0, -3);
    /// assert_eq!(geometry.capacity(), 1);
    /// assert_eq!(Geometry::new(7, 5).capacity(), 35);
    /// ```
    #[must_use]
    pub fn new(columns: i64, rows: i64) -> Self {
        Self {
            columns: clamp_dimension(columns),
            rows: clamp_dimension(rows),
        }
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Cells per page (`columns × rows`, at least 1).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self { columns: 7, rows: 5 }
    }
}

fn clamp_dimension(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

/// Observable pager state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// No items, no pages.
    Empty,
    /// At least one page; `current` is always below `page_count`.
    Paged { current: usize, page_count: usize },
}

/// Page partitioning and current-page owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    geometry: Geometry,
    item_count: usize,
    current: usize,
}

impl Pager {
    /// Creates an empty pager with the given geometry.
    #[must_use]
    pub const fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            item_count: 0,
            current: 0,
        }
    }

    #[must_use]
    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[must_use]
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of pages: `ceil(item_count / capacity)`.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.item_count.div_ceil(self.geometry.capacity())
    }

    /// Current page index (0 when empty).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn state(&self) -> PagerState {
        let page_count = self.page_count();
        if page_count == 0 {
            PagerState::Empty
        } else {
            PagerState::Paged {
                current: self.current,
                page_count,
            }
        }
    }

    /// Updates the number of items being paged and re-clamps.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.reclamp();
    }

    /// Updates the page geometry and re-clamps.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.reclamp();
    }

    /// Advances one page, wrapping from the last page to the first.
    pub fn forward(&mut self) {
        let page_count = self.page_count();
        if page_count == 0 {
            return;
        }
        self.current = (self.current + 1) % page_count;
    }

    /// Goes back one page, wrapping from the first page to the last.
    pub fn backward(&mut self) {
        let page_count = self.page_count();
        if page_count == 0 {
            return;
        }
        self.current = (self.current + page_count - 1) % page_count;
    }

    /// Jumps directly to `page`.
    ///
    /// # Errors
    ///
    /// Returns [`GridlaunchError::PageOutOfRange`] if `page` is not below the
    /// page count; the current page is left untouched.
    pub fn jump_to(&mut self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page >= page_count {
            return Err(GridlaunchError::PageOutOfRange {
                requested: page,
                page_count,
            });
        }
        self.current = page;
        Ok(())
    }

    /// Applies one navigation command.
    ///
    /// Commands against an empty pager are absorbed as no-ops.
    ///
    /// # Errors
    ///
    /// Propagates the out-of-range error from [`Pager::jump_to`].
    pub fn apply(&mut self, command: NavCommand) -> Result<()> {
        if self.page_count() == 0 {
            tracing::trace!(command = ?command, "pager empty, command absorbed");
            return Ok(());
        }

        match command {
            NavCommand::Forward => self.forward(),
            NavCommand::Backward => self.backward(),
            NavCommand::JumpTo(page) => self.jump_to(page)?,
        }
        Ok(())
    }

    /// Item index range of `page`, or `None` if the page does not exist.
    #[must_use]
    pub fn page_range(&self, page: usize) -> Option<Range<usize>> {
        if page >= self.page_count() {
            return None;
        }
        let capacity = self.geometry.capacity();
        let start = page * capacity;
        Some(start..(start + capacity).min(self.item_count))
    }

    /// Item index range of the current page.
    #[must_use]
    pub fn current_range(&self) -> Option<Range<usize>> {
        self.page_range(self.current)
    }

    fn reclamp(&mut self) {
        let page_count = self.page_count();
        let previous = self.current;
        self.current = if page_count == 0 {
            0
        } else {
            self.current % page_count
        };

        if previous != self.current {
            tracing::debug!(
                previous = previous,
                current = self.current,
                page_count = page_count,
                "current page re-clamped"
            );
        }
    }
}
