//! Plain-text rendering of the grid view model.
//!
//! The renderer is deliberately dumb: it lays the current page out as fixed-width
//! tiles, draws the page indicator under the grid, and writes everything to any
//! `io::Write`. The CLI front end points it at stdout.
//!
//! ```text
//!  Applications (42)
//! > cal|
//! ────────────────────────────
//! Calculator      *Calendar
//! ────────────────────────────
//!            ● ○
//! ```

use crate::app::AppState;
use crate::ui::viewmodel::GridViewModel;
use std::io::{self, Write};

/// Width of one tile in characters, including the favorite marker.
pub const TILE_WIDTH: usize = 16;

/// Renders the current launcher state.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render<W: Write>(state: &AppState, out: &mut W) -> io::Result<()> {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, out)
}

/// Renders a pre-computed view model.
///
/// # Errors
///
/// Propagates write errors from `out`.
pub fn render_viewmodel<W: Write>(vm: &GridViewModel, out: &mut W) -> io::Result<()> {
    let width = vm.columns.max(1) * TILE_WIDTH;
    let rule = "─".repeat(width);

    writeln!(out, "{}", vm.header.title)?;
    writeln!(out, "> {}", search_line(vm))?;
    writeln!(out, "{rule}")?;

    if let Some(empty) = &vm.empty_state {
        writeln!(out, "{}", empty.message)?;
        writeln!(out, "{}", empty.subtitle)?;
        writeln!(out, "{rule}")?;
        return Ok(());
    }

    let mut row = None;
    for cell in &vm.cells {
        if row.is_some_and(|r| r != cell.row) {
            writeln!(out)?;
        }
        row = Some(cell.row);
        let marker = if cell.is_favorite { '*' } else { ' ' };
        write!(out, "{marker}{:<width$}", cell.name, width = TILE_WIDTH - 1)?;
    }
    if row.is_some() {
        writeln!(out)?;
    }

    writeln!(out, "{rule}")?;
    if vm.indicator.len() > 1 {
        let dots: Vec<&str> = vm
            .indicator
            .iter()
            .map(|dot| if dot.is_current { "●" } else { "○" })
            .collect();
        let dots = dots.join(" ");
        let pad = width.saturating_sub(dots.chars().count()) / 2;
        writeln!(out, "{}{dots}", " ".repeat(pad))?;
    }
    Ok(())
}

fn search_line(vm: &GridViewModel) -> String {
    let query = &vm.search_bar.query;
    let Some(caret) = vm.search_bar.caret else {
        return query.clone();
    };
    let split = query
        .char_indices()
        .nth(caret)
        .map_or(query.len(), |(byte, _)| byte);
    format!("{}|{}", &query[..split], &query[split..])
}
