//! Command-line front end for the launcher core.
//!
//! Reads one command per line from stdin, turns it into an [`Event`], runs it
//! through the library's event handler, executes the resulting actions, and
//! redraws the grid when asked to. Catalog scans run on the background worker;
//! its responses are multiplexed with stdin so the grid updates as soon as a
//! scan lands.
//!
//! ```text
//! stdin thread ──lines──▶ ┌────────────────┐ ◀──responses── scan worker
//!                         │  command loop  │ ──Scan{seq}──▶
//!                         └────────────────┘
//!                                 │ render
//!                                 ▼
//!                               stdout
//! ```
//!
//! # Commands
//!
//! - `/text`: Set the search query (`/` alone clears it)
//! - `left`, `right`, `up`, `down`, `pgup`, `pgdn`: Paging keys
//! - `scroll <dy> [precise]`, `drag <from> <to> [dy]`, `page <n>`: Other input channels
//! - `open <i>`, `reveal <i>`, `info <i>`, `fav <i>`: Act on the i-th item of the page
//! - `favs`, `all`: Switch view mode
//! - `grid`, `search`: Move keyboard focus
//! - `caret <n>`: Move the search caret
//! - `geometry <cols> <rows>`, `refresh`
//! - `q`, `esc`: Quit

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use crossbeam_channel::{never, select, unbounded, Receiver};
use gridlaunch::app::{NavKey, ScrollDelta};
use gridlaunch::catalog::BundleIconResolver;
use gridlaunch::worker::{ScanWorker, WorkerHandle, WorkerResponse};
use gridlaunch::{handle_event, initialize, observability, ui, Action, AppState, Config, Event};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::thread;

#[derive(Parser, Debug)]
#[command(name = "gridlaunch")]
#[command(about = "Paged application launcher driven from the terminal")]
struct Args {
    /// Path to a TOML config file (default: <config_dir>/gridlaunch/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid columns
    #[arg(long)]
    columns: Option<i64>,

    /// Grid rows
    #[arg(long)]
    rows: Option<i64>,

    /// Discovery root; repeat to scan several (replaces configured roots)
    #[arg(short, long = "root")]
    roots: Vec<String>,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long)]
    trace_level: Option<String>,
}

fn main() -> gridlaunch::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    observability::init_tracing(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gridlaunch starting");

    let storage = gridlaunch::open_favorites_storage(&config);
    let mut state = initialize(&config, storage);
    let mut worker = ScanWorker::spawn(Arc::new(BundleIconResolver))?;

    let lines = spawn_stdin_reader();
    let mut responses = worker.responses().clone();
    let mut stdout = io::stdout();

    dispatch(&mut state, &worker, &Event::Refresh, &mut stdout)?;
    ui::render(&state, &mut stdout)?;

    'session: loop {
        let events = match next_input(&lines, &mut responses) {
            Input::Events(events) => events,
            Input::Unknown(line) => {
                writeln!(stdout, "unknown command: {}", line.trim())?;
                continue;
            }
            Input::Idle => continue,
        };

        for event in &events {
            if !dispatch(&mut state, &worker, event, &mut stdout)? {
                break 'session;
            }
        }
    }

    worker.shutdown();
    tracing::info!("gridlaunch exiting");
    Ok(())
}

fn load_config(args: &Args) -> gridlaunch::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let default_path = Config::default_path();
            if default_path.exists() {
                Config::load(default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if !args.roots.is_empty() {
        config.roots.clone_from(&args.roots);
    }
    if args.trace_level.is_some() {
        config.trace_level.clone_from(&args.trace_level);
    }
    Ok(config)
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// What the command loop woke up for.
#[derive(Debug, PartialEq)]
enum Input {
    Events(Vec<Event>),
    Unknown(String),
    Idle,
}

/// Blocks until a stdin line or a worker response arrives.
///
/// Closed stdin reads as `Escape`. A dead scan worker is logged once and its
/// receiver replaced with one that never fires, so later calls keep serving stdin.
fn next_input(lines: &Receiver<String>, responses: &mut Receiver<WorkerResponse>) -> Input {
    let mut worker_gone = false;
    let current: &Receiver<WorkerResponse> = responses;

    let input = select! {
        recv(lines) -> line => match line {
            Ok(line) => parse_command(&line).map_or(Input::Unknown(line), Input::Events),
            Err(_) => Input::Events(vec![Event::Escape]),
        },
        recv(current) -> response => match response {
            Ok(response) => Input::Events(vec![Event::WorkerResponse(response)]),
            Err(_) => {
                worker_gone = true;
                Input::Idle
            }
        },
    };

    if worker_gone {
        tracing::warn!("scan worker disconnected, catalog refresh unavailable");
        *responses = never();
    }
    input
}

/// Handles one event and executes its actions. Returns `false` once the
/// launcher should close.
fn dispatch<W: Write>(
    state: &mut AppState,
    worker: &WorkerHandle,
    event: &Event,
    out: &mut W,
) -> gridlaunch::Result<bool> {
    let (should_render, actions) = handle_event(state, event)?;

    for action in actions {
        match action {
            Action::Launch { path } => launch(&path),
            Action::RevealInFileBrowser { path } => reveal(&path),
            Action::ShowInfo { path } => show_info(&path, out)?,
            Action::PostToWorker(message) => worker.post(message)?,
            Action::Close => return Ok(false),
        }
    }

    if should_render {
        ui::render(state, out)?;
    }
    Ok(true)
}

/// Parses one input line into the events it stands for.
///
/// Most commands map to a single event; a drag expands into its begin, move,
/// and end events.
fn parse_command(line: &str) -> Option<Vec<Event>> {
    let line = line.trim();
    if let Some(query) = line.strip_prefix('/') {
        return Some(vec![Event::SearchEdited {
            query: query.to_string(),
            caret: query.chars().count(),
        }]);
    }

    let mut words = line.split_whitespace();
    let command = words.next()?;
    let args: Vec<&str> = words.collect();
    let number = |i: usize| args.get(i).and_then(|w| w.parse::<f64>().ok());

    let event = match command {
        "left" => Event::Key(NavKey::Left),
        "right" => Event::Key(NavKey::Right),
        "up" => Event::Key(NavKey::Up),
        "down" => Event::Key(NavKey::Down),
        "pgup" => Event::Key(NavKey::PageUp),
        "pgdn" => Event::Key(NavKey::PageDown),
        "scroll" => {
            let dy = number(0)?;
            let precise = args.get(1) == Some(&"precise");
            Event::Scroll(ScrollDelta { dx: 0.0, dy, precise, inverted: false })
        }
        "drag" => {
            let from = number(0)?;
            let to = number(1)?;
            let dy = number(2).unwrap_or(0.0);
            return Some(vec![
                Event::DragBegan { x: from, y: 0.0 },
                Event::DragMoved { x: to, y: dy },
                Event::DragEnded { x: to, y: dy },
            ]);
        }
        "page" => Event::IndicatorTapped(index(number(0)?)?),
        "open" => Event::LaunchItem(index(number(0)?)?),
        "reveal" => Event::RevealItem(index(number(0)?)?),
        "info" => Event::ShowInfo(index(number(0)?)?),
        "fav" => Event::ToggleFavorite(index(number(0)?)?),
        "favs" => Event::ShowFavorites,
        "all" => Event::ShowAll,
        "grid" => Event::FocusGrid,
        "search" => Event::FocusSearch,
        "caret" => Event::CaretMoved { caret: index(number(0)?)? },
        "geometry" => {
            let columns = number(0)? as i64;
            let rows = number(1)? as i64;
            Event::GeometryChanged { columns, rows }
        }
        "refresh" => Event::Refresh,
        "q" | "quit" | "esc" => Event::Escape,
        _ => return None,
    };
    Some(vec![event])
}

fn index(value: f64) -> Option<usize> {
    (value >= 0.0 && value.fract() == 0.0).then(|| value as usize)
}

fn launch(path: &Path) {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    match Command::new(opener).arg(path).spawn() {
        Ok(_) => tracing::info!(path = %path.display(), "launched"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "launch failed"),
    }
}

fn reveal(path: &Path) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg("-R").arg(path).spawn()
    } else {
        Command::new("xdg-open")
            .arg(path.parent().unwrap_or(path))
            .spawn()
    };
    if let Err(e) = result {
        tracing::warn!(path = %path.display(), error = %e, "reveal failed");
    }
}

fn show_info<W: Write>(path: &Path, out: &mut W) -> io::Result<()> {
    writeln!(out, "path: {}", path.display())?;
    if let Ok(modified) = path.metadata().and_then(|m| m.modified()) {
        let modified: chrono::DateTime<chrono::Local> = modified.into();
        writeln!(out, "modified: {}", modified.format("%Y-%m-%d %H:%M"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_sets_query_with_caret_at_end() {
        assert_eq!(
            parse_command("/mai"),
            Some(vec![Event::SearchEdited { query: "mai".to_string(), caret: 3 }])
        );
        assert_eq!(
            parse_command("/"),
            Some(vec![Event::SearchEdited { query: String::new(), caret: 0 }])
        );
    }

    #[test]
    fn drag_expands_into_gesture_events() {
        let events = parse_command("drag 100 40").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], Event::DragBegan { x: 100.0, y: 0.0 });
        assert_eq!(events[2], Event::DragEnded { x: 40.0, y: 0.0 });

        let diagonal = parse_command("drag 0 10 -30").unwrap();
        assert_eq!(diagonal[1], Event::DragMoved { x: 10.0, y: -30.0 });
    }

    #[test]
    fn dead_worker_stops_waking_the_loop() {
        let (line_tx, lines) = unbounded::<String>();
        let (response_tx, mut responses) = unbounded::<WorkerResponse>();
        drop(response_tx);

        assert_eq!(next_input(&lines, &mut responses), Input::Idle);
        assert!(matches!(responses.try_recv(), Err(crossbeam_channel::TryRecvError::Empty)));

        line_tx.send("favs".to_string()).unwrap();
        assert_eq!(next_input(&lines, &mut responses), Input::Events(vec![Event::ShowFavorites]));
        line_tx.send("bogus".to_string()).unwrap();
        assert_eq!(next_input(&lines, &mut responses), Input::Unknown("bogus".to_string()));

        drop(line_tx);
        assert_eq!(next_input(&lines, &mut responses), Input::Events(vec![Event::Escape]));
    }

    #[test]
    fn numeric_commands_validate_arguments() {
        assert_eq!(parse_command("open 2"), Some(vec![Event::LaunchItem(2)]));
        assert_eq!(parse_command("open -1"), None);
        assert_eq!(parse_command("page x"), None);
        assert_eq!(
            parse_command("geometry 4 0"),
            Some(vec![Event::GeometryChanged { columns: 4, rows: 0 }])
        );
        assert!(matches!(
            parse_command("scroll 3.5 precise").as_deref(),
            Some([Event::Scroll(ScrollDelta { precise: true, .. })])
        ));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert_eq!(parse_command("launch everything"), None);
        assert_eq!(parse_command("   "), None);
    }
}
