//! End-to-end catalog discovery over scratch directory trees.

use gridlaunch::app::{handle_event, Action, AppState, Event, Geometry, NavKey};
use gridlaunch::catalog::{discover, BundleIconResolver, CatalogStore, NoIcons, PublishOutcome};
use gridlaunch::favorites::{FavoritesRegistry, FAVORITES_KEY};
use gridlaunch::storage::{JsonStorage, KeyValueStore, MemoryStorage};
use gridlaunch::worker::{ScanWorker, WorkerMessage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct Tree {
    _dir: TempDir,
    root: PathBuf,
}

impl Tree {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        Self { _dir: dir, root }
    }

    fn bundle(&self, relative: &str) -> PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.join("Contents/Resources")).unwrap();
        path
    }
}

fn names(entries: &[gridlaunch::CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.display_name.as_str()).collect()
}

#[test]
fn overlapping_roots_collapse_to_first_root() {
    let tree = Tree::new();
    tree.bundle("system/Calculator.app");
    tree.bundle("system/Utilities/Terminal.app");
    tree.bundle("user/Zed.app");

    let roots = vec![
        tree.root.join("system"),
        tree.root.join("system/Utilities"),
        tree.root.join("user"),
        tree.root.join("does-not-exist"),
    ];
    let entries = discover(&roots, &NoIcons);

    assert_eq!(names(&entries), vec!["Calculator", "Terminal", "Zed"]);
    let terminal = entries.iter().find(|e| e.display_name == "Terminal").unwrap();
    assert_eq!(terminal.path, tree.root.join("system/Utilities/Terminal.app"));
}

#[test]
fn rescans_are_idempotent() {
    let tree = Tree::new();
    for name in ["beta.app", "Alpha.app", "gamma/Delta.app", ".hidden/Ghost.app"] {
        tree.bundle(name);
    }
    let roots = vec![tree.root.clone()];

    let first = discover(&roots, &NoIcons);
    let second = discover(&roots, &NoIcons);
    assert_eq!(first, second);
    assert_eq!(names(&first), vec!["Alpha", "beta", "Delta"]);
}

#[test]
fn bundle_icons_resolve_from_resources() {
    let tree = Tree::new();
    let with_icon = tree.bundle("Paint.app");
    fs::write(with_icon.join("Contents/Resources/Paint.icns"), b"icns").unwrap();
    tree.bundle("Plain.app");

    let entries = discover(&[tree.root.clone()], &BundleIconResolver);
    let paint = entries.iter().find(|e| e.display_name == "Paint").unwrap();
    let plain = entries.iter().find(|e| e.display_name == "Plain").unwrap();
    assert!(paint.icon.is_some());
    assert!(plain.icon.is_none());
}

#[test]
fn worker_scan_publishes_in_order_and_drops_stale_results() {
    let tree = Tree::new();
    tree.bundle("Mail.app");
    let roots = vec![tree.root.clone()];

    let mut store = CatalogStore::new();
    let mut worker = ScanWorker::spawn(Arc::new(NoIcons)).unwrap();

    let stale_seq = store.begin_refresh();
    let fresh_seq = store.begin_refresh();
    worker.post(WorkerMessage::scan(fresh_seq, roots.clone())).unwrap();
    worker.post(WorkerMessage::scan(stale_seq, roots)).unwrap();

    let mut outcomes = Vec::new();
    for _ in 0..2 {
        let response = worker.recv_timeout(Duration::from_secs(10)).unwrap();
        let gridlaunch::worker::WorkerResponse::CatalogScanned { seq, entries } = response;
        outcomes.push(store.publish(seq, entries));
    }
    worker.shutdown();

    assert_eq!(outcomes, vec![PublishOutcome::Installed, PublishOutcome::Stale]);
    assert_eq!(store.published_seq(), fresh_seq);
    assert_eq!(names(store.entries()), vec!["Mail"]);
}

#[test]
fn launcher_session_over_a_real_tree() {
    let tree = Tree::new();
    for i in 0..12 {
        tree.bundle(&format!("App{i:02}.app"));
    }

    let storage = JsonStorage::new(tree.root.join("state/favorites.json")).unwrap();
    let favorites = FavoritesRegistry::load(Box::new(storage));
    let mut state = AppState::new(vec![tree.root.clone()], Geometry::new(5, 1), favorites);
    let mut worker = ScanWorker::spawn(Arc::new(NoIcons)).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
    for action in actions {
        if let Action::PostToWorker(message) = action {
            worker.post(message).unwrap();
        }
    }
    let response = worker.recv_timeout(Duration::from_secs(10)).unwrap();
    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    worker.shutdown();

    assert_eq!(state.pager.page_count(), 3);
    handle_event(&mut state, &Event::Key(NavKey::PageUp)).unwrap();
    assert_eq!(state.pager.current_page(), 2);
    assert_eq!(state.current_page_entries().len(), 2);

    handle_event(&mut state, &Event::ToggleFavorite(1)).unwrap();
    let persisted = JsonStorage::new(tree.root.join("state/favorites.json"))
        .unwrap()
        .read_string_list(FAVORITES_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(persisted, vec![path_string(&tree.root.join("App11.app"))]);

    let (_, actions) = handle_event(&mut state, &Event::LaunchItem(0)).unwrap();
    assert_eq!(
        actions,
        vec![Action::Launch { path: tree.root.join("App10.app") }, Action::Close]
    );
}

#[test]
fn favorites_survive_a_restart() {
    let tree = Tree::new();
    let path = tree.root.join("favorites.json");

    {
        let mut favorites = FavoritesRegistry::load(Box::new(JsonStorage::new(path.clone()).unwrap()));
        favorites.toggle_favorite("/Applications/Notes.app");
        favorites.toggle_favorite("/Applications/Books.app");
        favorites.toggle_favorite("/Applications/Notes.app");
    }

    let reloaded = FavoritesRegistry::load(Box::new(JsonStorage::new(path).unwrap()));
    assert!(reloaded.is_favorite("/Applications/Books.app"));
    assert!(!reloaded.is_favorite("/Applications/Notes.app"));

    let empty = FavoritesRegistry::load(Box::new(MemoryStorage::new()));
    assert!(empty.is_empty());
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
