//! Tests for the watch module

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;

use super::event::{WatchEvent, WatchOptions, WatcherState};
use super::use_case::{content_changed, WatchUseCase};
use crate::application::status::RunStatus;
use crate::application::sync::SyncOptions;
use crate::config::EnginePaths;

fn options(source: &Path) -> WatchOptions {
    WatchOptions::new(SyncOptions::new(EnginePaths {
        source: source.to_path_buf(),
        destination: PathBuf::from("/site/content"),
        manifest: PathBuf::from("/site/.notemirror/manifest.json"),
    }))
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        source: "/vault".to_string(),
        destination: "/site/content".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"source\":\"/vault\""));
    assert!(json.contains("\"command\":\"watch\""));
}

#[test]
fn test_watch_event_to_json_sync_complete() {
    let event = WatchEvent::SyncComplete {
        written: 5,
        deleted: 1,
        unchanged: 7,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"sync_complete\""));
    assert!(json.contains("\"written\":5"));
    assert!(json.contains("\"unchanged\":7"));
}

#[test]
fn test_watch_event_to_json_shutdown() {
    let json = WatchEvent::Shutdown.to_json();
    assert!(json.contains("\"event\":\"shutdown\""));
}

// === Relevance filter ===

#[test]
fn test_documents_and_images_are_relevant() {
    let opts = options(Path::new("/vault"));
    assert!(opts.is_relevant(Path::new("/vault/a.md")));
    assert!(opts.is_relevant(Path::new("/vault/notes/deep/B.MD")));
    assert!(opts.is_relevant(Path::new("/vault/image/pic 1.png")));
}

#[test]
fn test_irrelevant_paths_are_dropped() {
    let opts = options(Path::new("/vault"));
    assert!(!opts.is_relevant(Path::new("/vault/.obsidian/workspace.json")));
    assert!(!opts.is_relevant(Path::new("/vault/.trash/a.md")));
    assert!(!opts.is_relevant(Path::new("/vault/notes/pic.png")));
    assert!(!opts.is_relevant(Path::new("/vault/.trash/old-notes")));
    assert!(!opts.is_relevant(Path::new("/vault")));
    assert!(!opts.is_relevant(Path::new("/elsewhere/a.md")));
}

#[test]
fn test_directory_moves_are_relevant() {
    let opts = options(Path::new("/vault"));
    // renamed away: gone from disk, so only the missing extension says directory
    assert!(opts.is_relevant(Path::new("/vault/notes")));
    assert!(opts.is_relevant(Path::new("/vault/notes/archive")));
    assert!(opts.is_relevant(Path::new("/vault/image")));
}

#[test]
fn test_existing_dotted_directory_is_relevant() {
    let dir = tempdir().unwrap();
    let moved = dir.path().join("notes.2024");
    fs::create_dir_all(&moved).unwrap();
    let opts = options(dir.path());

    assert!(opts.is_relevant(&moved));
    assert!(!opts.is_relevant(&dir.path().join("notes.txt")));
}

#[test]
fn test_content_changed_reports_directories() {
    let dir = tempdir().unwrap();
    let moved = dir.path().join("notes");
    fs::create_dir_all(&moved).unwrap();
    let mut hashes = HashMap::new();

    assert!(content_changed(&mut hashes, &moved));
}

// === Debounce ===

#[test]
fn test_watcher_state_debounces() {
    let mut state = WatcherState::new(Duration::from_millis(30));
    assert!(!state.should_sync());

    state.add_change(PathBuf::from("/vault/b.md"));
    state.add_change(PathBuf::from("/vault/a.md"));
    state.add_change(PathBuf::from("/vault/a.md"));
    assert!(state.has_pending());
    assert!(!state.should_sync());

    std::thread::sleep(Duration::from_millis(40));
    assert!(state.should_sync());

    let changes = state.take_changes();
    assert_eq!(
        changes,
        vec![PathBuf::from("/vault/a.md"), PathBuf::from("/vault/b.md")]
    );
    assert!(!state.has_pending());
    assert!(!state.should_sync());
}

// === Content hash filter ===

#[test]
fn test_content_changed_ignores_identical_rewrites() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.md");
    let mut hashes = HashMap::new();

    fs::write(&file, "one").unwrap();
    assert!(content_changed(&mut hashes, &file));
    fs::write(&file, "one").unwrap();
    assert!(!content_changed(&mut hashes, &file));
    fs::write(&file, "two").unwrap();
    assert!(content_changed(&mut hashes, &file));
}

#[test]
fn test_content_changed_reports_removal() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.md");
    let mut hashes = HashMap::new();

    fs::write(&file, "one").unwrap();
    assert!(content_changed(&mut hashes, &file));
    fs::remove_file(&file).unwrap();
    assert!(content_changed(&mut hashes, &file));
    assert!(hashes.is_empty());
}

// === Overlapping runs ===

#[test]
fn test_rejected_run_keeps_previous_status() {
    let use_case = WatchUseCase::new(options(Path::new("/nonexistent/vault")));
    let running = RunStatus {
        in_flight: true,
        last_sync: Some(chrono::Local::now()),
        last_summary: Some("1 written".to_string()),
        ..RunStatus::default()
    };
    let events = RefCell::new(Vec::new());

    let after = use_case.sync_once(running.clone(), &|e| events.borrow_mut().push(e));

    assert_eq!(after, running);
    assert!(matches!(
        events.borrow().as_slice(),
        [WatchEvent::Error { .. }]
    ));
}

#[test]
fn test_observe_queues_relevant_changes_only() {
    let dir = tempdir().unwrap();
    let use_case = WatchUseCase::new(options(dir.path()));
    let source = use_case.options().sync.source.clone();
    fs::write(source.join("a.md"), "one").unwrap();
    fs::write(source.join("notes.txt"), "x").unwrap();
    let mut state = WatcherState::new(Duration::from_millis(0));
    let mut hashes = HashMap::new();

    use_case.observe(source.join("a.md"), &mut state, &mut hashes);
    use_case.observe(source.join("notes.txt"), &mut state, &mut hashes);
    use_case.observe(source.join(".obsidian"), &mut state, &mut hashes);

    assert_eq!(state.take_changes(), vec![source.join("a.md")]);

    // an unchanged replay is not queued again
    use_case.observe(source.join("a.md"), &mut state, &mut hashes);
    assert!(!state.has_pending());
}
