//! Watch Use Case implementation

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::status::RunStatus;
use crate::application::sync::run_sync;
use crate::domain::value_objects::ContentHash;
use crate::error::{MirrorError, MirrorResult};

use super::event::{WatchEvent, WatchOptions, WatcherState};

/// Watch Use Case
///
/// Runs the engine once, then again after every debounced burst of
/// relevant source changes. Entry point of `notemirror watch`.
pub struct WatchUseCase {
    options: WatchOptions,
}

impl WatchUseCase {
    pub fn new(mut options: WatchOptions) -> Self {
        // notify reports canonical paths on some platforms
        if let Ok(source) = std::fs::canonicalize(&options.sync.source) {
            options.sync.source = source;
        }
        Self { options }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching (blocking)
    ///
    /// Returns when `running` is cleared. Failed runs are reported through
    /// `on_event` and watching continues; only watcher setup errors return.
    pub fn start<F>(&self, running: Arc<AtomicBool>, on_event: F) -> MirrorResult<RunStatus>
    where
        F: Fn(WatchEvent),
    {
        on_event(WatchEvent::WatchStarted {
            source: self.options.sync.source.display().to_string(),
            destination: self.options.sync.destination.display().to_string(),
        });

        let mut status = self.sync_once(RunStatus::new(), &on_event);

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
            },
            Config::default(),
        )
        .map_err(|e| MirrorError::Watch(e.to_string()))?;

        watcher
            .watch(&self.options.sync.source, RecursiveMode::Recursive)
            .map_err(|e| MirrorError::Watch(e.to_string()))?;

        let mut state = WatcherState::new(self.options.debounce);
        let mut content_hashes: HashMap<PathBuf, ContentHash> = HashMap::new();

        // notify may replay events for existing files right after registration;
        // no run starts in this window but real changes are still queued
        let cooldown_end = Instant::now() + Duration::from_millis(500);
        while Instant::now() < cooldown_end {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                self.observe(path, &mut state, &mut content_hashes);
            }
        }

        while running.load(Ordering::SeqCst) {
            if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
                self.observe(path, &mut state, &mut content_hashes);
            }

            if state.should_sync() {
                for path in state.take_changes() {
                    on_event(WatchEvent::FileChanged {
                        path: path.display().to_string(),
                    });
                }
                status = self.sync_once(status, &on_event);
            }
        }

        on_event(WatchEvent::Shutdown);
        Ok(status)
    }

    /// Queue `path` when it can affect the mirror and its content moved.
    pub(super) fn observe(
        &self,
        path: PathBuf,
        state: &mut WatcherState,
        content_hashes: &mut HashMap<PathBuf, ContentHash>,
    ) {
        if self.options.is_relevant(&path) && content_changed(content_hashes, &path) {
            state.add_change(path);
        }
    }

    /// One engine run. A rejected start leaves `status` as it was.
    pub(super) fn sync_once(&self, status: RunStatus, on_event: &impl Fn(WatchEvent)) -> RunStatus {
        let status = match status.clone().begin() {
            Ok(started) => started,
            Err(err) => {
                on_event(WatchEvent::Error {
                    message: err.to_string(),
                });
                return status;
            }
        };
        on_event(WatchEvent::SyncStarted);

        match run_sync(&self.options.sync) {
            Ok(outcome) => {
                on_event(WatchEvent::SyncComplete {
                    written: outcome.report.written.len(),
                    deleted: outcome.report.deleted.len(),
                    unchanged: outcome.report.unchanged,
                });
                status.finish_sync(Ok(&outcome.report))
            }
            Err(err) => {
                tracing::error!(error = %err, "sync failed, will retry on next change");
                on_event(WatchEvent::Error {
                    message: err.to_string(),
                });
                status.finish_sync(Err(&err))
            }
        }
    }
}

/// Filter editor auto-save noise: a path counts as changed when its bytes
/// differ from the last seen version, or when it cannot be read as a file.
pub(crate) fn content_changed(hashes: &mut HashMap<PathBuf, ContentHash>, path: &Path) -> bool {
    match std::fs::read(path) {
        Ok(bytes) => {
            let hash = ContentHash::from_bytes(&bytes);
            if hashes.get(path) == Some(&hash) {
                return false;
            }
            hashes.insert(path.to_path_buf(), hash);
            true
        }
        Err(_) => {
            // removed, renamed away, or a directory event
            hashes.remove(path);
            true
        }
    }
}
