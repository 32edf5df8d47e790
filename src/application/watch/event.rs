//! Watch event types and options

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use crate::application::sync::SyncOptions;

/// Default quiet period in milliseconds
pub const DEBOUNCE_MS: u64 = 2000;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub sync: SyncOptions,
    /// Quiet period after the last change before a run starts
    pub debounce: Duration,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    pub fn new(sync: SyncOptions) -> Self {
        Self {
            sync,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            json: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Whether a changed path can affect the mirror: documents anywhere
    /// outside hidden directories, anything in the shared images directory,
    /// and directories, whose renames move every document below them.
    /// A removed path without an extension may have been a directory.
    pub fn is_relevant(&self, path: &Path) -> bool {
        let Ok(rel) = path.strip_prefix(&self.sync.source) else {
            return false;
        };
        if rel.as_os_str().is_empty() {
            return false;
        }

        let mut components = rel.components().peekable();
        let mut first = true;
        let mut in_images = false;
        while let Some(component) = components.next() {
            let Component::Normal(name) = component else {
                return false;
            };
            let name = name.to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            if first && components.peek().is_some() && name == self.sync.images_dir {
                in_images = true;
            }
            first = false;
        }

        match rel.extension().and_then(|e| e.to_str()) {
            Some(ext) => in_images || ext.eq_ignore_ascii_case("md") || path.is_dir(),
            None => true,
        }
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted { source: String, destination: String },
    /// File changed
    FileChanged { path: String },
    /// Sync started
    SyncStarted,
    /// Sync completed
    SyncComplete {
        written: usize,
        deleted: usize,
        unchanged: usize,
    },
    /// Error occurred; watching continues
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
    debounce: Duration,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl WatcherState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
            debounce,
        }
    }

    /// Add a file change to pending changes; restarts the quiet period
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_sync(&self) -> bool {
        match self.last_change {
            Some(last) => !self.pending_changes.is_empty() && last.elapsed() >= self.debounce,
            None => false,
        }
    }

    /// Take all pending changes (sorted), resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
