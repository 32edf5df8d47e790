//! notemirror - mirror publishable notes into a static-site content tree
//!
//! Scans a note collection, keeps the documents whose header marks them
//! publishable, copies the images they embed into one flat `image/`
//! directory and rewrites the embeds to match. A JSON manifest records what
//! each run materialized so the next run only touches what changed.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{run_sync, RunStatus, SyncOptions, SyncOutcome, SyncReport, SyncUseCase};
pub use config::{Config, ConfigWarning, EnginePaths};
pub use domain::entities::{Manifest, ManifestEntry, Snapshot};
pub use domain::ports::{FileSystem, ManifestRepository};
pub use domain::services::{is_publishable, normalize_file_name};
pub use error::{MirrorError, MirrorResult};
pub use infrastructure::fs::LocalFs;
pub use infrastructure::repositories::JsonManifestRepository;
