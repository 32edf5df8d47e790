//! Error types for notemirror
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{FsError, ManifestError};

/// Result type alias for notemirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Main error type for engine and orchestration operations
#[derive(Error, Debug)]
pub enum MirrorError {
    /// File-system failure during scan, copy, write or delete
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Manifest could not be read or written
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Source root does not exist or is not a directory
    #[error("source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Ignore file could not be loaded
    #[error("invalid ignore file: {0}")]
    Ignore(String),

    /// Another run is already in flight for this source/destination pair
    #[error("a sync run is already in progress ({holder})")]
    Busy { holder: String },

    /// External publish command exited unsuccessfully
    #[error("publish command '{command}' failed with exit code {code}")]
    PublishFailed { command: String, code: i32 },

    /// External publish command is not configured
    #[error("no publish command configured (set [publish] command in notemirror.toml)")]
    PublishNotConfigured,

    /// File watcher could not be set up
    #[error("watcher error: {0}")]
    Watch(String),

    /// Plain IO error outside the file-system port
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
