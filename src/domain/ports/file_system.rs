//! FileSystem port - abstraction over file I/O operations
//!
//! The snapshot builder, asset resolver and reconciler only touch disk through
//! this trait, so tests can wrap the local implementation (e.g. to count writes).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File or directory not found
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// File content is not valid UTF-8
    #[error("not valid UTF-8: {}", .0.display())]
    InvalidUtf8(PathBuf),
    /// Any other I/O failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an `io::Error` that happened while operating on `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::InvalidData => FsError::InvalidUtf8(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// A single directory listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl DirEntry {
    /// File name as UTF-8 (lossy)
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Abstract file system interface
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Copy a file, overwriting the destination
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Check if a regular file exists
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a directory exists
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a file
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory if it is empty. Returns `false` when it still has entries.
    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// List a directory, sorted by file name
    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Last modification time in milliseconds since the Unix epoch
    fn modified_ms(&self, path: &Path) -> FsResult<i64>;

    /// Absolute path with symlinks resolved
    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf>;
}
