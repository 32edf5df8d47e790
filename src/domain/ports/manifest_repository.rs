//! ManifestRepository port - abstraction for manifest persistence
//!
//! The domain only sees `Manifest`; the JSON encoding lives in infrastructure.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::Manifest;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Manifest persistence errors
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Manifest file exists but could not be read
    #[error("failed to read manifest {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    /// Manifest content is not a valid manifest document
    #[error("corrupt manifest {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },
    /// Manifest was written by an incompatible format version
    #[error("manifest format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    /// Manifest could not be written
    #[error("failed to write manifest {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

/// Abstract repository for the last-applied manifest
pub trait ManifestRepository {
    /// Load the manifest; an absent, malformed or foreign-version manifest
    /// yields an empty one. Read failures are returned.
    fn load_or_empty(&self, path: &Path) -> ManifestResult<Manifest> {
        match self.load(path) {
            Ok(manifest) => Ok(manifest),
            Err(err @ (ManifestError::Corrupt { .. } | ManifestError::VersionMismatch { .. })) => {
                tracing::warn!(%err, "ignoring unusable manifest, every document is treated as new");
                Ok(Manifest::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Load the manifest, reporting corruption. Absent file is an empty manifest.
    fn load(&self, path: &Path) -> ManifestResult<Manifest>;

    /// Replace the manifest on disk as a single atomic document.
    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()>;
}
