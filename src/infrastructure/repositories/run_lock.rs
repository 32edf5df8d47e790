//! Cross-process run lock
//!
//! One engine run per manifest at a time. The lock is an exclusive advisory
//! lock on `<manifest>.lock`, released when the guard drops.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{MirrorError, MirrorResult};

/// Held while a run owns the manifest
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Lock file path for a manifest
    pub fn lock_path(manifest_path: &Path) -> PathBuf {
        let mut name = manifest_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        manifest_path.with_file_name(name)
    }

    /// Try to take the lock without blocking.
    pub fn try_acquire(manifest_path: &Path) -> MirrorResult<Self> {
        let path = Self::lock_path(manifest_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        if file.try_lock_exclusive().is_err() {
            return Err(MirrorError::Busy {
                holder: format!("lock held on {}", path.display()),
            });
        }
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
