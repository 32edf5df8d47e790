//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{DirEntry, FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes go through a temp file in the target directory and are renamed
/// into place, so readers never see a half-written document or manifest.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::from_io(e, path))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let dir = parent_dir(path);
        fs::create_dir_all(dir).map_err(|e| FsError::from_io(e, dir))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(e, dir))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| FsError::from_io(e, path))?;
        tmp.persist(path)
            .map_err(|e| FsError::from_io(e.error, path))?;
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        if !from.is_file() {
            return Err(FsError::NotFound(from.to_path_buf()));
        }
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::from_io(e, to))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        fs::remove_file(path).map_err(|e| FsError::from_io(e, path))
    }

    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool> {
        let mut entries = fs::read_dir(path).map_err(|e| FsError::from_io(e, path))?;
        if entries.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(path).map_err(|e| FsError::from_io(e, path))?;
        Ok(true)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::from_io(e, path))
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::from_io(e, path))? {
            let entry = entry.map_err(|e| FsError::from_io(e, path))?;
            let file_type = entry
                .file_type()
                .map_err(|e| FsError::from_io(e, &entry.path()))?;
            // follow symlinks so a linked image directory still scans
            let is_dir = file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir());
            out.push(DirEntry {
                path: entry.path(),
                is_dir,
            });
        }
        out.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(out)
    }

    fn modified_ms(&self, path: &Path) -> FsResult<i64> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| FsError::from_io(e, path))?;
        Ok(match modified.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_millis() as i64,
            Err(before) => -(before.duration().as_millis() as i64),
        })
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        fs::canonicalize(path).map_err(|e| FsError::from_io(e, path))
    }
}
