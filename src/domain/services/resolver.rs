//! Asset resolver
//!
//! Locates the source file behind an embed reference. Lookup order, first hit
//! wins:
//! 1. exact base filename in the shared images directory
//! 2. the literal path relative to the document's directory
//! 3. normalized base filename in the shared images directory
//! 4. any file in the shared images directory whose normalized name matches,
//!    ignoring case
//!
//! Misses are dangling references and are simply dropped by the caller.

use std::path::{Path, PathBuf};

use super::normalizer::{base_name, normalize_file_name};
use crate::domain::entities::AssetRecord;
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::join_within;

/// Resolves references against one source tree
pub struct AssetResolver<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    source_root: &'a Path,
    images_dir: PathBuf,
}

impl<'a, FS: FileSystem + ?Sized> AssetResolver<'a, FS> {
    /// `images_dir_name` is the shared images directory below `source_root`.
    pub fn new(fs: &'a FS, source_root: &'a Path, images_dir_name: &str) -> Self {
        Self {
            fs,
            source_root,
            images_dir: source_root.join(images_dir_name),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Resolve one reference found in a document living in `doc_dir`
    /// (relative to the source root, `/`-separated, `""` for top level).
    pub fn resolve(&self, doc_dir: &str, reference: &str) -> Option<AssetRecord> {
        let file_name = base_name(reference);
        if file_name.is_empty() {
            return None;
        }
        let normalized_name = normalize_file_name(file_name);

        let source_path = self
            .in_images(file_name)
            .or_else(|| self.relative_to_document(doc_dir, reference))
            .or_else(|| self.in_images(&normalized_name))
            .or_else(|| self.scan_images(&normalized_name))?;

        Some(AssetRecord {
            reference: reference.to_string(),
            file_name: file_name.to_string(),
            normalized_name,
            source_path,
        })
    }

    fn in_images(&self, name: &str) -> Option<PathBuf> {
        let candidate = join_within(self.source_root, &self.images_dir, name)?;
        self.fs.is_file(&candidate).then_some(candidate)
    }

    fn relative_to_document(&self, doc_dir: &str, reference: &str) -> Option<PathBuf> {
        let base = if doc_dir.is_empty() {
            self.source_root.to_path_buf()
        } else {
            join_within(self.source_root, self.source_root, doc_dir)?
        };
        let candidate = join_within(self.source_root, &base, reference)?;
        self.fs.is_file(&candidate).then_some(candidate)
    }

    fn scan_images(&self, normalized_name: &str) -> Option<PathBuf> {
        let wanted = normalized_name.to_lowercase();
        let entries = self.fs.read_dir(&self.images_dir).ok()?;
        entries
            .into_iter()
            .filter(|e| !e.is_dir)
            .find(|e| normalize_file_name(&e.name()).to_lowercase() == wanted)
            .map(|e| e.path)
    }
}
