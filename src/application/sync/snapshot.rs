//! Snapshot Builder
//!
//! Full rescan of the source tree into the desired destination state.
//! Hidden directories and the top-level shared images directory are not
//! descended into; images there are still reachable through the resolver.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::{DocumentRecord, Snapshot};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::services::{extract_references, is_publishable, AssetResolver};
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{MirrorError, MirrorResult};

/// Hard cap on directory nesting
const MAX_DEPTH: usize = 64;

/// Builds a `Snapshot` from one source tree
pub struct SnapshotBuilder<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    source_root: &'a Path,
    images_dir: &'a str,
    ignore: IgnorePatterns,
}

impl<'a, FS: FileSystem + ?Sized> SnapshotBuilder<'a, FS> {
    pub fn new(fs: &'a FS, source_root: &'a Path, images_dir: &'a str) -> Self {
        Self {
            fs,
            source_root,
            images_dir,
            ignore: IgnorePatterns::empty(),
        }
    }

    pub fn with_ignore(mut self, ignore: IgnorePatterns) -> Self {
        self.ignore = ignore;
        self
    }

    /// Scan the whole tree.
    pub fn build(&self) -> MirrorResult<Snapshot> {
        if !self.fs.is_dir(self.source_root) {
            return Err(MirrorError::SourceNotFound {
                path: self.source_root.to_path_buf(),
            });
        }

        let resolver = AssetResolver::new(self.fs, self.source_root, self.images_dir);
        let mut snapshot = Snapshot::new();
        let mut visited = HashSet::new();
        self.scan_dir(self.source_root, "", 0, &resolver, &mut visited, &mut snapshot)?;

        tracing::debug!(
            documents = snapshot.len(),
            source = %self.source_root.display(),
            "snapshot built"
        );
        Ok(snapshot)
    }

    fn scan_dir(
        &self,
        dir: &Path,
        rel_dir: &str,
        depth: usize,
        resolver: &AssetResolver<'_, FS>,
        visited: &mut HashSet<PathBuf>,
        snapshot: &mut Snapshot,
    ) -> MirrorResult<()> {
        if depth > MAX_DEPTH {
            tracing::warn!(dir = %dir.display(), "directory nesting too deep, skipping");
            return Ok(());
        }
        // symlinked directories may lead back to one already scanned
        if !visited.insert(self.fs.canonicalize(dir)?) {
            tracing::warn!(dir = %dir.display(), "directory already scanned through another path, skipping");
            return Ok(());
        }

        for entry in self.fs.read_dir(dir)? {
            let name = entry.name();
            let rel_path = if rel_dir.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", rel_dir, name)
            };

            if entry.is_dir {
                if self.skip_dir(&name, depth) || self.ignore.is_ignored(Path::new(&rel_path), true)
                {
                    continue;
                }
                self.scan_dir(&entry.path, &rel_path, depth + 1, resolver, visited, snapshot)?;
                continue;
            }

            if !is_document(&name) || self.ignore.is_ignored(Path::new(&rel_path), false) {
                continue;
            }

            if let Some(document) = self.load_document(&entry.path, rel_path, rel_dir, resolver)? {
                snapshot.insert(document);
            }
        }

        Ok(())
    }

    fn skip_dir(&self, name: &str, depth: usize) -> bool {
        name.starts_with('.') || (depth == 0 && name == self.images_dir)
    }

    fn load_document(
        &self,
        path: &Path,
        rel_path: String,
        rel_dir: &str,
        resolver: &AssetResolver<'_, FS>,
    ) -> MirrorResult<Option<DocumentRecord>> {
        let content = match self.fs.read(path) {
            Ok(content) => content,
            Err(FsError::InvalidUtf8(_)) => {
                tracing::warn!(document = %rel_path, "not valid UTF-8, skipping");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        if !is_publishable(&content) {
            return Ok(None);
        }

        let mtime_ms = self.fs.modified_ms(path)?;
        let references = extract_references(&content);
        let assets = references
            .iter()
            .filter_map(|reference| resolver.resolve(rel_dir, reference))
            .collect();

        let document = DocumentRecord {
            rel_path,
            content,
            mtime_ms,
            references,
            assets,
        };
        for reference in document.dangling_references() {
            tracing::warn!(document = %document.rel_path, %reference, "unresolved asset reference");
        }
        Ok(Some(document))
    }
}

/// `.md`, any case
fn is_document(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
