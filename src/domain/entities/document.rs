//! Document and asset records built fresh on every scan

use std::path::{Path, PathBuf};

use crate::domain::services::normalizer::dest_asset_path;

/// An embedded asset reference that was found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Reference exactly as it appeared in the document text
    pub reference: String,
    /// Base filename of the reference
    pub file_name: String,
    /// Filename used at the destination
    pub normalized_name: String,
    /// Absolute path of the source file
    pub source_path: PathBuf,
}

impl AssetRecord {
    /// Destination-relative path, e.g. `image/pic-1.png`
    pub fn dest_path(&self) -> String {
        dest_asset_path(&self.normalized_name)
    }
}

/// A publishable document in the current snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Root-relative path with `/` separators; the identity key
    pub rel_path: String,
    /// Raw text content
    pub content: String,
    /// Last modification time (ms since epoch)
    pub mtime_ms: i64,
    /// Distinct references in order of first appearance
    pub references: Vec<String>,
    /// References that resolved to a source file
    pub assets: Vec<AssetRecord>,
}

impl DocumentRecord {
    /// Directory of the document relative to the root (`""` for top level)
    pub fn rel_dir(&self) -> &str {
        self.rel_path
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or("")
    }

    /// Destination asset paths in order, without duplicates.
    ///
    /// Two references can normalize to the same destination name; only the
    /// first one counts.
    pub fn asset_paths(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.assets.len());
        for asset in &self.assets {
            let path = asset.dest_path();
            if !out.contains(&path) {
                out.push(path);
            }
        }
        out
    }

    /// References that could not be resolved
    pub fn dangling_references(&self) -> impl Iterator<Item = &str> {
        self.references
            .iter()
            .filter(|r| !self.assets.iter().any(|a| &a.reference == *r))
            .map(|r| r.as_str())
    }

    /// Path of this document below `root`
    pub fn dest_path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.rel_path)
    }
}
