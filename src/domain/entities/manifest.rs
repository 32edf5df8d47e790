//! Manifest entity - what the previous run materialized at the destination
//!
//! It's a pure data structure; I/O is handled by `ManifestRepository`.

use std::collections::BTreeMap;

/// Manifest entry for one materialized document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Source modification time at the last sync (ms since epoch)
    mtime_ms: i64,
    /// Destination-relative asset paths written for this document
    assets: Vec<String>,
}

impl ManifestEntry {
    pub fn new(mtime_ms: i64, assets: Vec<String>) -> Self {
        Self { mtime_ms, assets }
    }

    pub fn mtime_ms(&self) -> i64 {
        self.mtime_ms
    }

    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Same asset membership and count, ignoring order
    pub fn same_assets(&self, other: &[String]) -> bool {
        if self.assets.len() != other.len() {
            return false;
        }
        let mut mine: Vec<&String> = self.assets.iter().collect();
        let mut theirs: Vec<&String> = other.iter().collect();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

/// The manifest maps document relative paths to what was written for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Format version
    version: u32,
    /// Map of relative document path to entry
    entries: BTreeMap<String, ManifestEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

impl Manifest {
    /// Current on-disk format version
    pub const VERSION: u32 = 1;

    /// Create a new empty manifest
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            entries: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, rel_path: &str) -> Option<&ManifestEntry> {
        self.entries.get(rel_path)
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.entries.contains_key(rel_path)
    }

    pub fn set(&mut self, rel_path: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(rel_path.into(), entry);
    }

    pub fn remove(&mut self, rel_path: &str) -> Option<ManifestEntry> {
        self.entries.remove(rel_path)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_manifest_is_empty_current_version() {
        let manifest = Manifest::new();
        assert!(manifest.is_empty());
        assert_eq!(manifest.version(), Manifest::VERSION);
    }

    #[test]
    fn set_get_remove() {
        let mut manifest = Manifest::new();
        manifest.set("notes/a.md", ManifestEntry::new(10, vec!["image/x.png".into()]));

        assert!(manifest.contains("notes/a.md"));
        assert_eq!(manifest.get("notes/a.md").unwrap().mtime_ms(), 10);
        assert_eq!(manifest.len(), 1);

        let removed = manifest.remove("notes/a.md").unwrap();
        assert_eq!(removed.assets(), ["image/x.png".to_string()]);
        assert!(manifest.is_empty());
    }

    #[test]
    fn same_assets_ignores_order_but_not_count() {
        let entry = ManifestEntry::new(0, vec!["image/a.png".into(), "image/b.png".into()]);
        assert!(entry.same_assets(&["image/b.png".into(), "image/a.png".into()]));
        assert!(!entry.same_assets(&["image/a.png".into()]));
        assert!(!entry.same_assets(&[
            "image/a.png".into(),
            "image/b.png".into(),
            "image/b.png".into()
        ]));
    }
}
