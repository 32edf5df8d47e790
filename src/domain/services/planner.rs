//! Sync planning service
//!
//! Pure diff of the current `Snapshot` against the previous `Manifest`.
//! Decides which documents to delete, write or carry forward, and which
//! destination assets lose their last reference. No I/O happens here.

use std::collections::BTreeSet;

use crate::domain::entities::{Manifest, ManifestEntry, Snapshot};
use crate::domain::value_objects::SafePath;

/// Why a document needs to be (re)written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteReason {
    /// Not in the manifest
    New,
    /// Source modified after the last sync
    Updated,
    /// Same timestamp but the resolved asset set changed
    AssetsChanged,
}

/// A document that must be removed from the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDelete {
    pub rel_path: String,
    /// Assets that no remaining document references
    pub remove_assets: Vec<String>,
    /// Assets kept because another document still references them
    pub retained_assets: Vec<String>,
}

/// A document that must be written to the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    pub rel_path: String,
    pub reason: WriteReason,
    /// Assets the previous version used that nothing references any more
    pub stale_assets: Vec<String>,
}

/// A manifest entry that was not safe to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredEntry {
    pub rel_path: String,
    pub reason: String,
}

/// Result of planning a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub deletes: Vec<PlannedDelete>,
    pub writes: Vec<PlannedWrite>,
    /// Documents whose manifest entry carries forward unchanged
    pub unchanged: Vec<String>,
    pub ignored: Vec<IgnoredEntry>,
}

impl SyncPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying the plan would touch nothing
    pub fn is_noop(&self) -> bool {
        self.deletes.is_empty() && self.writes.is_empty()
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    pub fn unchanged_count(&self) -> usize {
        self.unchanged.len()
    }

    /// Every asset path scheduled for removal
    pub fn assets_to_remove(&self) -> impl Iterator<Item = &str> {
        self.deletes
            .iter()
            .flat_map(|d| d.remove_assets.iter())
            .chain(self.writes.iter().flat_map(|w| w.stale_assets.iter()))
            .map(|s| s.as_str())
    }
}

/// Pure planning service
pub struct Planner;

impl Planner {
    /// Decide whether a snapshot document needs writing.
    pub fn classify(
        mtime_ms: i64,
        asset_paths: &[String],
        previous: Option<&ManifestEntry>,
    ) -> Option<WriteReason> {
        match previous {
            None => Some(WriteReason::New),
            Some(entry) if entry.mtime_ms() < mtime_ms => Some(WriteReason::Updated),
            Some(entry) if !entry.same_assets(asset_paths) => Some(WriteReason::AssetsChanged),
            Some(_) => None,
        }
    }

    /// Diff `snapshot` against `manifest`.
    pub fn plan(snapshot: &Snapshot, manifest: &Manifest) -> SyncPlan {
        let referenced = snapshot.referenced_assets();
        let mut scheduled: BTreeSet<String> = BTreeSet::new();
        let mut plan = SyncPlan::new();

        for (rel_path, entry) in manifest.entries() {
            if snapshot.contains(rel_path) {
                continue;
            }
            if let Err(err) = SafePath::new(rel_path) {
                plan.ignored.push(IgnoredEntry {
                    rel_path: rel_path.to_string(),
                    reason: err.to_string(),
                });
                continue;
            }

            let mut delete = PlannedDelete {
                rel_path: rel_path.to_string(),
                remove_assets: Vec::new(),
                retained_assets: Vec::new(),
            };
            for asset in entry.assets() {
                if referenced.contains(asset) {
                    delete.retained_assets.push(asset.clone());
                } else if SafePath::new(asset).is_ok() && scheduled.insert(asset.clone()) {
                    delete.remove_assets.push(asset.clone());
                }
            }
            plan.deletes.push(delete);
        }

        for doc in snapshot.documents() {
            let asset_paths = doc.asset_paths();
            let previous = manifest.get(&doc.rel_path);

            match Self::classify(doc.mtime_ms, &asset_paths, previous) {
                None => plan.unchanged.push(doc.rel_path.clone()),
                Some(reason) => {
                    let stale_assets = previous
                        .map(|entry| {
                            entry
                                .assets()
                                .iter()
                                .filter(|a| !referenced.contains(*a))
                                .filter(|a| SafePath::new(a).is_ok())
                                .filter(|a| scheduled.insert((*a).clone()))
                                .cloned()
                                .collect()
                        })
                        .unwrap_or_default();
                    plan.writes.push(PlannedWrite {
                        rel_path: doc.rel_path.clone(),
                        reason,
                        stale_assets,
                    });
                }
            }
        }

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AssetRecord, DocumentRecord};
    use std::path::PathBuf;

    fn doc(rel: &str, mtime_ms: i64, images: &[&str]) -> DocumentRecord {
        DocumentRecord {
            rel_path: rel.to_string(),
            content: String::new(),
            mtime_ms,
            references: images.iter().map(|i| i.to_string()).collect(),
            assets: images
                .iter()
                .map(|i| AssetRecord {
                    reference: i.to_string(),
                    file_name: i.to_string(),
                    normalized_name: i.to_string(),
                    source_path: PathBuf::from("/vault/image").join(i),
                })
                .collect(),
        }
    }

    fn entry(mtime_ms: i64, images: &[&str]) -> ManifestEntry {
        ManifestEntry::new(
            mtime_ms,
            images.iter().map(|i| format!("image/{}", i)).collect(),
        )
    }

    #[test]
    fn classify_new_updated_changed_unchanged() {
        let assets = vec!["image/a.png".to_string()];
        assert_eq!(Planner::classify(5, &assets, None), Some(WriteReason::New));
        assert_eq!(
            Planner::classify(6, &assets, Some(&entry(5, &["a.png"]))),
            Some(WriteReason::Updated)
        );
        assert_eq!(
            Planner::classify(5, &assets, Some(&entry(5, &["b.png"]))),
            Some(WriteReason::AssetsChanged)
        );
        assert_eq!(Planner::classify(5, &assets, Some(&entry(5, &["a.png"]))), None);
    }

    #[test]
    fn older_snapshot_timestamp_is_not_an_update() {
        let assets: Vec<String> = vec![];
        assert_eq!(Planner::classify(4, &assets, Some(&entry(5, &[]))), None);
    }

    #[test]
    fn empty_manifest_writes_everything() {
        let snapshot: Snapshot = vec![doc("a.md", 1, &["pic-1.png"])].into_iter().collect();
        let plan = Planner::plan(&snapshot, &Manifest::new());

        assert_eq!(plan.write_count(), 1);
        assert_eq!(plan.writes[0].reason, WriteReason::New);
        assert!(plan.deletes.is_empty());
    }

    #[test]
    fn identical_state_is_noop() {
        let snapshot: Snapshot = vec![doc("a.md", 1, &["x.png"])].into_iter().collect();
        let mut manifest = Manifest::new();
        manifest.set("a.md", entry(1, &["x.png"]));

        let plan = Planner::plan(&snapshot, &manifest);
        assert!(plan.is_noop());
        assert_eq!(plan.unchanged, vec!["a.md".to_string()]);
    }

    #[test]
    fn shared_asset_survives_while_referenced() {
        let snapshot: Snapshot = vec![doc("b.md", 1, &["shared.png"])].into_iter().collect();
        let mut manifest = Manifest::new();
        manifest.set("a.md", entry(1, &["shared.png", "only-a.png"]));
        manifest.set("b.md", entry(1, &["shared.png"]));

        let plan = Planner::plan(&snapshot, &manifest);
        assert_eq!(plan.delete_count(), 1);
        let delete = &plan.deletes[0];
        assert_eq!(delete.rel_path, "a.md");
        assert_eq!(delete.remove_assets, vec!["image/only-a.png".to_string()]);
        assert_eq!(delete.retained_assets, vec!["image/shared.png".to_string()]);
    }

    #[test]
    fn shared_asset_removed_once_when_all_referrers_go() {
        let mut manifest = Manifest::new();
        manifest.set("a.md", entry(1, &["shared.png"]));
        manifest.set("b.md", entry(1, &["shared.png"]));

        let plan = Planner::plan(&Snapshot::new(), &manifest);
        assert_eq!(plan.delete_count(), 2);
        assert_eq!(plan.assets_to_remove().collect::<Vec<_>>(), vec!["image/shared.png"]);
    }

    #[test]
    fn updated_document_dropping_asset_marks_it_stale() {
        let snapshot: Snapshot = vec![doc("a.md", 2, &["new.png"])].into_iter().collect();
        let mut manifest = Manifest::new();
        manifest.set("a.md", entry(1, &["old.png", "new.png"]));

        let plan = Planner::plan(&snapshot, &manifest);
        assert_eq!(plan.writes[0].reason, WriteReason::Updated);
        assert_eq!(plan.writes[0].stale_assets, vec!["image/old.png".to_string()]);
    }

    #[test]
    fn unsafe_manifest_keys_are_ignored() {
        let mut manifest = Manifest::new();
        manifest.set("../escape.md", entry(1, &[]));
        manifest.set("ok.md", entry(1, &["../../etc/passwd"]));

        let plan = Planner::plan(&Snapshot::new(), &manifest);
        assert_eq!(plan.ignored.len(), 1);
        assert_eq!(plan.ignored[0].rel_path, "../escape.md");
        assert_eq!(plan.delete_count(), 1);
        assert!(plan.deletes[0].remove_assets.is_empty());
    }
}
