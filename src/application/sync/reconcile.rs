//! Reconciler
//!
//! Applies a `SyncPlan` to the destination tree and computes the manifest
//! that describes the result. Deletes run first, then writes. A failure
//! aborts the run before the manifest is persisted, so the next run retries.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::{Manifest, ManifestEntry, Snapshot};
use crate::domain::ports::{FileSystem, FsResult};
use crate::domain::services::{rewrite_body, SyncPlan, DEST_IMAGE_DIR};
use crate::domain::value_objects::SafePath;
use crate::error::MirrorResult;

use super::result::{dangling_in, SyncReport};

/// Applies plans against one destination root
pub struct Reconciler<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    destination: &'a Path,
}

impl<'a, FS: FileSystem + ?Sized> Reconciler<'a, FS> {
    pub fn new(fs: &'a FS, destination: &'a Path) -> Self {
        Self { fs, destination }
    }

    /// Apply `plan` and return the new manifest plus what was done.
    pub fn apply(
        &self,
        plan: &SyncPlan,
        snapshot: &Snapshot,
        previous: &Manifest,
    ) -> MirrorResult<(Manifest, SyncReport)> {
        let mut report = SyncReport::new();

        self.apply_deletes(plan, &mut report)?;
        let manifest = self.apply_writes(plan, snapshot, previous, &mut report)?;

        report.unchanged = plan.unchanged_count();
        report.ignored_entries = plan.ignored.iter().map(|e| e.rel_path.clone()).collect();
        Ok((manifest, report))
    }

    fn apply_deletes(&self, plan: &SyncPlan, report: &mut SyncReport) -> MirrorResult<()> {
        let mut touched_dirs: BTreeSet<PathBuf> = BTreeSet::new();

        for delete in &plan.deletes {
            let Some(path) = self.dest_path(&delete.rel_path) else {
                continue;
            };
            if self.remove_if_present(&path)? {
                tracing::debug!(document = %delete.rel_path, "deleted");
            }
            report.deleted.push(delete.rel_path.clone());
            if let Some(parent) = path.parent() {
                touched_dirs.insert(parent.to_path_buf());
            }

            for asset in &delete.remove_assets {
                self.remove_asset(asset, report)?;
            }
            for asset in &delete.retained_assets {
                tracing::debug!(%asset, "asset still referenced, kept");
            }
        }

        // deepest first so parents see their children gone
        for dir in touched_dirs.iter().rev() {
            self.prune_empty_dirs(dir, report)?;
        }
        Ok(())
    }

    fn apply_writes(
        &self,
        plan: &SyncPlan,
        snapshot: &Snapshot,
        previous: &Manifest,
        report: &mut SyncReport,
    ) -> MirrorResult<Manifest> {
        let mut manifest = Manifest::new();
        for rel_path in &plan.unchanged {
            if let Some(entry) = previous.get(rel_path) {
                manifest.set(rel_path.clone(), entry.clone());
            }
        }

        let image_dir = self.destination.join(DEST_IMAGE_DIR);
        let mut copied: BTreeSet<String> = BTreeSet::new();

        for write in &plan.writes {
            let Some(doc) = snapshot.get(&write.rel_path) else {
                continue;
            };
            let Some(dest) = self.dest_path(&doc.rel_path) else {
                tracing::warn!(document = %doc.rel_path, "unsafe document path, skipping");
                continue;
            };

            if let Some(parent) = dest.parent() {
                self.fs.create_dir_all(parent)?;
            }
            if !doc.assets.is_empty() {
                self.fs.create_dir_all(&image_dir)?;
            }

            for asset in &doc.assets {
                let dest_rel = asset.dest_path();
                if !copied.insert(dest_rel.clone()) {
                    continue;
                }
                self.fs
                    .copy(&asset.source_path, &image_dir.join(&asset.normalized_name))?;
                tracing::debug!(asset = %dest_rel, source = %asset.source_path.display(), "copied");
                report.assets_copied.push(dest_rel);
            }

            self.fs.write(&dest, &rewrite_body(&doc.content, &doc.assets))?;
            tracing::debug!(document = %doc.rel_path, reason = ?write.reason, "written");
            report.written.push(doc.rel_path.clone());

            for asset in &write.stale_assets {
                self.remove_asset(asset, report)?;
            }

            manifest.set(
                doc.rel_path.clone(),
                ManifestEntry::new(doc.mtime_ms, doc.asset_paths()),
            );
        }

        report.dangling = dangling_in(snapshot);

        Ok(manifest)
    }

    fn dest_path(&self, rel_path: &str) -> Option<PathBuf> {
        SafePath::new(rel_path)
            .ok()
            .map(|p| p.under(self.destination))
    }

    fn remove_asset(&self, asset: &str, report: &mut SyncReport) -> MirrorResult<()> {
        let Some(path) = self.dest_path(asset) else {
            return Ok(());
        };
        if self.remove_if_present(&path)? {
            tracing::debug!(%asset, "asset deleted");
            report.assets_deleted.push(asset.to_string());
        }
        Ok(())
    }

    /// `Ok(false)` when the file was already gone.
    fn remove_if_present(&self, path: &Path) -> FsResult<bool> {
        match self.fs.remove(path) {
            Ok(()) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Remove `dir` and its ancestors while empty, stopping at the
    /// destination root and the destination image directory.
    fn prune_empty_dirs(&self, dir: &Path, report: &mut SyncReport) -> MirrorResult<()> {
        let image_dir = self.destination.join(DEST_IMAGE_DIR);
        let mut current = dir.to_path_buf();

        while current.starts_with(self.destination)
            && current != self.destination
            && current != image_dir
        {
            match self.fs.remove_dir_if_empty(&current) {
                Ok(true) => {
                    tracing::debug!(dir = %current.display(), "removed empty directory");
                    report.dirs_removed.push(current.clone());
                }
                Ok(false) => break,
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err.into()),
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }
        Ok(())
    }
}
