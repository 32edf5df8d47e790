//! Sync Use Case
//!
//! One engine run:
//! 1. Load the previous manifest (absent or corrupt means empty, unreadable aborts)
//! 2. Build the snapshot from the source tree
//! 3. Plan the diff
//! 4. Apply it to the destination (skipped for a dry run)
//! 5. Persist the new manifest
//!
//! The use case holds no state between runs. Callers serialize runs; see
//! `run_sync` for the lock-taking entry point.

use crate::domain::entities::{Manifest, ManifestEntry, Snapshot};
use crate::domain::ports::{FileSystem, ManifestRepository};
use crate::domain::services::{Planner, SyncPlan};
use crate::domain::value_objects::IgnorePatterns;
use crate::error::{MirrorError, MirrorResult};
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::{JsonManifestRepository, RunLock};

use super::options::SyncOptions;
use super::reconcile::Reconciler;
use super::result::{dangling_in, SyncReport};
use super::snapshot::SnapshotBuilder;

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub plan: SyncPlan,
    pub report: SyncReport,
    /// Manifest as persisted (or as it would be, for a dry run)
    pub manifest: Manifest,
}

/// Sync use case parameterized by its ports
pub struct SyncUseCase<MR, FS>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    manifest_repo: MR,
    file_system: FS,
}

impl<MR, FS> SyncUseCase<MR, FS>
where
    MR: ManifestRepository,
    FS: FileSystem,
{
    pub fn new(manifest_repo: MR, file_system: FS) -> Self {
        Self {
            manifest_repo,
            file_system,
        }
    }

    pub fn file_system(&self) -> &FS {
        &self.file_system
    }

    /// Run the engine once.
    pub fn execute(&self, options: &SyncOptions) -> MirrorResult<SyncOutcome> {
        let previous = self.manifest_repo.load_or_empty(&options.manifest)?;

        let ignore = IgnorePatterns::load(&options.source)
            .map_err(|e| MirrorError::Ignore(e.to_string()))?;
        let snapshot = SnapshotBuilder::new(&self.file_system, &options.source, &options.images_dir)
            .with_ignore(ignore)
            .build()?;

        let plan = Planner::plan(&snapshot, &previous);
        for ignored in &plan.ignored {
            tracing::warn!(entry = %ignored.rel_path, reason = %ignored.reason, "ignoring manifest entry");
        }

        if options.dry_run {
            let (manifest, report) = Self::preview(&plan, &snapshot, &previous);
            return Ok(SyncOutcome {
                plan,
                report,
                manifest,
            });
        }

        let (manifest, report) =
            Reconciler::new(&self.file_system, &options.destination).apply(&plan, &snapshot, &previous)?;
        self.manifest_repo.save(&manifest, &options.manifest)?;

        tracing::info!(
            written = report.written.len(),
            deleted = report.deleted.len(),
            unchanged = report.unchanged,
            assets_copied = report.assets_copied.len(),
            assets_deleted = report.assets_deleted.len(),
            "sync complete"
        );

        Ok(SyncOutcome {
            plan,
            report,
            manifest,
        })
    }

    /// Report and manifest a plan would produce, without touching disk.
    fn preview(
        plan: &SyncPlan,
        snapshot: &Snapshot,
        previous: &Manifest,
    ) -> (Manifest, SyncReport) {
        let mut manifest = Manifest::new();
        let mut report = SyncReport {
            dry_run: true,
            unchanged: plan.unchanged_count(),
            ..SyncReport::default()
        };

        for rel_path in &plan.unchanged {
            if let Some(entry) = previous.get(rel_path) {
                manifest.set(rel_path.clone(), entry.clone());
            }
        }
        for delete in &plan.deletes {
            report.deleted.push(delete.rel_path.clone());
        }
        report.assets_deleted = plan.assets_to_remove().map(str::to_string).collect();

        for write in &plan.writes {
            let Some(doc) = snapshot.get(&write.rel_path) else {
                continue;
            };
            let asset_paths = doc.asset_paths();
            for path in &asset_paths {
                if !report.assets_copied.contains(path) {
                    report.assets_copied.push(path.clone());
                }
            }
            report.written.push(doc.rel_path.clone());
            manifest.set(
                doc.rel_path.clone(),
                ManifestEntry::new(doc.mtime_ms, asset_paths),
            );
        }

        report.dangling = dangling_in(snapshot);
        report.ignored_entries = plan.ignored.iter().map(|e| e.rel_path.clone()).collect();

        (manifest, report)
    }
}

/// Run the engine against the local disk, holding the run lock.
pub fn run_sync(options: &SyncOptions) -> MirrorResult<SyncOutcome> {
    let _lock = if options.dry_run {
        None
    } else {
        Some(RunLock::try_acquire(&options.manifest)?)
    };

    SyncUseCase::new(JsonManifestRepository::new(), LocalFs::new()).execute(options)
}
