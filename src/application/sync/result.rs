//! Sync Result
//!
//! What one engine run did (or, for a dry run, would do).

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::Snapshot;

/// An embed whose target could not be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub document: String,
    pub reference: String,
}

/// Every unresolved reference in `snapshot`, by document
pub(crate) fn dangling_in(snapshot: &Snapshot) -> Vec<DanglingReference> {
    snapshot
        .documents()
        .flat_map(|doc| {
            doc.dangling_references().map(|reference| DanglingReference {
                document: doc.rel_path.clone(),
                reference: reference.to_string(),
            })
        })
        .collect()
}

/// Result of a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Documents written to the destination
    pub written: Vec<String>,
    /// Documents removed from the destination
    pub deleted: Vec<String>,
    /// Documents carried forward without I/O
    pub unchanged: usize,
    /// Destination asset paths copied
    pub assets_copied: Vec<String>,
    /// Destination asset paths removed
    pub assets_deleted: Vec<String>,
    /// Empty destination directories removed
    pub dirs_removed: Vec<PathBuf>,
    pub dangling: Vec<DanglingReference>,
    /// Manifest entries that were unsafe to act on
    pub ignored_entries: Vec<String>,
    pub dry_run: bool,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_changes(&self) -> bool {
        !self.written.is_empty()
            || !self.deleted.is_empty()
            || !self.assets_copied.is_empty()
            || !self.assets_deleted.is_empty()
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "would write" } else { "wrote" };
        format!(
            "{} {} document(s), deleted {}, {} unchanged; assets: {} copied, {} deleted",
            verb,
            self.written.len(),
            self.deleted.len(),
            self.unchanged,
            self.assets_copied.len(),
            self.assets_deleted.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_has_no_changes() {
        let report = SyncReport::new();
        assert!(!report.has_changes());
        assert_eq!(
            report.summary(),
            "wrote 0 document(s), deleted 0, 0 unchanged; assets: 0 copied, 0 deleted"
        );
    }

    #[test]
    fn dry_run_summary_uses_conditional_verb() {
        let report = SyncReport {
            written: vec!["a.md".into()],
            dry_run: true,
            ..SyncReport::default()
        };
        assert!(report.has_changes());
        assert!(report.summary().starts_with("would write 1 document(s)"));
    }
}
