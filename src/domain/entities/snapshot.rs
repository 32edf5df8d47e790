//! Snapshot entity - the desired destination state for one run
//!
//! Never persisted; rebuilt from the source tree on every run.

use std::collections::{BTreeMap, BTreeSet};

use super::document::DocumentRecord;

/// Mapping from document relative path to its record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    documents: BTreeMap<String, DocumentRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document keyed by its relative path
    pub fn insert(&mut self, document: DocumentRecord) {
        self.documents.insert(document.rel_path.clone(), document);
    }

    pub fn get(&self, rel_path: &str) -> Option<&DocumentRecord> {
        self.documents.get(rel_path)
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.documents.contains_key(rel_path)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in path order
    pub fn documents(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.values()
    }

    /// Every destination asset path referenced by any document.
    ///
    /// This is the reference-count set: an asset may only be deleted when it
    /// is absent from here.
    pub fn referenced_assets(&self) -> BTreeSet<String> {
        self.documents
            .values()
            .flat_map(|d| d.asset_paths())
            .collect()
    }
}

impl FromIterator<DocumentRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = DocumentRecord>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for doc in iter {
            snapshot.insert(doc);
        }
        snapshot
    }
}
