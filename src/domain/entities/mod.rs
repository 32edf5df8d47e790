//! Domain Entities
//!
//! - `DocumentRecord` / `AssetRecord` - a publishable document and its resolved images
//! - `Snapshot` - desired destination state for one run
//! - `Manifest` - what the previous run materialized

mod document;
mod manifest;
mod snapshot;

pub use document::{AssetRecord, DocumentRecord};
pub use manifest::{Manifest, ManifestEntry};
pub use snapshot::Snapshot;
