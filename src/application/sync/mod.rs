//! Sync Use Case
//!
//! The reconciliation engine: scan the source tree into a `Snapshot`, diff
//! it against the previous `Manifest`, apply the resulting plan to the
//! destination and persist the new manifest.

mod options;
mod reconcile;
mod result;
mod snapshot;
mod use_case;


pub use options::SyncOptions;
pub use reconcile::Reconciler;
pub use result::{DanglingReference, SyncReport};
pub use snapshot::SnapshotBuilder;
pub use use_case::{run_sync, SyncOutcome, SyncUseCase};
