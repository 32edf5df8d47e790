//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod manifest;
mod run_lock;

pub use manifest::{to_json_string, JsonManifestRepository};
pub use run_lock::RunLock;
