//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod directory_picker;
pub mod file_system;
pub mod manifest_repository;

pub use directory_picker::DirectoryPicker;
pub use file_system::{DirEntry, FileSystem, FsError, FsResult};
pub use manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
