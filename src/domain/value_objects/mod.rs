//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod hash;
mod ignore_patterns;
mod path;

pub use config_warning::ConfigWarning;
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns, IGNORE_FILE_NAME};
pub use path::{join_within, PathError, SafePath};
