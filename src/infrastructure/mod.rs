//! Infrastructure Layer
//!
//! Concrete implementations of domain ports. All real I/O lives here.
//!
//! - `fs/` - Local file system, user directories
//! - `repositories/` - Manifest persistence, run lock
//! - `picker` - Platform directory pickers

pub mod fs;
pub mod picker;
pub mod repositories;

pub use fs::LocalFs;
pub use picker::{default_picker, FallbackPicker, NativePicker, TerminalPicker};
pub use repositories::{JsonManifestRepository, RunLock};
