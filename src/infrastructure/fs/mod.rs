//! File System Implementations
//!
//! Concrete implementations of the FileSystem port, plus user directory lookup.

mod home;
mod local;

pub use home::{user_config_dir, CONFIG_HOME_VAR};
pub use local::LocalFs;
