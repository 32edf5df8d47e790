//! Configuration module
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (NOTEMIRROR_*)
//! 3. `--config FILE`, else `./notemirror.toml`, else `<user config dir>/notemirror/config.toml`
//! 4. Built-in defaults

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    default_save_path, discover, discover_path, with_env_overrides, ConfigError, LoadedConfig,
    PROJECT_CONFIG_FILE, USER_CONFIG_FILE,
};
pub use types::{
    default_manifest_path, parse_time_of_day, Config, EnginePaths, PathsConfig, PublishConfig,
    ScheduleConfig, SourceConfig, WatchConfig,
};
