//! Configuration type definitions

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::loader::{self, ConfigError};
use super::ConfigWarning;

/// Where the engine reads, writes and keeps its manifest
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PathsConfig {
    /// Root of the note collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Content root of the static site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    /// Manifest file; defaults next to the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl PathsConfig {
    /// Make relative paths relative to `base` (the config file's directory).
    pub(crate) fn rebase(&mut self, base: &Path) {
        for slot in [&mut self.source, &mut self.destination, &mut self.manifest] {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

/// Source tree conventions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Shared images directory at the source root
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            images_dir: default_images_dir(),
        }
    }
}

fn default_images_dir() -> String {
    "image".to_string()
}

/// Watch mode settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchConfig {
    /// Quiet period before a burst of changes triggers one run
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    2000
}

/// Daily scheduler settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Local time of day, `HH:MM`
    #[serde(default = "default_daily_at")]
    pub daily_at: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: default_daily_at(),
        }
    }
}

fn default_daily_at() -> String {
    "03:00".to_string()
}

impl ScheduleConfig {
    pub fn time_of_day(&self) -> Result<NaiveTime, ConfigError> {
        parse_time_of_day(&self.daily_at)
    }
}

/// Parse `HH:MM` (24h).
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| ConfigError::Invalid {
        key: "schedule.daily_at".to_string(),
        message: format!("expected HH:MM, got '{}'", value),
    })
}

/// External publish command run after a sync
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublishConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Fully resolved engine paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePaths {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub manifest: PathBuf,
}

/// Default manifest location for a destination root.
///
/// Lives beside the content root rather than inside it, so the site
/// generator never picks it up.
pub fn default_manifest_path(destination: &Path) -> PathBuf {
    let base = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => destination.to_path_buf(),
    };
    base.join(".notemirror").join("manifest.json")
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Apply `NOTEMIRROR_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Write the configuration back as TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        loader::save(self, path)
    }

    /// Source, destination and manifest paths, or an error naming what is missing.
    pub fn engine_paths(&self) -> Result<EnginePaths, ConfigError> {
        let source = self
            .paths
            .source
            .clone()
            .ok_or(ConfigError::MissingPath { key: "paths.source" })?;
        let destination = self
            .paths
            .destination
            .clone()
            .ok_or(ConfigError::MissingPath {
                key: "paths.destination",
            })?;
        let manifest = self
            .paths
            .manifest
            .clone()
            .unwrap_or_else(|| default_manifest_path(&destination));

        Ok(EnginePaths {
            source,
            destination,
            manifest,
        })
    }
}
