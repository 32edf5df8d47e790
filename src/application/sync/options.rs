//! Sync Options

use std::path::PathBuf;

use crate::config::{Config, EnginePaths};
use crate::error::MirrorResult;

/// Inputs of one engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Root of the note collection
    pub source: PathBuf,
    /// Content root of the static site
    pub destination: PathBuf,
    /// Manifest file written at the end of the run
    pub manifest: PathBuf,
    /// Shared images directory name below the source root
    pub images_dir: String,
    /// Plan only, touch nothing
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn new(paths: EnginePaths) -> Self {
        Self {
            source: paths.source,
            destination: paths.destination,
            manifest: paths.manifest,
            images_dir: "image".to_string(),
            dry_run: false,
        }
    }

    /// Options from a loaded config; fails when a required path is unset.
    pub fn from_config(config: &Config) -> MirrorResult<Self> {
        Ok(Self::new(config.engine_paths()?).with_images_dir(&config.source.images_dir))
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
