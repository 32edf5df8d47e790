//! Command handlers for the notemirror binary

pub mod pick;
pub mod publish;
pub mod schedule;
pub mod sync;
pub mod watch;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use notemirror::config::{self, Config, LoadedConfig};
use notemirror::{SyncOptions, SyncReport};

use crate::cli::PathArgs;

/// Flags shared by every command
#[derive(Debug, Clone)]
pub struct Global {
    pub json: bool,
    pub config: Option<PathBuf>,
}

/// Load config (printing unknown-key warnings) and apply CLI path overrides.
pub fn load_config(global: &Global, paths: Option<&PathArgs>) -> Result<LoadedConfig> {
    let mut loaded = config::discover(global.config.as_deref()).context("loading config")?;
    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }

    if let Some(paths) = paths {
        apply_path_args(&mut loaded.config, paths);
    }
    Ok(loaded)
}

fn apply_path_args(config: &mut Config, paths: &PathArgs) {
    if let Some(source) = &paths.source {
        config.paths.source = Some(source.clone());
    }
    if let Some(dest) = &paths.dest {
        config.paths.destination = Some(dest.clone());
    }
    if let Some(manifest) = &paths.manifest {
        config.paths.manifest = Some(manifest.clone());
    }
}

/// Engine options for a command, from config plus CLI overrides.
pub fn sync_options(config: &Config) -> Result<SyncOptions> {
    Ok(SyncOptions::from_config(config)?)
}

/// Ctrl+C clears the returned flag.
pub fn install_ctrlc() -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl+C handler")?;
    Ok(running)
}

/// Human-readable report lines
pub fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "would " } else { "" };
    for path in &report.written {
        println!("  {}write   {}", prefix, path);
    }
    for path in &report.deleted {
        println!("  {}delete  {}", prefix, path);
    }
    for asset in &report.assets_copied {
        println!("  {}copy    {}", prefix, asset);
    }
    for asset in &report.assets_deleted {
        println!("  {}remove  {}", prefix, asset);
    }
    for dangling in &report.dangling {
        eprintln!(
            "warning: {}: unresolved image '{}'",
            dangling.document, dangling.reference
        );
    }
    println!("{}", report.summary());
}

/// Report as one JSON line with a "command" field
pub fn report_json(command: &str, report: &SyncReport) -> String {
    let mut value = serde_json::to_value(report).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("command".to_string(), serde_json::json!(command));
    }
    serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
}
