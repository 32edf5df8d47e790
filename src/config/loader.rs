//! Configuration loading and persistence

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ports::FileSystem;
use crate::infrastructure::fs::{user_config_dir, LocalFs};

use super::types::Config;
use super::ConfigWarning;

/// Project-local config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "notemirror.toml";

/// Config file name inside the user config directory
pub const USER_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },

    #[error("{key} is not set (pass it on the command line or in notemirror.toml)")]
    MissingPath { key: &'static str },

    #[error("failed to write config {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// A config plus where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// `None` when built-in defaults were used
    pub file: Option<PathBuf>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Relative paths under `[paths]` are resolved against the file's directory.
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        config.paths.rebase(base);
        if let Some(dir) = config.publish.working_dir.as_mut().filter(|d| d.is_relative()) {
            *dir = base.join(&*dir);
        }
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Config file that `discover` would read, if any exists.
pub fn discover_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = PathBuf::from(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Some(project);
    }

    user_config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|p| p.is_file())
}

/// Load from an explicit file, the project file, the user file, or defaults.
///
/// An explicit file must exist; discovered files that fail to parse are
/// errors too, so a typo never silently falls back to defaults.
pub fn discover(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = discover_path(explicit) else {
        return Ok(LoadedConfig {
            config: with_env_overrides(Config::default()),
            ..LoadedConfig::default()
        });
    };

    let (config, warnings) = load_with_warnings(&path)?;
    Ok(LoadedConfig {
        config: with_env_overrides(config),
        warnings,
        file: Some(path),
    })
}

/// Where `pick` saves chosen directories when no file was loaded
pub fn default_save_path() -> PathBuf {
    user_config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE))
}

/// Apply environment variable overrides (NOTEMIRROR_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Some(source) = env_path("NOTEMIRROR_SOURCE") {
        config.paths.source = Some(source);
    }

    if let Some(destination) = env_path("NOTEMIRROR_DESTINATION") {
        config.paths.destination = Some(destination);
    }

    if let Some(manifest) = env_path("NOTEMIRROR_MANIFEST") {
        config.paths.manifest = Some(manifest);
    }

    // NOTEMIRROR_DEBOUNCE_MS, ignored unless it parses
    if let Ok(value) = std::env::var("NOTEMIRROR_DEBOUNCE_MS") {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => tracing::warn!(%value, "ignoring NOTEMIRROR_DEBOUNCE_MS: not a number"),
        }
    }

    config
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Serialize and atomically replace `path`.
pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    LocalFs
        .write(path, &content)
        .map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "source",
        "destination",
        "manifest",
        "images_dir",
        "watch",
        "debounce_ms",
        "schedule",
        "daily_at",
        "publish",
        "command",
        "args",
        "working_dir",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0usize; b_chars.len() + 1];

    for (i, ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b_chars.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_chars.len()]
}
