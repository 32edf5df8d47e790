//! User config directory resolution with test isolation support.
//!
//! On Windows, `dirs::config_dir()` uses the system API rather than environment
//! variables, so tests cannot redirect it with `HOME`/`APPDATA`. Everything that
//! needs the user-level config directory goes through [`user_config_dir`],
//! which honours `NOTEMIRROR_CONFIG_HOME` first.

use std::path::PathBuf;

/// Environment variable that overrides the user config directory.
pub const CONFIG_HOME_VAR: &str = "NOTEMIRROR_CONFIG_HOME";

/// Directory holding the user-level `config.toml`.
///
/// `None` when neither the override is set nor the platform reports a config
/// directory.
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var(CONFIG_HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("notemirror")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dir_ends_with_app_name_when_no_override() {
        if std::env::var(CONFIG_HOME_VAR).is_ok() {
            return;
        }
        if let Some(dir) = user_config_dir() {
            assert!(dir.ends_with("notemirror"));
        }
    }
}
