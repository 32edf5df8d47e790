//! DirectoryPicker port - lets the user choose a directory
//!
//! Platform dialogs and terminal prompts implement this in infrastructure.

use std::path::PathBuf;

/// Capability to ask the user for a directory.
pub trait DirectoryPicker {
    /// Show `prompt` and return the chosen directory, or `None` if cancelled.
    fn pick_directory(&self, prompt: &str) -> Option<PathBuf>;
}
