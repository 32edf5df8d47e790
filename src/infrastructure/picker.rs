//! Directory pickers
//!
//! `NativePicker` shells out to the platform's folder dialog; `TerminalPicker`
//! prompts on the terminal. `default_picker` prefers the native dialog and
//! falls back to the terminal when no dialog tool is available.

use std::path::PathBuf;
use std::process::Command;

use dialoguer::Input;

use crate::domain::ports::DirectoryPicker;

/// Folder dialog provided by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct NativePicker;

impl NativePicker {
    #[cfg(target_os = "macos")]
    fn command(prompt: &str) -> Command {
        let script = format!(
            "POSIX path of (choose folder with prompt \"{}\")",
            prompt.replace('"', "'")
        );
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(script);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn command(prompt: &str) -> Command {
        let script = format!(
            "Add-Type -AssemblyName System.Windows.Forms; \
             $d = New-Object System.Windows.Forms.FolderBrowserDialog; \
             $d.Description = '{}'; \
             if ($d.ShowDialog() -eq 'OK') {{ $d.SelectedPath }}",
            prompt.replace('\'', "''")
        );
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-Command", &script]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn command(prompt: &str) -> Command {
        let mut cmd = Command::new("zenity");
        cmd.args(["--file-selection", "--directory", "--title", prompt]);
        cmd
    }

    /// Run the dialog. `Err` means the dialog tool itself could not start.
    pub fn try_pick(&self, prompt: &str) -> std::io::Result<Option<PathBuf>> {
        let output = Self::command(prompt).output()?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(parse_dialog_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl DirectoryPicker for NativePicker {
    fn pick_directory(&self, prompt: &str) -> Option<PathBuf> {
        self.try_pick(prompt).ok().flatten()
    }
}

fn parse_dialog_output(stdout: &str) -> Option<PathBuf> {
    let line = stdout.lines().next()?.trim();
    (!line.is_empty()).then(|| PathBuf::from(line))
}

/// Plain terminal prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPicker;

impl DirectoryPicker for TerminalPicker {
    fn pick_directory(&self, prompt: &str) -> Option<PathBuf> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .ok()?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }
}

/// Native dialog first, terminal prompt if the dialog tool is missing
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackPicker {
    native: NativePicker,
    terminal: TerminalPicker,
}

impl DirectoryPicker for FallbackPicker {
    fn pick_directory(&self, prompt: &str) -> Option<PathBuf> {
        match self.native.try_pick(prompt) {
            Ok(choice) => choice,
            Err(err) => {
                tracing::debug!(%err, "native folder dialog unavailable, using terminal prompt");
                self.terminal.pick_directory(prompt)
            }
        }
    }
}

/// Picker used by the CLI
pub fn default_picker() -> Box<dyn DirectoryPicker> {
    Box::new(FallbackPicker::default())
}
