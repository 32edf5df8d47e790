//! Publish Use Case
//!
//! Sync, then hand the destination to an external build/deploy command.

use std::process::Command;

use crate::config::PublishConfig;
use crate::error::{MirrorError, MirrorResult};

use super::sync::{run_sync, SyncOptions, SyncOutcome};

/// Human-readable command line, for messages
pub fn command_line(publish: &PublishConfig) -> Option<String> {
    let command = publish.command.as_deref()?;
    let mut line = command.to_string();
    for arg in &publish.args {
        line.push(' ');
        line.push_str(arg);
    }
    Some(line)
}

/// Run the configured publish command, inheriting stdio.
pub fn run_publish_command(publish: &PublishConfig) -> MirrorResult<()> {
    let Some(program) = publish.command.as_deref() else {
        return Err(MirrorError::PublishNotConfigured);
    };
    let shown = command_line(publish).unwrap_or_else(|| program.to_string());

    let mut cmd = Command::new(program);
    cmd.args(&publish.args);
    if let Some(dir) = &publish.working_dir {
        cmd.current_dir(dir);
    }

    tracing::info!(command = %shown, "running publish command");
    let status = cmd.status()?;
    if !status.success() {
        return Err(MirrorError::PublishFailed {
            command: shown,
            code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

/// Sync, then publish. The command is checked before the sync starts.
pub fn publish(options: &SyncOptions, publish: &PublishConfig) -> MirrorResult<SyncOutcome> {
    if publish.command.is_none() {
        return Err(MirrorError::PublishNotConfigured);
    }
    let outcome = run_sync(options)?;
    run_publish_command(publish)?;
    Ok(outcome)
}
