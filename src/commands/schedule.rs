use anyhow::{Context, Result};
use notemirror::application::{ScheduleEvent, ScheduleOptions, ScheduleUseCase};
use notemirror::config::parse_time_of_day;

use super::{install_ctrlc, load_config, sync_options, Global};
use crate::cli::PathArgs;

pub fn cmd_schedule(global: &Global, paths: &PathArgs, at: Option<&str>, publish: bool) -> Result<()> {
    let loaded = load_config(global, Some(paths))?;
    let options = sync_options(&loaded.config)?;
    let at = match at {
        Some(value) => parse_time_of_day(value),
        None => loaded.config.schedule.time_of_day(),
    }
    .context("invalid schedule time")?;

    if publish && loaded.config.publish.command.is_none() {
        return Err(notemirror::MirrorError::PublishNotConfigured.into());
    }

    let schedule = ScheduleUseCase::new(ScheduleOptions {
        sync: options,
        at,
        publish: publish.then(|| loaded.config.publish.clone()),
    });
    let running = install_ctrlc()?;
    let json = global.json;

    schedule.start(running, |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }
        match event {
            ScheduleEvent::Scheduled { next_run } => println!("Next run at {}", next_run),
            ScheduleEvent::RunStarted => println!("Running..."),
            ScheduleEvent::RunComplete { summary } => println!("{}", summary),
            ScheduleEvent::Error { message } => eprintln!("error: {}", message),
            ScheduleEvent::Shutdown => println!("Stopped."),
        }
    })?;
    Ok(())
}
