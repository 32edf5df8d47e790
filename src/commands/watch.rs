use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use notemirror::application::{WatchEvent, WatchOptions, WatchUseCase};

use super::{install_ctrlc, load_config, sync_options, Global};
use crate::cli::PathArgs;

pub fn cmd_watch(global: &Global, paths: &PathArgs, debounce_ms: Option<u64>) -> Result<()> {
    let loaded = load_config(global, Some(paths))?;
    let options = sync_options(&loaded.config)?;
    let debounce = Duration::from_millis(debounce_ms.unwrap_or(loaded.config.watch.debounce_ms));

    let watch_options = WatchOptions::new(options)
        .with_debounce(debounce)
        .with_json(global.json);
    let running = install_ctrlc()?;
    let json = global.json;

    let status = WatchUseCase::new(watch_options).start(running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            print_event(&event);
        }
    })?;

    if let Some(error) = status.last_error {
        tracing::warn!(%error, "last run before shutdown failed");
    }
    Ok(())
}

fn print_event(event: &WatchEvent) {
    let now = Local::now().format("%H:%M:%S");
    match event {
        WatchEvent::WatchStarted {
            source,
            destination,
        } => {
            println!("Watching {} -> {}", source, destination);
            println!("Press Ctrl+C to stop.");
        }
        WatchEvent::FileChanged { path } => println!("[{}] changed {}", now, path),
        WatchEvent::SyncStarted => {}
        WatchEvent::SyncComplete {
            written,
            deleted,
            unchanged,
        } => println!(
            "[{}] synced: {} written, {} deleted, {} unchanged",
            now, written, deleted, unchanged
        ),
        WatchEvent::Error { message } => eprintln!("[{}] error: {}", now, message),
        WatchEvent::Shutdown => println!("Stopped."),
    }
}
