//! notemirror CLI
//!
//! Usage: notemirror [--json] [-v...] [--config FILE] <COMMAND>
//!
//! Commands:
//!   sync      Run the mirror once
//!   watch     Mirror continuously as the source changes
//!   schedule  Mirror once a day at a fixed local time
//!   publish   Mirror once, then run the publish command
//!   pick      Choose source/destination directories

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "notemirror=info",
        2 => "notemirror=debug",
        _ => "notemirror=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = commands::Global {
        json: cli.json,
        config: cli.config,
    };

    match cli.command {
        Commands::Sync { paths, dry_run } => commands::sync::cmd_sync(&global, &paths, dry_run),
        Commands::Watch { paths, debounce_ms } => {
            commands::watch::cmd_watch(&global, &paths, debounce_ms)
        }
        Commands::Schedule { paths, at, publish } => {
            commands::schedule::cmd_schedule(&global, &paths, at.as_deref(), publish)
        }
        Commands::Publish { paths } => commands::publish::cmd_publish(&global, &paths),
        Commands::Pick {
            source_only,
            dest_only,
        } => commands::pick::cmd_pick(&global, source_only, dest_only),
    }
}
