use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// notemirror - mirror publishable notes into a static-site content tree
#[derive(Parser, Debug)]
#[command(name = "notemirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events / JSON reports on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./notemirror.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Path overrides shared by every engine command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PathArgs {
    /// Root of the note collection
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Content root of the static site
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Manifest file (default: <dest>/../.notemirror/manifest.json)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the mirror once
    Sync {
        #[command(flatten)]
        paths: PathArgs,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Mirror continuously as the source changes
    Watch {
        #[command(flatten)]
        paths: PathArgs,

        /// Quiet period before a burst of changes triggers a run
        #[arg(long)]
        debounce_ms: Option<u64>,
    },

    /// Mirror once a day at a fixed local time
    Schedule {
        #[command(flatten)]
        paths: PathArgs,

        /// Time of day, HH:MM (default from config, else 03:00)
        #[arg(long)]
        at: Option<String>,

        /// Run the publish command after each scheduled sync
        #[arg(long)]
        publish: bool,
    },

    /// Mirror once, then run the configured publish command
    Publish {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Choose source and destination directories and save them to the config
    Pick {
        /// Only choose the source directory
        #[arg(long, conflicts_with = "dest_only")]
        source_only: bool,

        /// Only choose the destination directory
        #[arg(long)]
        dest_only: bool,
    },
}
