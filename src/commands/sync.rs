use anyhow::{Context, Result};
use notemirror::run_sync;

use super::{load_config, print_report, report_json, sync_options, Global};
use crate::cli::PathArgs;

pub fn cmd_sync(global: &Global, paths: &PathArgs, dry_run: bool) -> Result<()> {
    let loaded = load_config(global, Some(paths))?;
    let options = sync_options(&loaded.config)?.with_dry_run(dry_run);

    let outcome = run_sync(&options).with_context(|| {
        format!(
            "mirroring {} -> {}",
            options.source.display(),
            options.destination.display()
        )
    })?;

    if global.json {
        println!("{}", report_json("sync", &outcome.report));
    } else {
        print_report(&outcome.report);
    }
    Ok(())
}
