use anyhow::{Context, Result};
use notemirror::application::{command_line, publish};

use super::{load_config, print_report, report_json, sync_options, Global};
use crate::cli::PathArgs;

pub fn cmd_publish(global: &Global, paths: &PathArgs) -> Result<()> {
    let loaded = load_config(global, Some(paths))?;
    let options = sync_options(&loaded.config)?;
    let publish_config = &loaded.config.publish;

    if !global.json {
        if let Some(line) = command_line(publish_config) {
            println!("Publishing with: {}", line);
        }
    }

    let outcome = publish(&options, publish_config).context("publish failed")?;

    if global.json {
        println!("{}", report_json("publish", &outcome.report));
    } else {
        print_report(&outcome.report);
        println!("Published.");
    }
    Ok(())
}
