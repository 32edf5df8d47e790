use anyhow::{bail, Context, Result};
use notemirror::config;
use notemirror::domain::ports::DirectoryPicker;
use notemirror::infrastructure::default_picker;

use super::{load_config, Global};

pub fn cmd_pick(global: &Global, source_only: bool, dest_only: bool) -> Result<()> {
    let mut loaded = load_config(global, None)?;
    let picker = default_picker();

    if !dest_only {
        let source = pick(picker.as_ref(), "Choose the notes folder to publish from")?;
        loaded.config.paths.source = Some(source);
    }
    if !source_only {
        let dest = pick(picker.as_ref(), "Choose the site content folder to publish into")?;
        loaded.config.paths.destination = Some(dest);
    }

    let target = loaded.file.unwrap_or_else(config::default_save_path);
    loaded
        .config
        .save(&target)
        .with_context(|| format!("saving {}", target.display()))?;

    if global.json {
        println!(
            "{}",
            serde_json::json!({
                "command": "pick",
                "config": target.display().to_string(),
                "source": loaded.config.paths.source,
                "destination": loaded.config.paths.destination,
            })
        );
    } else {
        println!("Saved to {}", target.display());
    }
    Ok(())
}

fn pick(picker: &dyn DirectoryPicker, prompt: &str) -> Result<std::path::PathBuf> {
    match picker.pick_directory(prompt) {
        Some(path) if path.is_dir() => Ok(path),
        Some(path) => bail!("not a directory: {}", path.display()),
        None => bail!("no directory chosen"),
    }
}
