//! Init command: write a starter configuration file.

use anyhow::{bail, Context, Result};
use lintrc_presets::Preset;
use std::path::Path;

const CONFIG_NAME: &str = "lintrc.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let target = Path::new(CONFIG_NAME);

    if target.exists() && !force {
        bail!("{CONFIG_NAME} already exists (use --force to overwrite)");
    }

    std::fs::write(target, Preset::Minimal.document())
        .with_context(|| format!("failed to write {CONFIG_NAME}"))?;

    println!("wrote {CONFIG_NAME}");
    println!("run `lintrc show <file>` to inspect the effective rule set");
    Ok(())
}
