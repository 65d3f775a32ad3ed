//! Subcommand implementations.

pub mod init;
pub mod output;
pub mod preview;
pub mod resolve;
pub mod show;
pub mod validate;

use anyhow::{Context, Result};
use lintrc_core::{loader, Configuration};
use std::path::Path;

use crate::config_resolver;

/// Loads the configuration for a project directory, honoring an explicit
/// `--config` path and falling back to the recommended preset.
pub fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<Configuration> {
    let source = config_resolver::resolve(project_dir, explicit);
    tracing::info!("using {}", source.describe());

    match source.path() {
        Some(p) => {
            loader::from_file(p).with_context(|| format!("failed to load config: {}", p.display()))
        }
        None => lintrc_presets::recommended().context("failed to load built-in preset"),
    }
}
