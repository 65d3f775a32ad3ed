//! Show command: the effective rule set for one file.

use anyhow::Result;
use std::path::Path;

use crate::OutputFormat;

/// Runs the show command.
pub fn run(
    file: &Path,
    root: &Path,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(root, config_path)?;

    // Patterns match project-relative paths; strip the root if the caller
    // passed a path that includes it.
    let relative = file.strip_prefix(root).unwrap_or(file);
    let effective = config.effective_rules(relative);

    tracing::debug!(
        "{}: {} rules, source type {}",
        relative.display(),
        effective.len(),
        effective.source_type()
    );

    super::output::print_effective(&effective, format)
}
