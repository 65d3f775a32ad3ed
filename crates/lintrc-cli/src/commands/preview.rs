//! Preview command: which files get a non-default rule set.

use anyhow::{Context, Result};
use lintrc_core::{Configuration, EffectiveRuleSet};
use std::path::Path;

/// Runs the preview command.
///
/// Walks the tree (gitignore-aware), resolves the effective rule set for
/// every file, and lists the files where some override block changed the
/// outcome relative to the defaults.
pub fn run(path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(path, config_path)?;

    let mut walked = 0_usize;
    let mut changed = 0_usize;

    for entry in ignore::WalkBuilder::new(path).build() {
        let entry = entry.context("walk failed")?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        walked += 1;

        let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
        let effective = config.effective_rules(relative);
        if effective.rules() == config.defaults() && effective.source_type() == config.source_type()
        {
            continue;
        }
        changed += 1;

        println!("{}", relative.display());
        describe_difference(&config, relative, &effective);
    }

    println!("\n{changed} of {walked} file(s) get a non-default rule set");
    Ok(())
}

fn describe_difference(config: &Configuration, relative: &Path, effective: &EffectiveRuleSet) {
    if effective.source_type() != config.source_type() {
        println!("  source type: {}", effective.source_type());
    }

    let mut rule_changes = 0_usize;
    for (name, spec) in effective.iter() {
        match config.defaults().get(name) {
            Some(base) if base == spec => {}
            Some(_) => {
                rule_changes += 1;
                println!("  {name}: {}", spec.severity());
            }
            None => {
                rule_changes += 1;
                println!("  {name}: {} (added)", spec.severity());
            }
        }
    }
    for name in config.defaults().keys() {
        if effective.get(name).is_none() {
            rule_changes += 1;
            println!("  {name}: removed");
        }
    }

    tracing::debug!(
        "{}: {} rule change(s) from {} matching block(s)",
        relative.display(),
        rule_changes,
        config
            .overrides()
            .iter()
            .filter(|block| block.matches(relative))
            .count()
    );
}
