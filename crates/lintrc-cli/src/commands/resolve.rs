//! Resolve command: locate plugins through the fallback search.

use anyhow::Result;
use lintrc_core::{DirectoryLocator, PluginResolver, Provenance, ResolveError};
use std::path::{Path, PathBuf};

/// Runs the resolve command.
///
/// With a name, resolves just that module; otherwise resolves every
/// configured plugin plus the parser. A missing plugin is reported, not
/// fatal — whether that aborts a run is the engine's decision, and this
/// command only inspects.
pub fn run(name: Option<&str>, search_paths: &[PathBuf], config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(Path::new("."), config_path)?;
    let resolver = PluginResolver::from_config(DirectoryLocator, &config);

    let names: Vec<String> = match name {
        Some(single) => vec![single.to_string()],
        None => config
            .plugins()
            .iter()
            .cloned()
            .chain(config.parser().map(String::from))
            .collect(),
    };

    if names.is_empty() {
        println!("no plugins configured");
        return Ok(());
    }

    let mut missing = 0_usize;
    for module in &names {
        match resolver.resolve(module, search_paths, false) {
            Ok(resolution) => {
                let via = match &resolution.provenance {
                    Provenance::Host => "host".to_string(),
                    Provenance::Fallback(root) => format!("fallback {}", root.display()),
                    Provenance::Nested => "nested root".to_string(),
                };
                println!("{module}: {} (via {via})", resolution.location.display());
            }
            Err(ResolveError::NotFound { .. }) => {
                missing += 1;
                println!("{module}: not found");
            }
        }
    }

    if missing > 0 {
        tracing::warn!("{missing} module(s) could not be resolved");
    }
    Ok(())
}
