//! Validate command: load the configuration and report problems.

use anyhow::Result;
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};

/// Runs the validate command.
///
/// Exits non-zero on a configuration error, with the load error rendered
/// as a diagnostic.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let source = config_resolver::resolve(Path::new("."), config_path);

    let Some(path) = source.path() else {
        println!("no configuration file found; the built-in preset applies");
        return Ok(());
    };

    match lintrc_core::loader::from_file(path) {
        Ok(config) => {
            println!(
                "{} is valid: {} default rule(s), {} override block(s), {} plugin(s)",
                path.display(),
                config.defaults().len(),
                config.overrides().len(),
                config.plugins().len(),
            );
            if matches!(source, ConfigSource::Global(_)) {
                tracing::info!("validated the global configuration");
            }
            Ok(())
        }
        Err(error) => {
            // Render through miette for the fancy report format.
            eprintln!("{:?}", miette::Report::new(error));
            std::process::exit(1);
        }
    }
}
