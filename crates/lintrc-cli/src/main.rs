//! lintrc CLI tool.
//!
//! Usage:
//! ```bash
//! lintrc show [OPTIONS] <FILE>
//! lintrc preview [PATH]
//! lintrc resolve [NAME]
//! lintrc validate
//! lintrc init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Inspect rule configurations: effective rule sets, overrides, and
/// plugin resolution
#[derive(Parser)]
#[command(name = "lintrc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective rule set for one file
    Show {
        /// File path, relative to the project root
        file: PathBuf,

        /// Project root the file path is relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List files whose effective rule set differs from the defaults
    Preview {
        /// Directory to walk (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Resolve plugin locations through the fallback search
    Resolve {
        /// Single plugin name (default: every configured plugin + parser)
        name: Option<String>,

        /// Host search path, may be repeated
        #[arg(long = "search-path")]
        search_paths: Vec<PathBuf>,
    },

    /// Load the configuration and report validation errors
    Validate,

    /// Initialize a configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for effective rule sets.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-rule compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Show { file, root, format } => {
            commands::show::run(&file, &root, format, cli.config.as_deref())
        }
        Commands::Preview { path } => commands::preview::run(&path, cli.config.as_deref()),
        Commands::Resolve { name, search_paths } => {
            commands::resolve::run(name.as_deref(), &search_paths, cli.config.as_deref())
        }
        Commands::Validate => commands::validate::run(cli.config.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
