//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority
//! order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/lintrc.toml` or `.lintrc.toml`
//! 3. `~/.lintrc/config.toml` (global fallback)
//! 4. No config found → the recommended preset

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.lintrc/`).
    Global(PathBuf),
    /// No config found; the built-in preset will be used.
    Preset,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Preset => None,
        }
    }

    /// Human-readable description for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(p) => format!("explicit config {}", p.display()),
            Self::Project(p) => format!("project config {}", p.display()),
            Self::Global(p) => format!("global config {}", p.display()),
            Self::Preset => "built-in recommended preset".to_string(),
        }
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["lintrc.toml", ".lintrc.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag; trusted as-is, the caller
    //    surfaces a read error for a missing file.
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config
    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Preset
}

/// Returns the global config directory path.
///
/// Resolution: `$LINTRC_CONFIG_DIR` > `~/.lintrc/`
///
/// The env var override enables testing and custom CI setups.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("LINTRC_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".lintrc"))
}
