//! # lintrc-presets
//!
//! Built-in configuration presets for lintrc.
//!
//! Each preset is an embedded TOML document loaded through the core
//! loader, so presets go through exactly the same validation as a user's
//! own configuration file.
//!
//! ## Available Presets
//!
//! | Name | Description |
//! |------|-------------|
//! | `recommended` | Full correctness + style baseline, plugins, globals |
//! | `minimal` | Correctness rules only, for gradual adoption |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use lintrc_core::{loader, Configuration, LoadError};

const RECOMMENDED: &str = include_str!("../presets/recommended.toml");
const MINIMAL: &str = include_str!("../presets/minimal.toml");

/// Preset configurations for lintrc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Full correctness and style baseline with plugins and globals.
    Recommended,
    /// Correctness rules only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the preset's TOML document.
    #[must_use]
    pub fn document(self) -> &'static str {
        match self {
            Self::Recommended => RECOMMENDED,
            Self::Minimal => MINIMAL,
        }
    }

    /// Loads the preset into a validated [`Configuration`].
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document fails validation; this
    /// indicates a packaging bug, not user error.
    pub fn load(self) -> Result<Configuration, LoadError> {
        loader::parse(self.document())
    }
}

/// Loads the recommended preset.
///
/// # Errors
///
/// See [`Preset::load`].
pub fn recommended() -> Result<Configuration, LoadError> {
    Preset::Recommended.load()
}

/// Loads the minimal preset.
///
/// # Errors
///
/// See [`Preset::load`].
pub fn minimal() -> Result<Configuration, LoadError> {
    Preset::Minimal.load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrc_core::{RuleName, Severity, SourceType, SyntaxRestriction};
    use std::path::Path;

    #[test]
    fn recommended_loads() {
        let config = recommended().expect("recommended preset should load");
        assert!(config.defaults().len() > 100);
        assert_eq!(config.parser(), Some("relaxed-parser"));
        assert_eq!(config.plugins(), &["markdown", "local-rules"]);
        assert_eq!(config.source_type(), SourceType::Script);
    }

    #[test]
    fn minimal_loads() {
        let config = minimal().expect("minimal preset should load");
        assert_eq!(config.defaults().len(), 10);
        assert!(config.overrides().is_empty());
        assert!(config.plugins().is_empty());
    }

    #[test]
    fn recommended_module_override_applies() {
        let config = recommended().unwrap();
        assert_eq!(
            config
                .effective_rules(Path::new("lib/loader.mjs"))
                .source_type(),
            SourceType::Module
        );
        assert_eq!(
            config
                .effective_rules(Path::new("lib/loader.js"))
                .source_type(),
            SourceType::Script
        );
    }

    #[test]
    fn recommended_globals_are_read_only_except_harness() {
        let config = recommended().unwrap();
        let writable = config
            .globals()
            .values()
            .filter(|access| **access == lintrc_core::GlobalAccess::Writable)
            .count();
        assert_eq!(writable, 1);
        assert_eq!(config.globals().len(), 9);
    }

    #[test]
    fn recommended_restriction_options_compile() {
        let config = recommended().unwrap();
        let spec = config
            .defaults()
            .get(&RuleName::new("no-restricted-syntax").unwrap())
            .expect("restricted-syntax configured");
        assert_eq!(spec.severity(), Severity::Error);

        let set = SyntaxRestriction::from_options(spec.options())
            .expect("every shipped selector should compile");
        assert_eq!(set.restrictions().len(), 6);
    }

    #[test]
    fn recommended_fallback_table_covers_parser_and_plugins() {
        let config = recommended().unwrap();
        assert!(config.fallbacks().contains_key("markdown"));
        assert!(config.fallbacks().contains_key("local-rules"));
        assert!(config.fallbacks().contains_key("relaxed-parser"));
        assert!(config.nested_root().is_some());
    }
}
