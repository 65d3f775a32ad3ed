//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization. They are converted
//! to domain model types via the loader, which owns all validation beyond
//! document shape.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw TOML representation of a configuration document.
///
/// Unknown top-level keys are rejected at parse time; a typo in a section
/// name must fail the load, not silently configure nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigDto {
    /// Default parsing mode ("script" or "module").
    #[serde(default)]
    pub source_type: Option<String>,

    /// Parser module name, resolved like a plugin.
    #[serde(default)]
    pub parser: Option<String>,

    /// Default rule map.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleEntryDto>,

    /// Global symbols; `true` means writable.
    #[serde(default)]
    pub globals: BTreeMap<String, bool>,

    /// Plugin activation and fallback resolution table.
    #[serde(default)]
    pub plugins: PluginsDto,

    /// Path-scoped override blocks, in declaration order.
    #[serde(default)]
    pub overrides: Vec<OverrideDto>,
}

/// One rule entry: either a bare severity or `[severity, ...options]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleEntryDto {
    /// Bare severity string, e.g. `eqeqeq = "error"`.
    Severity(String),
    /// Severity plus ordered options, e.g. `quotes = ["error", "single"]`.
    Tuple(Vec<toml::Value>),
}

/// TOML representation of the `[plugins]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsDto {
    /// Plugin names this configuration activates.
    #[serde(default)]
    pub names: Vec<String>,

    /// Fallback allow-list: plugin name → ordered alternate roots.
    #[serde(default)]
    pub fallback: BTreeMap<String, Vec<String>>,

    /// Shared lowest-priority fallback root.
    #[serde(default)]
    pub nested_root: Option<String>,
}

/// TOML representation of one `[[overrides]]` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideDto {
    /// File patterns scoping the block.
    pub files: Vec<String>,

    /// Optional parsing-mode override.
    #[serde(default)]
    pub source_type: Option<String>,

    /// Rules deleted from the base set for matching files.
    #[serde(default)]
    pub remove: Vec<String>,

    /// Partial rule map applied for matching files.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleEntryDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_empty() {
        let dto: ConfigDto = toml::from_str("").unwrap();
        assert!(dto.rules.is_empty());
        assert!(dto.overrides.is_empty());
        assert!(dto.plugins.names.is_empty());
    }

    #[test]
    fn deserialize_full_document() {
        let dto: ConfigDto = toml::from_str(
            r#"
source_type = "script"
parser = "relaxed-parser"

[rules]
eqeqeq = ["error", "smart"]
"no-debugger" = "error"
"no-unused-vars" = ["error", { args = "none" }]

[globals]
internalBinding = false
helperOverride = true

[plugins]
names = ["markdown", "local-rules"]
nested_root = "tools/vendor/linter/deps"

[plugins.fallback]
"local-rules" = ["tools/vendor"]

[[overrides]]
files = ["*.mjs", "doc/api/esm.md"]
source_type = "module"

[[overrides]]
files = ["test/**"]
remove = ["no-debugger"]

[overrides.rules]
eqeqeq = "off"
"#,
        )
        .unwrap();

        assert_eq!(dto.rules.len(), 3);
        assert!(matches!(
            dto.rules.get("no-debugger"),
            Some(RuleEntryDto::Severity(s)) if s == "error"
        ));
        assert!(matches!(
            dto.rules.get("eqeqeq"),
            Some(RuleEntryDto::Tuple(items)) if items.len() == 2
        ));
        assert_eq!(dto.globals.len(), 2);
        assert_eq!(dto.globals.get("internalBinding"), Some(&false));
        assert_eq!(dto.plugins.names, vec!["markdown", "local-rules"]);
        assert_eq!(
            dto.plugins.fallback.get("local-rules"),
            Some(&vec!["tools/vendor".to_string()])
        );
        assert_eq!(dto.overrides.len(), 2);
        assert_eq!(dto.overrides[0].source_type.as_deref(), Some("module"));
        assert_eq!(dto.overrides[1].remove, vec!["no-debugger"]);
    }

    #[test]
    fn unknown_top_level_key_rejected() {
        let result: Result<ConfigDto, _> = toml::from_str("rulez = {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_override_key_rejected() {
        let result: Result<ConfigDto, _> = toml::from_str(
            r#"
[[overrides]]
files = ["*.mjs"]
parser_mode = "module"
"#,
        );
        assert!(result.is_err());
    }
}
