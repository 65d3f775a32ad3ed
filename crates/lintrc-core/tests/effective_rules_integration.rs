//! Integration test: configuration document → effective rule sets.
//!
//! Exercises the full TOML → DTO → domain model pipeline against a
//! document shaped like a real tool configuration, then checks the merge
//! guarantees per-file.

use lintrc_core::{loader, Configuration, RuleName, RuleSpec, Severity, SourceType};
use std::path::Path;

const DOCUMENT: &str = r#"
source_type = "script"
parser = "relaxed-parser"

[rules]
eqeqeq = ["error", "smart"]
quotes = ["error", "single", { avoidEscape = true }]
"no-debugger" = "error"
"no-unused-vars" = ["error", { args = "none" }]
"local-rules/no-unescaped-regexp-dot" = "error"

[globals]
internalBinding = false
instrumentCounter = false

[plugins]
names = ["markdown", "local-rules"]
nested_root = "tools/vendor/linter/deps"

[plugins.fallback]
"local-rules" = ["tools/vendor"]
"markdown" = ["tools/vendor", "tools/extra"]

# Module sources get module parsing.
[[overrides]]
files = ["*.mjs", "doc/api/esm.md", "test/es-module/test-loader.js"]
source_type = "module"

# Fixtures relax style rules and drop the plugin rule entirely.
[[overrides]]
files = ["test/fixtures/**"]
remove = ["local-rules/no-unescaped-regexp-dot"]

[overrides.rules]
quotes = "off"
"no-debugger" = "warn"

# A later block tightens fixtures under test/fixtures/strict again.
[[overrides]]
files = ["test/fixtures/strict/**"]

[overrides.rules]
quotes = ["error", "double"]
"#;

fn load() -> Configuration {
    loader::parse(DOCUMENT).expect("document should load")
}

fn rule(name: &str) -> RuleName {
    RuleName::new(name).expect("valid rule name")
}

#[test]
fn defaults_pass_through_for_unmatched_files() {
    let config = load();
    let effective = config.effective_rules(Path::new("lib/util.js"));

    // No block matched: the effective set is exactly the defaults.
    assert_eq!(effective.len(), config.defaults().len());
    for (name, spec) in config.defaults() {
        assert_eq!(effective.get(name), Some(spec));
    }
    assert_eq!(effective.source_type(), SourceType::Script);
}

#[test]
fn module_override_flips_parsing_mode_only() {
    let config = load();
    let effective = config.effective_rules(Path::new("lib/internal/loader.mjs"));

    assert_eq!(effective.source_type(), SourceType::Module);
    // Rules are untouched by that block.
    assert_eq!(effective.len(), config.defaults().len());
    assert!(effective.is_enabled(&rule("quotes")));
}

#[test]
fn exact_path_pattern_matches_single_file() {
    let config = load();
    assert_eq!(
        config
            .effective_rules(Path::new("doc/api/esm.md"))
            .source_type(),
        SourceType::Module
    );
    assert_eq!(
        config
            .effective_rules(Path::new("doc/api/fs.md"))
            .source_type(),
        SourceType::Script
    );
}

#[test]
fn fixture_override_relaxes_and_removes() {
    let config = load();
    let effective = config.effective_rules(Path::new("test/fixtures/sample.js"));

    // quotes off for matching files, error elsewhere.
    assert_eq!(
        effective.get(&rule("quotes")).map(RuleSpec::severity),
        Some(Severity::Off)
    );
    assert!(!effective.is_enabled(&rule("quotes")));
    assert_eq!(
        config
            .effective_rules(Path::new("lib/util.js"))
            .get(&rule("quotes"))
            .map(RuleSpec::severity),
        Some(Severity::Error)
    );

    // Severity change keeps the options of the new spec, not the base one.
    assert_eq!(
        effective.get(&rule("no-debugger")).map(RuleSpec::severity),
        Some(Severity::Warn)
    );

    // Removed key is gone, not off.
    assert!(effective
        .get(&rule("local-rules/no-unescaped-regexp-dot"))
        .is_none());
    assert_eq!(effective.len(), config.defaults().len() - 1);
}

#[test]
fn later_block_wins_when_both_match() {
    let config = load();
    let effective = config.effective_rules(Path::new("test/fixtures/strict/a.js"));

    // Both fixture blocks match; the later one re-enables quotes.
    let quotes = effective.get(&rule("quotes")).expect("quotes configured");
    assert_eq!(quotes.severity(), Severity::Error);
    assert_eq!(
        quotes.options().first(),
        Some(&toml::Value::String("double".into()))
    );
    // The earlier block's other effects still apply.
    assert_eq!(
        effective.get(&rule("no-debugger")).map(RuleSpec::severity),
        Some(Severity::Warn)
    );
}

#[test]
fn resolution_is_deterministic() {
    let config = load();
    for path in [
        "lib/util.js",
        "test/fixtures/sample.js",
        "test/fixtures/strict/a.js",
        "lib/loader.mjs",
    ] {
        let a = config.effective_rules(Path::new(path));
        let b = config.effective_rules(Path::new(path));
        assert_eq!(a, b, "effective_rules must be deterministic for {path}");
    }
}

#[test]
fn globals_and_plugins_survive_loading() {
    let config = load();
    assert_eq!(config.globals().len(), 2);
    assert_eq!(config.plugins(), &["markdown", "local-rules"]);
    assert_eq!(config.parser(), Some("relaxed-parser"));
    assert_eq!(config.fallbacks().len(), 2);
    assert_eq!(
        config.fallbacks().get("markdown").map(Vec::len),
        Some(2)
    );
}

#[test]
fn tuple_options_preserve_order_and_shape() {
    let config = load();
    let spec = config
        .defaults()
        .get(&rule("no-unused-vars"))
        .expect("configured");
    assert_eq!(spec.options().len(), 1);
    let table = spec.options()[0].as_table().expect("option table");
    assert_eq!(
        table.get("args").and_then(toml::Value::as_str),
        Some("none")
    );
}
