//! Pure domain model for rule configuration.
//!
//! This module contains no serde and no I/O. All invariants are enforced
//! at construction time via validated newtypes; a [`Configuration`] that
//! exists is a configuration that passed load-time validation.

use crate::types::{GlobalAccess, Severity, SourceType};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ────────────────────────────────────────────
// Newtypes with validation
// ────────────────────────────────────────────

/// A validated rule identifier.
///
/// Plain rules are `[a-z0-9-]` (`eqeqeq`, `no-unused-vars`); plugin rules
/// carry a single `plugin/` prefix (`local-rules/no-unescaped-regexp-dot`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleName(String);

impl RuleName {
    /// Creates a new rule name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty, has more than one `/`
    /// separator, or contains characters outside `[a-z0-9-]`.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyRuleName);
        }
        let mut segments = name.split('/');
        let valid = segments.clone().count() <= 2
            && segments.all(|seg| {
                !seg.is_empty()
                    && seg
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            });
        if !valid {
            return Err(ModelError::InvalidRuleName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the plugin prefix, if the rule belongs to one.
    #[must_use]
    pub fn plugin(&self) -> Option<&str> {
        self.0.split_once('/').map(|(plugin, _)| plugin)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated file-selection glob, compiled once at construction.
///
/// A pattern containing no `/` matches against the file name only
/// (`*.mjs` matches `lib/loader.mjs`); any other pattern matches against
/// the whole relative path with POSIX separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    raw: String,
    compiled: glob::Pattern,
    basename_only: bool,
}

impl FilePattern {
    /// Creates a new file pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or has invalid glob syntax.
    pub fn new(pattern: &str) -> Result<Self, ModelError> {
        if pattern.is_empty() {
            return Err(ModelError::EmptyFilePattern);
        }
        let compiled = glob::Pattern::new(pattern).map_err(|e| ModelError::InvalidFilePattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            raw: pattern.to_string(),
            compiled,
            basename_only: !pattern.contains('/'),
        })
    }

    /// Tests whether a relative file path matches this pattern.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        if self.basename_only {
            return path
                .file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|name| self.compiled.matches(&name));
        }

        let path_str = normalize(path);
        if self.compiled.matches(&path_str) {
            return true;
        }
        // `dir/**` should also cover everything below `dir` even when the
        // glob engine disagrees about the boundary; check prefix + separator.
        if let Some(prefix) = self.raw.strip_suffix("/**") {
            let normalized = prefix.trim_end_matches('/');
            if path_str.starts_with(normalized)
                && path_str
                    .as_bytes()
                    .get(normalized.len())
                    .is_some_and(|&b| b == b'/')
            {
                return true;
            }
        }
        false
    }

    /// Returns the pattern as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn normalize(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

// ────────────────────────────────────────────
// Domain entities
// ────────────────────────────────────────────

/// One configured rule: a severity plus opaque, rule-specific options.
///
/// Option values are carried verbatim; their shape is the rule's own
/// business and is never validated here.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSpec {
    severity: Severity,
    options: Vec<toml::Value>,
}

impl RuleSpec {
    /// Creates a rule spec with no options.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    /// Attaches ordered option values.
    #[must_use]
    pub fn with_options(mut self, options: Vec<toml::Value>) -> Self {
        self.options = options;
        self
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the ordered option values.
    #[must_use]
    pub fn options(&self) -> &[toml::Value] {
        &self.options
    }

    /// Returns `true` if the rule is configured but disabled.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.severity.is_off()
    }
}

/// A configuration fragment scoped to files matching given patterns.
///
/// Constructed once at load; immutable thereafter. A file matches the
/// block if it matches any of the block's patterns.
#[derive(Debug, Clone)]
pub struct OverrideBlock {
    files: Vec<FilePattern>,
    source_type: Option<SourceType>,
    remove: Vec<RuleName>,
    rules: BTreeMap<RuleName, RuleSpec>,
}

impl OverrideBlock {
    /// Creates a new override block.
    #[must_use]
    pub fn new(
        files: Vec<FilePattern>,
        source_type: Option<SourceType>,
        remove: Vec<RuleName>,
        rules: BTreeMap<RuleName, RuleSpec>,
    ) -> Self {
        Self {
            files,
            source_type,
            remove,
            rules,
        }
    }

    /// Returns the file patterns scoping this block.
    #[must_use]
    pub fn files(&self) -> &[FilePattern] {
        &self.files
    }

    /// Returns the parsing-mode override, if any.
    #[must_use]
    pub fn source_type(&self) -> Option<SourceType> {
        self.source_type
    }

    /// Returns the rule keys this block deletes from the base set.
    #[must_use]
    pub fn removed(&self) -> &[RuleName] {
        &self.remove
    }

    /// Returns the partial rule map this block applies.
    #[must_use]
    pub fn rules(&self) -> &BTreeMap<RuleName, RuleSpec> {
        &self.rules
    }

    /// Tests whether a relative file path is in scope for this block.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p.matches(path))
    }
}

// ────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────

/// Validated root configuration.
///
/// Immutable once constructed; all per-file queries go through
/// [`Configuration::effective_rules`].
#[derive(Debug, Clone)]
pub struct Configuration {
    defaults: BTreeMap<RuleName, RuleSpec>,
    globals: BTreeMap<String, GlobalAccess>,
    plugins: Vec<String>,
    parser: Option<String>,
    source_type: SourceType,
    overrides: Vec<OverrideBlock>,
    fallbacks: BTreeMap<String, Vec<PathBuf>>,
    nested_root: Option<PathBuf>,
}

impl Configuration {
    /// Creates a new configuration with cross-field validation.
    ///
    /// # Errors
    ///
    /// Returns all structural errors found: an override block that both
    /// removes and sets the same rule, or a fallback entry with no roots.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        defaults: BTreeMap<RuleName, RuleSpec>,
        globals: BTreeMap<String, GlobalAccess>,
        plugins: Vec<String>,
        parser: Option<String>,
        source_type: SourceType,
        overrides: Vec<OverrideBlock>,
        fallbacks: BTreeMap<String, Vec<PathBuf>>,
        nested_root: Option<PathBuf>,
    ) -> Result<Self, Vec<ModelError>> {
        let mut errors = Vec::new();

        for (i, block) in overrides.iter().enumerate() {
            for removed in &block.remove {
                if block.rules.contains_key(removed) {
                    errors.push(ModelError::RemovedAndSet {
                        block: i,
                        rule: removed.clone(),
                    });
                }
            }
        }

        for (name, roots) in &fallbacks {
            if roots.is_empty() {
                errors.push(ModelError::EmptyFallbackRoots {
                    plugin: name.clone(),
                });
            }
        }

        if errors.is_empty() {
            Ok(Self {
                defaults,
                globals,
                plugins,
                parser,
                source_type,
                overrides,
                fallbacks,
                nested_root,
            })
        } else {
            Err(errors)
        }
    }

    /// Creates an empty configuration (no rules, no overrides).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            defaults: BTreeMap::new(),
            globals: BTreeMap::new(),
            plugins: Vec::new(),
            parser: None,
            source_type: SourceType::default(),
            overrides: Vec::new(),
            fallbacks: BTreeMap::new(),
            nested_root: None,
        }
    }

    /// Returns the default rule map.
    #[must_use]
    pub fn defaults(&self) -> &BTreeMap<RuleName, RuleSpec> {
        &self.defaults
    }

    /// Returns the declared global symbols.
    #[must_use]
    pub fn globals(&self) -> &BTreeMap<String, GlobalAccess> {
        &self.globals
    }

    /// Returns the plugin names this configuration activates.
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Returns the configured parser name, if any.
    #[must_use]
    pub fn parser(&self) -> Option<&str> {
        self.parser.as_deref()
    }

    /// Returns the default parsing mode.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Returns the override blocks in declaration order.
    #[must_use]
    pub fn overrides(&self) -> &[OverrideBlock] {
        &self.overrides
    }

    /// Returns the plugin fallback table (name → ordered roots).
    #[must_use]
    pub fn fallbacks(&self) -> &BTreeMap<String, Vec<PathBuf>> {
        &self.fallbacks
    }

    /// Returns the shared lowest-priority fallback root, if any.
    #[must_use]
    pub fn nested_root(&self) -> Option<&Path> {
        self.nested_root.as_deref()
    }

    /// Resolves the effective rule set for one file.
    ///
    /// Starts from a copy of the defaults, then applies each override
    /// block that matches `path` in declaration order: removals first,
    /// then per-key overwrite or insert. The last matching block that
    /// sets a parsing mode wins. Pure and deterministic: the result
    /// depends only on this configuration and `path`.
    #[must_use]
    pub fn effective_rules(&self, path: &Path) -> EffectiveRuleSet {
        let mut rules = self.defaults.clone();
        let mut source_type = self.source_type;

        for block in &self.overrides {
            if !block.matches(path) {
                continue;
            }
            tracing::debug!(
                patterns = ?block.files.iter().map(FilePattern::as_str).collect::<Vec<_>>(),
                "override block matches {}",
                path.display()
            );
            for removed in &block.remove {
                rules.remove(removed);
            }
            for (name, spec) in &block.rules {
                rules.insert(name.clone(), spec.clone());
            }
            if let Some(mode) = block.source_type {
                source_type = mode;
            }
        }

        EffectiveRuleSet { rules, source_type }
    }
}

/// The per-file result of merging defaults with all matching overrides.
///
/// Derived, never stored on the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRuleSet {
    rules: BTreeMap<RuleName, RuleSpec>,
    source_type: SourceType,
}

impl EffectiveRuleSet {
    /// Returns the full resolved rule map.
    #[must_use]
    pub fn rules(&self) -> &BTreeMap<RuleName, RuleSpec> {
        &self.rules
    }

    /// Returns the resolved spec for a rule, if the rule is configured.
    #[must_use]
    pub fn get(&self, name: &RuleName) -> Option<&RuleSpec> {
        self.rules.get(name)
    }

    /// Returns `true` if the rule is configured with a firing severity.
    #[must_use]
    pub fn is_enabled(&self, name: &RuleName) -> bool {
        self.rules.get(name).is_some_and(|spec| !spec.is_off())
    }

    /// Returns the resolved parsing mode.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// Iterates over every configured rule, including disabled ones.
    pub fn iter(&self) -> impl Iterator<Item = (&RuleName, &RuleSpec)> {
        self.rules.iter()
    }

    /// Iterates over the rules that will actually fire.
    pub fn enabled(&self) -> impl Iterator<Item = (&RuleName, &RuleSpec)> {
        self.rules.iter().filter(|(_, spec)| !spec.is_off())
    }

    /// Returns the number of configured rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────

/// Errors in domain model construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    /// Rule name is empty.
    #[error("rule name must not be empty")]
    EmptyRuleName,

    /// Rule name contains invalid characters or segments.
    #[error("invalid rule name `{name}`: must be [a-z0-9-] with at most one `/`")]
    InvalidRuleName {
        /// The invalid name.
        name: String,
    },

    /// File pattern is empty.
    #[error("file pattern must not be empty")]
    EmptyFilePattern,

    /// File pattern has invalid glob syntax.
    #[error("invalid file pattern `{pattern}`: {reason}")]
    InvalidFilePattern {
        /// The invalid pattern.
        pattern: String,
        /// Why it's invalid.
        reason: String,
    },

    /// An override block both removes and sets the same rule.
    #[error("overrides[{block}]: rule `{rule}` is both removed and set")]
    RemovedAndSet {
        /// Index of the conflicting block.
        block: usize,
        /// The conflicting rule.
        rule: RuleName,
    },

    /// A fallback allow-list entry has no roots to search.
    #[error("plugin fallback for `{plugin}` has no roots")]
    EmptyFallbackRoots {
        /// The plugin with the empty root list.
        plugin: String,
    },
}

// ────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────
