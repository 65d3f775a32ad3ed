//! DTO → domain model conversion with validation.
//!
//! [`parse`] and [`from_file`] are the entry points the host calls once at
//! start-up; everything they return is fully validated and immutable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dto::{ConfigDto, OverrideDto, RuleEntryDto};
use crate::model::{Configuration, FilePattern, ModelError, OverrideBlock, RuleName, RuleSpec};
use crate::types::{GlobalAccess, Severity, SourceType};

/// Errors raised while loading a configuration document.
///
/// All of these are fatal at load time: the host must not analyze any
/// file with a configuration that failed to load.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// IO error reading the document.
    #[error("failed to read config file {path}: {source}")]
    #[diagnostic(code(lintrc::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// TOML deserialization failed (syntax error, unknown key, bad shape).
    #[error("failed to parse config: {message}")]
    #[diagnostic(code(lintrc::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A field-level validation error.
    #[error("{context}: {source}")]
    #[diagnostic(code(lintrc::config::validation))]
    Validation {
        /// Where the error occurred (e.g., "overrides[2].files[0]").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },

    /// Unknown severity string.
    #[error("{context}: unknown severity `{value}`, expected: off, warn, error")]
    #[diagnostic(code(lintrc::config::severity))]
    UnknownSeverity {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// Unknown source type string.
    #[error("{context}: unknown source type `{value}`, expected: script, module")]
    #[diagnostic(code(lintrc::config::source_type))]
    UnknownSourceType {
        /// Where the error occurred.
        context: String,
        /// The invalid value.
        value: String,
    },

    /// A tuple-form rule entry with no severity element.
    #[error("{context}: rule entry must be a severity or [severity, ...options]")]
    #[diagnostic(code(lintrc::config::rule_entry))]
    MalformedRuleEntry {
        /// Where the error occurred.
        context: String,
    },

    /// Cross-field errors from aggregate root construction.
    #[error("configuration validation errors:\n{}", format_errors(.0))]
    #[diagnostic(code(lintrc::config::invalid))]
    Invalid(Vec<ModelError>),
}

fn format_errors(errors: &[ModelError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loads a configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn from_file(path: &Path) -> Result<Configuration, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content)
}

/// Parses and validates a configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or any field fails validation.
pub fn parse(content: &str) -> Result<Configuration, LoadError> {
    let dto: ConfigDto = toml::from_str(content).map_err(|e| LoadError::Parse {
        message: e.to_string(),
    })?;
    load(dto)
}

/// Converts a deserialized [`ConfigDto`] into a validated [`Configuration`].
///
/// # Errors
///
/// Returns the first field-level error encountered, or the collected
/// cross-field errors from aggregate construction.
pub fn load(dto: ConfigDto) -> Result<Configuration, LoadError> {
    let source_type = match dto.source_type.as_deref() {
        None => SourceType::default(),
        Some(value) => parse_source_type(value, "source_type")?,
    };

    let defaults = convert_rule_map(dto.rules, "rules")?;

    let globals = dto
        .globals
        .into_iter()
        .map(|(name, writable)| (name, GlobalAccess::from_writable(writable)))
        .collect();

    let overrides = dto
        .overrides
        .into_iter()
        .enumerate()
        .map(|(i, block)| convert_override(block, i))
        .collect::<Result<Vec<_>, _>>()?;

    let fallbacks = dto
        .plugins
        .fallback
        .into_iter()
        .map(|(name, roots)| (name, roots.into_iter().map(PathBuf::from).collect()))
        .collect();

    Configuration::new(
        defaults,
        globals,
        dto.plugins.names,
        dto.parser,
        source_type,
        overrides,
        fallbacks,
        dto.plugins.nested_root.map(PathBuf::from),
    )
    .map_err(LoadError::Invalid)
}

fn convert_override(dto: OverrideDto, index: usize) -> Result<OverrideBlock, LoadError> {
    let ctx = format!("overrides[{index}]");

    let files = dto
        .files
        .iter()
        .enumerate()
        .map(|(j, p)| {
            FilePattern::new(p).map_err(|e| LoadError::Validation {
                context: format!("{ctx}.files[{j}]"),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let source_type = match dto.source_type.as_deref() {
        None => None,
        Some(value) => Some(parse_source_type(value, &format!("{ctx}.source_type"))?),
    };

    let remove = dto
        .remove
        .iter()
        .enumerate()
        .map(|(j, name)| {
            RuleName::new(name).map_err(|e| LoadError::Validation {
                context: format!("{ctx}.remove[{j}]"),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rules = convert_rule_map(dto.rules, &format!("{ctx}.rules"))?;

    Ok(OverrideBlock::new(files, source_type, remove, rules))
}

fn convert_rule_map(
    entries: BTreeMap<String, RuleEntryDto>,
    ctx: &str,
) -> Result<BTreeMap<RuleName, RuleSpec>, LoadError> {
    let mut rules = BTreeMap::new();
    for (name, entry) in entries {
        let entry_ctx = format!("{ctx}.{name}");
        let rule_name = RuleName::new(&name).map_err(|e| LoadError::Validation {
            context: entry_ctx.clone(),
            source: e,
        })?;
        rules.insert(rule_name, convert_rule_entry(entry, &entry_ctx)?);
    }
    Ok(rules)
}

fn convert_rule_entry(entry: RuleEntryDto, ctx: &str) -> Result<RuleSpec, LoadError> {
    match entry {
        RuleEntryDto::Severity(value) => Ok(RuleSpec::new(parse_severity(&value, ctx)?)),
        RuleEntryDto::Tuple(mut items) => {
            if items.is_empty() {
                return Err(LoadError::MalformedRuleEntry {
                    context: ctx.to_string(),
                });
            }
            let severity = match items.remove(0) {
                toml::Value::String(value) => parse_severity(&value, ctx)?,
                _ => {
                    return Err(LoadError::MalformedRuleEntry {
                        context: ctx.to_string(),
                    })
                }
            };
            Ok(RuleSpec::new(severity).with_options(items))
        }
    }
}

fn parse_severity(value: &str, context: &str) -> Result<Severity, LoadError> {
    match value {
        "off" => Ok(Severity::Off),
        "warn" => Ok(Severity::Warn),
        "error" => Ok(Severity::Error),
        _ => Err(LoadError::UnknownSeverity {
            context: context.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_source_type(value: &str, context: &str) -> Result<SourceType, LoadError> {
    match value {
        "script" => Ok(SourceType::Script),
        "module" => Ok(SourceType::Module),
        _ => Err(LoadError::UnknownSourceType {
            context: context.to_string(),
            value: value.to_string(),
        }),
    }
}
