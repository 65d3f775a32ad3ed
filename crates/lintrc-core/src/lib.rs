//! # lintrc-core
//!
//! Rule-configuration resolution and plugin location for lint tools.
//!
//! This crate provides the start-up machinery a diagnostic engine needs
//! before any rule runs:
//!
//! - [`Configuration`] — validated root model: default rules, globals,
//!   plugins, and ordered path-scoped override blocks
//! - [`Configuration::effective_rules`] — the per-file merge producing an
//!   [`EffectiveRuleSet`]
//! - [`PluginResolver`] — ordered fallback search for plugin modules the
//!   host loader cannot find on its own
//! - [`Selector`] — compiled shape matchers for restricted-syntax rule
//!   options
//!
//! The parser, the rules themselves, and report formatting are external
//! collaborators; nothing here executes a rule.
//!
//! ## Example
//!
//! ```ignore
//! use lintrc_core::loader;
//!
//! let config = loader::from_file(Path::new("lintrc.toml"))?;
//! let effective = config.effective_rules(Path::new("lib/loader.mjs"));
//! for (name, spec) in effective.enabled() {
//!     println!("{name}: {}", spec.severity());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dto;
pub mod loader;
mod model;
pub mod resolver;
pub mod selector;
pub mod syntax;
mod types;

pub use loader::LoadError;
pub use model::{
    Configuration, EffectiveRuleSet, FilePattern, ModelError, OverrideBlock, RuleName, RuleSpec,
};
pub use resolver::{
    DirectoryLocator, ModuleLocator, PluginResolver, Provenance, Resolution, ResolveError,
};
pub use selector::{Restriction, RestrictionError, Selector, SelectorError, SyntaxRestriction};
pub use syntax::{NodeValue, Resolved, SyntaxNode};
pub use types::{GlobalAccess, Severity, SourceType};
