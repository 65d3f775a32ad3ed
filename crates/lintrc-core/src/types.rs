//! Core enums shared across the configuration model.

use serde::{Deserialize, Serialize};

/// Severity level attached to a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is configured but never fires.
    Off,
    /// Findings are surfaced as warnings.
    Warn,
    /// Findings are surfaced as errors.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Off`].
    #[must_use]
    pub fn is_off(self) -> bool {
        self == Self::Off
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Parsing mode for an analyzed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Standalone script.
    #[default]
    Script,
    /// Importable module.
    Module,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script => write!(f, "script"),
            Self::Module => write!(f, "module"),
        }
    }
}

/// Whether a declared global symbol may be reassigned by analyzed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAccess {
    /// The symbol may be reassigned.
    Writable,
    /// The symbol is read-only.
    ReadOnly,
}

impl GlobalAccess {
    /// Maps the document's boolean form (`true` = writable).
    #[must_use]
    pub fn from_writable(writable: bool) -> Self {
        if writable {
            Self::Writable
        } else {
            Self::ReadOnly
        }
    }
}

impl std::fmt::Display for GlobalAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Writable => write!(f, "writable"),
            Self::ReadOnly => write!(f, "readonly"),
        }
    }
}
