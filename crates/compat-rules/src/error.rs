//! Error types for rule tables
//!
//! Provides error handling for:
//! - Property path parsing
//! - Rule table validation (load time, fatal)
//! - Rule file loading

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Errors related to property paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No segments at all
    #[error("property path is empty")]
    EmptyPath,

    /// Empty segment in path
    #[error("property path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be alphanumeric or underscore)")]
    InvalidSegment(String),
}

/// Family of rule an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Proxy rename
    ProxyRename,
    /// Property remap
    PropertyRemap,
    /// Identifier substitution
    Identifier,
}

impl Display for RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ProxyRename => "proxy rename",
            Self::PropertyRemap => "property remap",
            Self::Identifier => "identifier",
        })
    }
}

/// Rule table integrity violations
///
/// Raised once, when a [`crate::RuleSet`] is validated. Never raised by
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleTableError {
    /// Two rules for the same key fire at a common version
    #[error("ambiguous {kind} rules for '{key}': {first} overlaps {second}")]
    AmbiguousRule {
        /// Rule family
        kind: RuleKind,
        /// Legacy name, `proxy.property`, or `category:value`
        key: String,
        /// Versions of the first rule
        first: String,
        /// Versions of the second rule
        second: String,
    },

    /// Rule whose replacement equals its input
    #[error("{kind} rule for '{key}' maps a name onto itself")]
    SelfRename {
        /// Rule family
        kind: RuleKind,
        /// Offending key
        key: String,
    },

    /// Rename whose target is itself renamed at an overlapping version
    #[error("rename '{legacy}' -> '{modern}' {range} chains into '{next}' {next_range}")]
    ChainedRename {
        /// Legacy name of the first rule
        legacy: String,
        /// Modern name of the first rule, legacy name of the second
        modern: String,
        /// Range of the first rule
        range: String,
        /// Modern name of the second rule
        next: String,
        /// Range of the second rule
        next_range: String,
    },

    /// Property rule that produces nothing
    #[error("property rule for '{proxy}.{property}' has no expansions")]
    EmptyExpansion {
        /// Proxy name
        proxy: String,
        /// Legacy property
        property: String,
    },
}

/// Errors while reading rule or schema files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File extension not one of toml, yaml, yml, json
    #[error("unsupported rule file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Malformed TOML
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed YAML
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
