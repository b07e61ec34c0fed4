//! Error types for the resolver boundary
//!
//! Resolution itself never fails. Errors here come from:
//! - schema checks on caller-supplied assignments
//! - loading and validating configuration at startup
//! - the process-wide holder

use compat_rules::{LoadError, PropertyKind, RuleTableError};
use compat_version::VersionError;

/// Assignment rejected by a proxy schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Property neither declared nor remapped at the active version
    #[error("proxy '{proxy}' has no property '{property}'")]
    UnknownProperty {
        /// Concrete proxy name
        proxy: String,
        /// Offending property path
        property: String,
    },

    /// Value of the wrong kind
    #[error("property '{proxy}.{property}' expects {expected}, got {actual}")]
    KindMismatch {
        /// Concrete proxy name
        proxy: String,
        /// Offending property path
        property: String,
        /// Declared kind
        expected: PropertyKind,
        /// Kind of the supplied value
        actual: PropertyKind,
    },
}

/// Startup configuration errors (fatal)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rule, schema or config file could not be read or parsed
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Rule table failed integrity validation
    #[error("invalid rule table: {0}")]
    Rules(#[from] RuleTableError),

    /// Version override could not be parsed
    #[error("invalid compatibility version '{value}': {source}")]
    InvalidVersion {
        /// Raw value
        value: String,
        /// Parse failure
        #[source]
        source: VersionError,
    },
}

/// Errors of the process-wide holder
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// `init`/`install` called twice
    #[error("compatibility resolver already initialized")]
    AlreadyInitialized,

    /// Resolver used before `init`/`install`
    #[error("compatibility resolver not initialized")]
    NotInitialized,

    /// Configuration failed to load
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
