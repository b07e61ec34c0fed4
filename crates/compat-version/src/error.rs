//! Error types for version parsing and range construction

use crate::version::CompatibilityVersion;
use std::num::ParseIntError;

/// Errors while parsing versions or building ranges
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    /// Empty version string
    #[error("empty version string")]
    Empty,

    /// Non-numeric major or minor component
    #[error("invalid {component} component in version '{input}': {source}")]
    InvalidComponent {
        /// Full input string
        input: String,
        /// `"major"` or `"minor"`
        component: &'static str,
        /// Underlying integer parse failure
        #[source]
        source: ParseIntError,
    },

    /// Numeric spelling of the `latest` sentinel
    #[error("version '{0}' is reserved; use 'latest'")]
    Reserved(String),

    /// Range with `start >= end`
    #[error("empty version range [{start}, {end})")]
    EmptyRange {
        /// Inclusive lower bound
        start: CompatibilityVersion,
        /// Exclusive upper bound
        end: CompatibilityVersion,
    },

    /// Both `removed_in` and `through` given
    #[error("version range sets both 'removed_in' and 'through'")]
    ConflictingBounds,

    /// Neither `removed_in` nor `through` given
    #[error("version range needs 'removed_in' or 'through'")]
    MissingUpperBound,
}
