//! Proxy rename rules

use compat_version::{CompatibilityVersion, VersionRange};
use serde::{Deserialize, Serialize};

/// Legacy proxy name that resolves to a modern one inside a version range
///
/// ```toml
/// [[rename]]
/// legacy = "GhostCellsGenerator"
/// modern = "GhostCells"
/// through = "5.12"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRule {
    /// Name as old scripts spell it
    pub legacy: String,
    /// Name the engine understands
    pub modern: String,
    /// Versions for which the substitution fires
    #[serde(flatten)]
    pub range: VersionRange,
}

impl RenameRule {
    /// Create rule
    #[must_use]
    pub fn new(legacy: impl Into<String>, modern: impl Into<String>, range: VersionRange) -> Self {
        Self {
            legacy: legacy.into(),
            modern: modern.into(),
            range,
        }
    }

    /// Check if the rule fires at `version`
    #[inline]
    #[must_use]
    pub fn applies_at(&self, version: CompatibilityVersion) -> bool {
        self.range.contains(version)
    }
}
