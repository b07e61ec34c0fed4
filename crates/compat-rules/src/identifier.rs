//! Identifier (setting value) rules
//!
//! Threshold rules for string identifiers such as palette names. Unlike proxy
//! renames these layer: several thresholds may touch the same value, and they
//! are folded in ascending threshold order.

use compat_version::CompatibilityVersion;
use serde::{Deserialize, Serialize};

/// Category used for palette names
pub const PALETTE: &str = "palette";

/// `from → to` substitution in `category`, active for versions `<= threshold`
///
/// ```toml
/// [[identifier]]
/// category = "palette"
/// threshold = "5.11"
/// from = "DefaultBackground"
/// to = "BlueGrayBackground"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRule {
    /// Namespace of the identifier (`palette`, ...)
    pub category: String,
    /// Last version (inclusive) for which the rule fires
    pub threshold: CompatibilityVersion,
    /// Value the rule matches
    pub from: String,
    /// Replacement value
    pub to: String,
}

impl IdentifierRule {
    /// Create rule
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        threshold: CompatibilityVersion,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            threshold,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if the rule fires at `version`
    #[inline]
    #[must_use]
    pub fn applies_at(&self, version: CompatibilityVersion) -> bool {
        version <= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let rule = IdentifierRule::new(PALETTE, CompatibilityVersion::new(5, 10), "A", "B");
        assert!(rule.applies_at(CompatibilityVersion::new(5, 9)));
        assert!(rule.applies_at(CompatibilityVersion::new(5, 10)));
        assert!(!rule.applies_at(CompatibilityVersion::new(5, 11)));
        assert!(!rule.applies_at(CompatibilityVersion::LATEST));
    }
}
