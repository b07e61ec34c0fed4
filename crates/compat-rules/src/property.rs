//! Property remap rules
//!
//! A [`PropertyRemapRule`] replaces one legacy assignment on a proxy with the
//! modern assignments it expands to. Expansions are declarative so rule files
//! can describe them without code.

use crate::path::PropertyPath;
use crate::value::PropertyValue;
use compat_version::{CompatibilityVersion, VersionRange};
use serde::{Deserialize, Serialize};

/// Legacy property on `proxy` that expands to modern assignments
///
/// ```toml
/// [[property]]
/// proxy = "Slice"
/// legacy = "MergePoints"
/// through = "5.11"
///
/// [[property.expand]]
/// kind = "map"
/// to = "Locator"
/// cases = [
///     { when = 0, then = "Not Merging Points" },
///     { when = 1, then = "Uniform Binning" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRemapRule {
    /// Modern proxy name the rule is keyed on
    pub proxy: String,
    /// Legacy property path
    pub legacy: PropertyPath,
    /// Versions for which the remap fires
    #[serde(flatten)]
    pub range: VersionRange,
    /// Modern assignments produced from the legacy value
    #[serde(rename = "expand")]
    pub expansions: Vec<Expansion>,
}

impl PropertyRemapRule {
    /// Create rule
    #[must_use]
    pub fn new(
        proxy: impl Into<String>,
        legacy: PropertyPath,
        range: VersionRange,
        expansions: Vec<Expansion>,
    ) -> Self {
        Self {
            proxy: proxy.into(),
            legacy,
            range,
            expansions,
        }
    }

    /// Check if the rule fires at `version`
    #[inline]
    #[must_use]
    pub fn applies_at(&self, version: CompatibilityVersion) -> bool {
        self.range.contains(version)
    }

    /// Expand a legacy value into modern assignments, in declaration order
    #[must_use]
    pub fn expand(&self, value: &PropertyValue) -> Vec<(PropertyPath, PropertyValue)> {
        self.expansions.iter().map(|e| e.apply(value)).collect()
    }
}

/// One modern assignment derived from a legacy value
///
/// Expansions never fail. When a `map` has no matching case and no
/// `otherwise`, or `broadcast` receives a non-scalar, the legacy value is
/// forwarded unchanged and the engine reports it if it is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expansion {
    /// Same value under a new path
    Rename {
        /// Modern path
        to: PropertyPath,
    },

    /// Value lookup table
    Map {
        /// Modern path
        to: PropertyPath,
        /// `when → then` pairs, first match wins
        cases: Vec<ValueCase>,
        /// Value used when no case matches
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<PropertyValue>,
    },

    /// Scalar repeated into a `width`-tuple
    Broadcast {
        /// Modern path
        to: PropertyPath,
        /// Tuple width
        width: usize,
    },

    /// Fixed assignment, independent of the legacy value
    Constant {
        /// Modern path
        to: PropertyPath,
        /// Assigned value
        value: PropertyValue,
    },
}

impl Expansion {
    /// Modern path this expansion assigns
    #[must_use]
    pub fn target(&self) -> &PropertyPath {
        match self {
            Self::Rename { to }
            | Self::Map { to, .. }
            | Self::Broadcast { to, .. }
            | Self::Constant { to, .. } => to,
        }
    }

    /// Produce the modern assignment for a legacy value
    #[must_use]
    pub fn apply(&self, value: &PropertyValue) -> (PropertyPath, PropertyValue) {
        let produced = match self {
            Self::Rename { .. } => value.clone(),
            Self::Map {
                cases, otherwise, ..
            } => cases
                .iter()
                .find(|case| case.when.loosely_eq(value))
                .map(|case| case.then.clone())
                .or_else(|| otherwise.clone())
                .unwrap_or_else(|| value.clone()),
            Self::Broadcast { width, .. } => match value.as_f64() {
                Some(x) => PropertyValue::Vector(vec![x; *width]),
                None => value.clone(),
            },
            Self::Constant { value: fixed, .. } => fixed.clone(),
        };
        (self.target().clone(), produced)
    }
}

/// Case of a [`Expansion::Map`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueCase {
    /// Legacy value to match (numeric values compare loosely)
    pub when: PropertyValue,
    /// Modern value to assign
    pub then: PropertyValue,
}

impl ValueCase {
    /// Create case
    #[must_use]
    pub fn new(when: impl Into<PropertyValue>, then: impl Into<PropertyValue>) -> Self {
        Self {
            when: when.into(),
            then: then.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PropertyPath {
        s.parse().unwrap()
    }

    fn merge_points_rule() -> PropertyRemapRule {
        PropertyRemapRule::new(
            "Slice",
            p("MergePoints"),
            VersionRange::through(CompatibilityVersion::new(5, 11)),
            vec![Expansion::Map {
                to: p("Locator"),
                cases: vec![
                    ValueCase::new(0, "Not Merging Points"),
                    ValueCase::new(1, "Uniform Binning"),
                ],
                otherwise: None,
            }],
        )
    }

    #[test]
    fn test_map_matches_bool_and_int() {
        let rule = merge_points_rule();
        assert_eq!(
            rule.expand(&PropertyValue::Bool(false)),
            vec![(p("Locator"), PropertyValue::from("Not Merging Points"))]
        );
        assert_eq!(
            rule.expand(&PropertyValue::Int(1)),
            vec![(p("Locator"), PropertyValue::from("Uniform Binning"))]
        );
    }

    #[test]
    fn test_map_without_match_forwards_value() {
        let rule = merge_points_rule();
        assert_eq!(
            rule.expand(&PropertyValue::Int(5)),
            vec![(p("Locator"), PropertyValue::Int(5))]
        );
    }

    #[test]
    fn test_map_otherwise() {
        let expansion = Expansion::Map {
            to: p("Mode"),
            cases: vec![],
            otherwise: Some(PropertyValue::from("Default")),
        };
        assert_eq!(expansion.apply(&PropertyValue::Int(9)).1, PropertyValue::from("Default"));
    }

    #[test]
    fn test_broadcast_scalar() {
        let expansion = Expansion::Broadcast {
            to: p("ReflectionPlane.Origin"),
            width: 3,
        };
        assert_eq!(
            expansion.apply(&PropertyValue::Int(2)),
            (p("ReflectionPlane.Origin"), PropertyValue::from([2.0, 2.0, 2.0]))
        );
        // non-scalars pass through for the engine to reject
        assert_eq!(
            expansion.apply(&PropertyValue::from("x")).1,
            PropertyValue::from("x")
        );
    }

    #[test]
    fn test_constant_ignores_input() {
        let expansion = Expansion::Constant {
            to: p("Locator"),
            value: PropertyValue::from("Uniform Binning"),
        };
        assert_eq!(
            expansion.apply(&PropertyValue::Int(42)).1,
            PropertyValue::from("Uniform Binning")
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let rule: PropertyRemapRule = toml::from_str(
            r#"
            proxy = "Slice"
            legacy = "MergePoints"
            through = "5.11"

            [[expand]]
            kind = "map"
            to = "Locator"
            cases = [
                { when = 0, then = "Not Merging Points" },
                { when = 1, then = "Uniform Binning" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(rule, merge_points_rule());
    }
}
