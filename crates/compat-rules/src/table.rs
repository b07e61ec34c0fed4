//! Rule sets and validated rule tables
//!
//! [`RuleSet`] is the editable, serializable form read from files.
//! [`RuleTable`] can ONLY be obtained through [`RuleSet::validate`], so every
//! table a resolver sees has passed the integrity checks:
//!
//! 1. no rule maps a name onto itself
//! 2. proxy renames for the same legacy name have disjoint ranges
//! 3. no rename targets a name that is itself renamed at an overlapping
//!    version (keeps name resolution idempotent)
//! 4. property remaps for the same `(proxy, property)` have disjoint ranges
//!    and each expands to at least one assignment
//! 5. identifier rules are unique per `(category, threshold, from)`

use crate::error::{RuleKind, RuleTableError};
use crate::identifier::IdentifierRule;
use crate::property::PropertyRemapRule;
use crate::rename::RenameRule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unvalidated collection of rules
///
/// ```toml
/// [[rename]]
/// legacy = "HyperTreeGridCellCenters"
/// modern = "CellCenters"
/// through = "5.14"
///
/// [[identifier]]
/// category = "palette"
/// threshold = "5.11"
/// from = "DefaultBackground"
/// to = "BlueGrayBackground"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    /// Proxy renames
    #[serde(default, rename = "rename", skip_serializing_if = "Vec::is_empty")]
    pub renames: Vec<RenameRule>,
    /// Property remaps
    #[serde(default, rename = "property", skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyRemapRule>,
    /// Identifier substitutions
    #[serde(default, rename = "identifier", skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<IdentifierRule>,
}

impl RuleSet {
    /// Create empty rule set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add proxy rename
    #[must_use]
    pub fn with_rename(mut self, rule: RenameRule) -> Self {
        self.renames.push(rule);
        self
    }

    /// Add property remap
    #[must_use]
    pub fn with_property(mut self, rule: PropertyRemapRule) -> Self {
        self.properties.push(rule);
        self
    }

    /// Add identifier substitution
    #[must_use]
    pub fn with_identifier(mut self, rule: IdentifierRule) -> Self {
        self.identifiers.push(rule);
        self
    }

    /// Append all rules of `other` after the rules of `self`
    pub fn extend(&mut self, other: Self) {
        self.renames.extend(other.renames);
        self.properties.extend(other.properties);
        self.identifiers.extend(other.identifiers);
    }

    /// Total number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.renames.len() + self.properties.len() + self.identifiers.len()
    }

    /// Check if there are no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validate and index the rules
    ///
    /// # Errors
    /// Returns the first integrity violation found
    pub fn validate(self) -> Result<RuleTable, RuleTableError> {
        validate_renames(&self.renames)?;
        validate_properties(&self.properties)?;
        validate_identifiers(&self.identifiers)?;

        let mut renames: HashMap<String, Vec<RenameRule>> = HashMap::new();
        for rule in self.renames {
            renames.entry(rule.legacy.clone()).or_default().push(rule);
        }
        for rules in renames.values_mut() {
            rules.sort_by_key(|r| r.range.introduced_in());
        }

        let mut properties: HashMap<String, Vec<PropertyRemapRule>> = HashMap::new();
        for rule in self.properties {
            properties.entry(rule.proxy.clone()).or_default().push(rule);
        }
        for rules in properties.values_mut() {
            // stable: ties keep table order
            rules.sort_by_key(|r| r.range.removed_in());
        }

        let mut identifiers: HashMap<String, Vec<IdentifierRule>> = HashMap::new();
        for rule in self.identifiers {
            identifiers.entry(rule.category.clone()).or_default().push(rule);
        }
        for rules in identifiers.values_mut() {
            rules.sort_by_key(|r| r.threshold);
        }

        let table = RuleTable {
            renames,
            properties,
            identifiers,
        };
        tracing::debug!(
            renames = table.rename_count(),
            properties = table.property_count(),
            identifiers = table.identifier_count(),
            "rule table validated"
        );
        Ok(table)
    }
}

fn validate_renames(rules: &[RenameRule]) -> Result<(), RuleTableError> {
    for rule in rules {
        if rule.legacy == rule.modern {
            return Err(RuleTableError::SelfRename {
                kind: RuleKind::ProxyRename,
                key: rule.legacy.clone(),
            });
        }
    }

    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            if a.legacy == b.legacy && a.range.overlaps(&b.range) {
                return Err(RuleTableError::AmbiguousRule {
                    kind: RuleKind::ProxyRename,
                    key: a.legacy.clone(),
                    first: a.range.to_string(),
                    second: b.range.to_string(),
                });
            }
        }
    }

    for a in rules {
        if let Some(b) = rules
            .iter()
            .find(|b| b.legacy == a.modern && b.range.overlaps(&a.range))
        {
            return Err(RuleTableError::ChainedRename {
                legacy: a.legacy.clone(),
                modern: a.modern.clone(),
                range: a.range.to_string(),
                next: b.modern.clone(),
                next_range: b.range.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_properties(rules: &[PropertyRemapRule]) -> Result<(), RuleTableError> {
    for rule in rules {
        if rule.expansions.is_empty() {
            return Err(RuleTableError::EmptyExpansion {
                proxy: rule.proxy.clone(),
                property: rule.legacy.to_string(),
            });
        }
        if rule.expansions.iter().any(|e| *e.target() == rule.legacy) {
            return Err(RuleTableError::SelfRename {
                kind: RuleKind::PropertyRemap,
                key: format!("{}.{}", rule.proxy, rule.legacy),
            });
        }
    }

    for (i, a) in rules.iter().enumerate() {
        for b in &rules[i + 1..] {
            if a.proxy == b.proxy && a.legacy == b.legacy && a.range.overlaps(&b.range) {
                return Err(RuleTableError::AmbiguousRule {
                    kind: RuleKind::PropertyRemap,
                    key: format!("{}.{}", a.proxy, a.legacy),
                    first: a.range.to_string(),
                    second: b.range.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn validate_identifiers(rules: &[IdentifierRule]) -> Result<(), RuleTableError> {
    for (i, a) in rules.iter().enumerate() {
        if a.from == a.to {
            return Err(RuleTableError::SelfRename {
                kind: RuleKind::Identifier,
                key: format!("{}:{}", a.category, a.from),
            });
        }
        for b in &rules[i + 1..] {
            if a.category == b.category && a.threshold == b.threshold && a.from == b.from {
                return Err(RuleTableError::AmbiguousRule {
                    kind: RuleKind::Identifier,
                    key: format!("{}:{}", a.category, a.from),
                    first: format!("<= {} -> '{}'", a.threshold, a.to),
                    second: format!("<= {} -> '{}'", b.threshold, b.to),
                });
            }
        }
    }
    Ok(())
}

/// Validated, indexed, read-only rule table
///
/// Per key, rules are sorted for resolution:
/// - renames by `introduced_in`
/// - property remaps by `removed_in` (the threshold), ties in table order
/// - identifiers by threshold, ties in table order
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    renames: HashMap<String, Vec<RenameRule>>,
    properties: HashMap<String, Vec<PropertyRemapRule>>,
    identifiers: HashMap<String, Vec<IdentifierRule>>,
}

impl RuleTable {
    /// Table without any rule (everything passes through)
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rename rules for a legacy proxy name
    #[inline]
    #[must_use]
    pub fn rename_rules(&self, legacy: &str) -> &[RenameRule] {
        self.renames.get(legacy).map_or(&[], Vec::as_slice)
    }

    /// Property rules keyed on a (modern) proxy name, in threshold order
    #[inline]
    #[must_use]
    pub fn property_rules(&self, proxy: &str) -> &[PropertyRemapRule] {
        self.properties.get(proxy).map_or(&[], Vec::as_slice)
    }

    /// Identifier rules of a category, in threshold order
    #[inline]
    #[must_use]
    pub fn identifier_rules(&self, category: &str) -> &[IdentifierRule] {
        self.identifiers.get(category).map_or(&[], Vec::as_slice)
    }

    /// Number of rename rules
    #[must_use]
    pub fn rename_count(&self) -> usize {
        self.renames.values().map(Vec::len).sum()
    }

    /// Number of property rules
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.values().map(Vec::len).sum()
    }

    /// Number of identifier rules
    #[must_use]
    pub fn identifier_count(&self) -> usize {
        self.identifiers.values().map(Vec::len).sum()
    }

    /// Total number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rename_count() + self.property_count() + self.identifier_count()
    }

    /// Check if the table has no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
