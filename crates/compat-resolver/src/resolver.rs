//! Compatibility resolver
//!
//! Provides [`CompatibilityResolver`], which translates legacy-era requests
//! into the modern requests the engine understands. Every operation is a pure
//! function of `(request, rule table, version)`; the version is always an
//! explicit argument.

use crate::error::ConfigError;
use compat_rules::{Assignments, PathError, PropertyValue, RuleSet, RuleTable};
use compat_version::CompatibilityVersion;
use std::sync::Arc;

/// Version-gated name, property and identifier translation
///
/// Cheap to clone; the rule table is shared.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityResolver {
    rules: Arc<RuleTable>,
}

impl CompatibilityResolver {
    /// Create resolver over a validated table
    #[inline]
    #[must_use]
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Resolver over the built-in rules
    ///
    /// # Errors
    /// Returns error if the built-in table fails to load or validate
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self::new(RuleSet::builtin()?.validate()?))
    }

    /// Underlying rule table
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Resolve a proxy name as an old script would spell it
    ///
    /// Returns the modern name when a rename rule covers `version`, otherwise
    /// `requested` unchanged. Unknown names pass through; reporting them is
    /// the engine's job.
    #[must_use]
    pub fn resolve_proxy_name<'a>(
        &'a self,
        requested: &'a str,
        version: CompatibilityVersion,
    ) -> &'a str {
        match self
            .rules
            .rename_rules(requested)
            .iter()
            .find(|rule| rule.applies_at(version))
        {
            Some(rule) => {
                tracing::debug!(
                    legacy = requested,
                    modern = %rule.modern,
                    %version,
                    "proxy name substituted"
                );
                &rule.modern
            }
            None => requested,
        }
    }

    /// Normalize assignments for a concrete proxy
    ///
    /// Applicable rules run in ascending threshold order. Each one replaces
    /// its legacy assignment, in place, with the expansion's output, so a
    /// later rule sees what earlier ones produced. Other assignments pass
    /// through untouched.
    #[must_use]
    pub fn resolve_property_set(
        &self,
        concrete_name: &str,
        mut assignments: Assignments,
        version: CompatibilityVersion,
    ) -> Assignments {
        for rule in self
            .rules
            .property_rules(concrete_name)
            .iter()
            .filter(|rule| rule.applies_at(version))
        {
            let Some(value) = assignments.get(&rule.legacy).cloned() else {
                continue;
            };

            let expanded = rule.expand(&value);
            tracing::debug!(
                proxy = concrete_name,
                legacy = %rule.legacy,
                %value,
                produced = expanded.len(),
                %version,
                "property remapped"
            );
            assignments.splice(&rule.legacy, expanded);
        }
        assignments
    }

    /// Resolve a setting identifier (palette name, ...)
    ///
    /// Folds every rule of `category` whose threshold is `>= version`, in
    /// ascending threshold order, each consuming the previous output.
    #[must_use]
    pub fn resolve_identifier<'a>(
        &'a self,
        category: &str,
        requested: &'a str,
        version: CompatibilityVersion,
    ) -> &'a str {
        self.rules
            .identifier_rules(category)
            .iter()
            .filter(|rule| rule.applies_at(version))
            .fold(requested, |current, rule| {
                if current == rule.from {
                    tracing::debug!(
                        category,
                        legacy = current,
                        modern = %rule.to,
                        threshold = %rule.threshold,
                        %version,
                        "identifier substituted"
                    );
                    rule.to.as_str()
                } else {
                    current
                }
            })
    }

    /// Resolve name and properties of a construction request together
    ///
    /// Property rules are looked up under the resolved (modern) name.
    #[must_use]
    pub fn resolve(&self, request: ProxyRequest, version: CompatibilityVersion) -> ProxyRequest {
        let name = self.resolve_proxy_name(&request.name, version).to_string();
        let assignments = self.resolve_property_set(&name, request.assignments, version);
        ProxyRequest { name, assignments }
    }
}

/// Named construction request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyRequest {
    /// Proxy name
    pub name: String,
    /// Property assignments in caller order
    pub assignments: Assignments,
}

impl ProxyRequest {
    /// Create request without assignments
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assignments: Assignments::new(),
        }
    }

    /// Add an assignment
    ///
    /// # Errors
    /// Returns error if `path` is not a valid property path
    pub fn with(mut self, path: &str, value: impl Into<PropertyValue>) -> Result<Self, PathError> {
        self.assignments = self.assignments.with(path, value)?;
        Ok(self)
    }
}
