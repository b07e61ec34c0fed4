//! Proxy schemas
//!
//! A schema lists the properties a concrete proxy declares and the kind of
//! value each one takes. Assignments are checked against it before legacy
//! properties are remapped, so a legacy property is accepted only while one
//! of its remap rules still applies.

use crate::error::SchemaError;
use compat_rules::{load_file, Assignments, LoadError, PropertyKind, PropertyPath, RuleTable};
use compat_version::CompatibilityVersion;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_SCHEMAS: &str = include_str!("../schemas/builtin.toml");

/// Declared properties of one concrete proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxySchema {
    /// Concrete proxy name
    pub name: String,
    /// Property path to kind, in declaration order
    #[serde(default)]
    pub properties: IndexMap<PropertyPath, PropertyKind>,
}

impl ProxySchema {
    /// Create schema without properties
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
        }
    }

    /// Declare a property
    #[must_use]
    pub fn with_property(mut self, path: PropertyPath, kind: PropertyKind) -> Self {
        self.properties.insert(path, kind);
        self
    }

    /// Declared kind of a property
    #[inline]
    #[must_use]
    pub fn kind_of(&self, path: &PropertyPath) -> Option<PropertyKind> {
        self.properties.get(path).copied()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default, rename = "proxy")]
    proxies: Vec<ProxySchema>,
}

/// Schemas indexed by proxy name
///
/// Proxies without a schema are not checked.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, ProxySchema>,
}

impl SchemaRegistry {
    /// Create empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schemas shipped with the crate
    ///
    /// # Errors
    /// Returns error if the embedded file does not parse
    pub fn builtin() -> Result<Self, LoadError> {
        Self::from_toml_str(BUILTIN_SCHEMAS)
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml_str(toml: &str) -> Result<Self, LoadError> {
        let file: SchemaFile = compat_rules::Format::Toml.parse(toml)?;
        Ok(file.proxies.into_iter().collect())
    }

    /// Read from file (`.toml`, `.yaml`, `.yml`, `.json`)
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file: SchemaFile = load_file(path)?;
        Ok(file.proxies.into_iter().collect())
    }

    /// Add or replace a schema
    pub fn register(&mut self, schema: ProxySchema) -> Option<ProxySchema> {
        self.schemas.insert(schema.name.clone(), schema)
    }

    /// Merge another registry; later schemas replace earlier ones
    pub fn extend(&mut self, other: Self) {
        self.schemas.extend(other.schemas);
    }

    /// Schema of a proxy
    #[inline]
    #[must_use]
    pub fn get(&self, proxy: &str) -> Option<&ProxySchema> {
        self.schemas.get(proxy)
    }

    /// Check if a proxy has a schema
    #[inline]
    #[must_use]
    pub fn contains(&self, proxy: &str) -> bool {
        self.schemas.contains_key(proxy)
    }

    /// Number of schemas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Check caller assignments for a concrete proxy
    ///
    /// Declared properties must carry a value of an accepted kind. Anything
    /// else must be the legacy property of a remap rule applying at
    /// `version`; its value is not checked here.
    ///
    /// # Errors
    /// - `SchemaError::KindMismatch` for a declared property of the wrong kind
    /// - `SchemaError::UnknownProperty` for anything else
    pub fn check(
        &self,
        proxy: &str,
        assignments: &Assignments,
        rules: &RuleTable,
        version: CompatibilityVersion,
    ) -> Result<(), SchemaError> {
        let Some(schema) = self.get(proxy) else {
            return Ok(());
        };

        for (path, value) in assignments {
            match schema.kind_of(path) {
                Some(kind) if kind.accepts(value) => {}
                Some(kind) => {
                    return Err(SchemaError::KindMismatch {
                        proxy: proxy.to_string(),
                        property: path.to_string(),
                        expected: kind,
                        actual: value.kind(),
                    });
                }
                None => {
                    let remapped = rules
                        .property_rules(proxy)
                        .iter()
                        .any(|rule| rule.legacy == *path && rule.applies_at(version));
                    if !remapped {
                        return Err(SchemaError::UnknownProperty {
                            proxy: proxy.to_string(),
                            property: path.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<ProxySchema> for SchemaRegistry {
    fn from_iter<I: IntoIterator<Item = ProxySchema>>(iter: I) -> Self {
        let mut registry = Self::new();
        for schema in iter {
            registry.register(schema);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compat_rules::{Expansion, PropertyRemapRule, RuleSet};
    use compat_version::VersionRange;

    fn p(s: &str) -> PropertyPath {
        s.parse().unwrap()
    }

    fn slice_rules() -> RuleTable {
        RuleSet::new()
            .with_property(PropertyRemapRule::new(
                "Slice",
                p("MergePoints"),
                VersionRange::through(CompatibilityVersion::new(5, 11)),
                vec![Expansion::Rename { to: p("Locator") }],
            ))
            .validate()
            .unwrap()
    }

    fn slice_schemas() -> SchemaRegistry {
        std::iter::once(
            ProxySchema::new("Slice")
                .with_property(p("Input"), PropertyKind::Text)
                .with_property(p("Locator"), PropertyKind::Text)
                .with_property(p("Triangulate"), PropertyKind::Bool),
        )
        .collect()
    }

    #[test]
    fn test_builtin_schemas_parse() {
        let registry = SchemaRegistry::builtin().unwrap();
        let slice = registry.get("Slice").unwrap();
        assert_eq!(slice.kind_of(&p("Locator")), Some(PropertyKind::Text));
        assert!(registry.contains("AxisAlignedReflectionFilter"));
    }

    #[test]
    fn test_declared_properties_pass() {
        let assignments = Assignments::new()
            .with("Locator", "Uniform Binning")
            .unwrap()
            .with("Triangulate", 1)
            .unwrap();
        slice_schemas()
            .check("Slice", &assignments, &slice_rules(), CompatibilityVersion::LATEST)
            .unwrap();
    }

    #[test]
    fn test_kind_mismatch() {
        let assignments = Assignments::new().with("Locator", 3.5).unwrap();
        let err = slice_schemas()
            .check("Slice", &assignments, &slice_rules(), CompatibilityVersion::LATEST)
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::KindMismatch {
                expected: PropertyKind::Text,
                actual: PropertyKind::Double,
                ..
            }
        ));
    }

    #[test]
    fn test_legacy_property_accepted_only_while_remapped() {
        let assignments = Assignments::new().with("MergePoints", 1).unwrap();
        let schemas = slice_schemas();
        let rules = slice_rules();

        schemas
            .check("Slice", &assignments, &rules, CompatibilityVersion::new(5, 11))
            .unwrap();

        let err = schemas
            .check("Slice", &assignments, &rules, CompatibilityVersion::new(5, 12))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownProperty {
                proxy: "Slice".into(),
                property: "MergePoints".into(),
            }
        );
    }

    #[test]
    fn test_proxies_without_schema_unchecked() {
        let assignments = Assignments::new().with("Whatever", 1).unwrap();
        slice_schemas()
            .check("Clip", &assignments, &slice_rules(), CompatibilityVersion::LATEST)
            .unwrap();
    }

    #[test]
    fn test_later_registry_replaces_schema() {
        let mut registry = slice_schemas();
        registry.extend(std::iter::once(ProxySchema::new("Slice")).collect());
        assert!(registry.get("Slice").unwrap().properties.is_empty());
        assert_eq!(registry.len(), 1);
    }
}
