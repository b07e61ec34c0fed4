//! Resolver configuration
//!
//! Example `compat.toml`:
//!
//! ```toml
//! version = "5.10"
//! include_builtin = true
//! rule_files = ["site-rules.yaml"]
//! schema_files = ["site-schemas.toml"]
//! validate_identifiers = true
//! ```
//!
//! Rule files are merged after the built-in rules and validated together, so
//! a site file cannot silently shadow a built-in rule in an overlapping era.

use crate::error::ConfigError;
use crate::resolver::CompatibilityResolver;
use crate::schema::SchemaRegistry;
use crate::session::CompatContext;
use compat_rules::{load_file, RuleSet, RuleTable};
use compat_version::CompatibilityVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding the configured version
pub const VERSION_ENV: &str = "PROXY_COMPAT_VERSION";

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Compatibility version selected at startup
    pub version: CompatibilityVersion,
    /// Load the rules and schemas shipped with the crates
    pub include_builtin: bool,
    /// Extra rule files, merged in order
    pub rule_files: Vec<PathBuf>,
    /// Extra schema files; later schemas replace earlier ones
    pub schema_files: Vec<PathBuf>,
    /// Warn about identifiers the engine does not list
    pub validate_identifiers: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            version: CompatibilityVersion::LATEST,
            include_builtin: true,
            rule_files: Vec::new(),
            schema_files: Vec::new(),
            validate_identifiers: false,
        }
    }
}

impl ResolverConfig {
    /// Create default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set version
    #[must_use]
    pub fn with_version(mut self, version: CompatibilityVersion) -> Self {
        self.version = version;
        self
    }

    /// Toggle built-in rules and schemas
    #[must_use]
    pub fn with_builtin(mut self, enabled: bool) -> Self {
        self.include_builtin = enabled;
        self
    }

    /// Add a rule file
    #[must_use]
    pub fn with_rule_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_files.push(path.into());
        self
    }

    /// Add a schema file
    #[must_use]
    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_files.push(path.into());
        self
    }

    /// Toggle identifier validation
    #[must_use]
    pub fn with_identifier_validation(mut self, enabled: bool) -> Self {
        self.validate_identifiers = enabled;
        self
    }

    /// Parse from TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(compat_rules::Format::Toml.parse(toml)?)
    }

    /// Read from file (`.toml`, `.yaml`, `.yml`, `.json`)
    ///
    /// Relative rule and schema paths are resolved against the file's
    /// directory.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config: Self = load_file(path)?;
        if let Some(base) = path.parent() {
            for file in config.rule_files.iter_mut().chain(&mut config.schema_files) {
                if file.is_relative() {
                    *file = base.join(&*file);
                }
            }
        }
        Ok(config)
    }

    /// Apply `PROXY_COMPAT_VERSION` if set
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidVersion` if the variable does not parse
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        let value = std::env::var(VERSION_ENV).ok();
        self.with_version_override(value.as_deref())
    }

    /// Apply a version override given as text
    ///
    /// Blank or missing values leave the config unchanged.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidVersion` if `value` does not parse
    pub fn with_version_override(mut self, value: Option<&str>) -> Result<Self, ConfigError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(self);
        };
        self.version = value.parse().map_err(|source| ConfigError::InvalidVersion {
            value: value.to_string(),
            source,
        })?;
        tracing::debug!(version = %self.version, "version overridden");
        Ok(self)
    }

    /// Load, merge and validate all rules
    ///
    /// # Errors
    /// - `ConfigError::Load` if a file cannot be read or parsed
    /// - `ConfigError::Rules` if the merged table is ambiguous
    pub fn load_rules(&self) -> Result<RuleTable, ConfigError> {
        let mut rules = if self.include_builtin {
            RuleSet::builtin()?
        } else {
            RuleSet::new()
        };
        for path in &self.rule_files {
            rules.extend(RuleSet::from_path(path)?);
        }
        Ok(rules.validate()?)
    }

    /// Load and merge all schemas
    ///
    /// # Errors
    /// Returns `ConfigError::Load` if a file cannot be read or parsed
    pub fn load_schemas(&self) -> Result<SchemaRegistry, ConfigError> {
        let mut schemas = if self.include_builtin {
            SchemaRegistry::builtin()?
        } else {
            SchemaRegistry::new()
        };
        for path in &self.schema_files {
            schemas.extend(SchemaRegistry::from_path(path)?);
        }
        Ok(schemas)
    }

    /// Build resolver and schemas
    ///
    /// # Errors
    /// See [`Self::load_rules`] and [`Self::load_schemas`]
    pub fn build(&self) -> Result<CompatContext, ConfigError> {
        Ok(CompatContext {
            resolver: CompatibilityResolver::new(self.load_rules()?),
            schemas: Arc::new(self.load_schemas()?),
            version: self.version,
            validate_identifiers: self.validate_identifiers,
        })
    }
}
