//! Compatibility sessions
//!
//! A [`CompatSession`] sits between a script front end and a [`ProxyEngine`]:
//! every request goes through the resolver at the session's version before
//! the engine sees it.

use crate::engine::ProxyEngine;
use crate::error::SchemaError;
use crate::global;
use crate::resolver::CompatibilityResolver;
use crate::schema::SchemaRegistry;
use compat_rules::Assignments;
use compat_version::CompatibilityVersion;
use std::sync::Arc;

/// Where a session reads its compatibility version from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// Fixed for the session's lifetime
    Fixed(CompatibilityVersion),
    /// Process-wide holder, read once per call
    Global,
}

impl Default for VersionSource {
    fn default() -> Self {
        Self::Fixed(CompatibilityVersion::LATEST)
    }
}

/// Everything a session needs apart from the engine
///
/// Produced by [`crate::ResolverConfig::build`].
#[derive(Debug, Clone, Default)]
pub struct CompatContext {
    /// Rule-backed resolver
    pub resolver: CompatibilityResolver,
    /// Schemas checked before remapping
    pub schemas: Arc<SchemaRegistry>,
    /// Configured version
    pub version: CompatibilityVersion,
    /// Warn about identifiers the engine does not list
    pub validate_identifiers: bool,
}

impl CompatContext {
    /// Session over `engine` at the configured version
    #[must_use]
    pub fn session<E: ProxyEngine>(&self, engine: E) -> CompatSession<E> {
        CompatSession::new(engine, self.resolver.clone())
            .with_shared_schemas(Arc::clone(&self.schemas))
            .with_version(self.version)
            .with_identifier_validation(self.validate_identifiers)
    }
}

/// Engine wrapped with version-gated request translation
#[derive(Debug)]
pub struct CompatSession<E> {
    engine: E,
    resolver: CompatibilityResolver,
    schemas: Arc<SchemaRegistry>,
    version: VersionSource,
    validate_identifiers: bool,
}

impl<E: ProxyEngine> CompatSession<E> {
    /// Create session at the latest version, without schemas
    #[must_use]
    pub fn new(engine: E, resolver: CompatibilityResolver) -> Self {
        Self {
            engine,
            resolver,
            schemas: Arc::default(),
            version: VersionSource::default(),
            validate_identifiers: false,
        }
    }

    /// Check assignments against `schemas`
    #[must_use]
    pub fn with_schemas(self, schemas: SchemaRegistry) -> Self {
        self.with_shared_schemas(Arc::new(schemas))
    }

    /// Check assignments against shared `schemas`
    #[must_use]
    pub fn with_shared_schemas(mut self, schemas: Arc<SchemaRegistry>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Pin the session to `version`
    #[must_use]
    pub fn with_version(mut self, version: CompatibilityVersion) -> Self {
        self.version = VersionSource::Fixed(version);
        self
    }

    /// Follow the process-wide holder
    #[must_use]
    pub fn with_global_version(mut self) -> Self {
        self.version = VersionSource::Global;
        self
    }

    /// Warn about resolved identifiers the engine does not list
    #[must_use]
    pub fn with_identifier_validation(mut self, enabled: bool) -> Self {
        self.validate_identifiers = enabled;
        self
    }

    /// Change the version for subsequent calls
    pub fn set_version(&mut self, version: CompatibilityVersion) {
        self.version = VersionSource::Fixed(version);
    }

    /// Version the next call will use
    #[must_use]
    pub fn version(&self) -> CompatibilityVersion {
        match self.version {
            VersionSource::Fixed(version) => version,
            VersionSource::Global => global::version(),
        }
    }

    /// Version source
    #[inline]
    #[must_use]
    pub fn version_source(&self) -> VersionSource {
        self.version
    }

    /// Wrapped engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Resolver in use
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &CompatibilityResolver {
        &self.resolver
    }

    /// Construct a proxy as an old script would request it
    ///
    /// The version is read once, so the whole request sees one version.
    ///
    /// # Errors
    /// - schema violations, converted into the engine's error type
    /// - the engine's own error, unchanged
    pub fn create(&self, name: &str, assignments: Assignments) -> Result<E::Handle, E::Error>
    where
        E::Error: From<SchemaError>,
    {
        let version = self.version();
        let concrete = self.resolver.resolve_proxy_name(name, version);

        self.schemas
            .check(concrete, &assignments, self.resolver.rules(), version)?;

        let assignments = self
            .resolver
            .resolve_property_set(concrete, assignments, version);
        self.engine.construct_proxy(concrete, &assignments)
    }

    /// Resolve a setting identifier at the session's version
    #[must_use]
    pub fn identifier<'a>(&'a self, category: &str, requested: &'a str) -> &'a str {
        let version = self.version();
        let resolved = self.resolver.resolve_identifier(category, requested, version);

        if self.validate_identifiers {
            if let Some(known) = self.engine.known_identifiers(category) {
                if !known.contains(resolved) {
                    tracing::warn!(
                        category,
                        requested,
                        resolved,
                        %version,
                        "identifier not offered by engine"
                    );
                }
            }
        }
        resolved
    }
}
