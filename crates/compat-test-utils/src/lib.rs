//! Testing utilities for the proxy compatibility workspace
//!
//! Shared engine double, fixtures, and log setup.

#![allow(missing_docs)]

use compat_resolver::{CompatibilityResolver, ProxyEngine, SchemaError};
use compat_rules::{Assignments, IdentifierRule, RuleSet, PALETTE};
use compat_version::CompatibilityVersion;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyHandle {
    pub type_name: String,
    pub assignments: Assignments,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no proxy named '{0}'")]
    UnknownProxy(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Engine double that knows a fixed set of proxies and records every call
#[derive(Debug, Default)]
pub struct RecordingEngine {
    proxies: HashSet<String>,
    identifiers: HashMap<String, HashSet<String>>,
    calls: Mutex<Vec<ProxyHandle>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine offering the modern proxies and palettes of the built-in tables
    pub fn modern() -> Self {
        Self::new()
            .with_proxies(["CellCenters", "GhostCells", "Slice", "AxisAlignedReflectionFilter"])
            .with_identifiers(
                PALETTE,
                ["BlueGrayBackground", "WhiteBackground", "BlackBackground"],
            )
    }

    pub fn with_proxies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxies.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_identifiers<I, S>(mut self, category: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identifiers
            .entry(category.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Successful constructions, oldest first
    pub fn calls(&self) -> Vec<ProxyHandle> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<ProxyHandle> {
        self.calls.lock().last().cloned()
    }
}

impl ProxyEngine for RecordingEngine {
    type Handle = ProxyHandle;
    type Error = EngineError;

    fn construct_proxy(
        &self,
        name: &str,
        assignments: &Assignments,
    ) -> Result<Self::Handle, Self::Error> {
        if !self.proxies.contains(name) {
            return Err(EngineError::UnknownProxy(name.to_string()));
        }
        let handle = ProxyHandle {
            type_name: name.to_string(),
            assignments: assignments.clone(),
        };
        self.calls.lock().push(handle.clone());
        Ok(handle)
    }

    fn known_identifiers(&self, category: &str) -> Option<HashSet<String>> {
        self.identifiers.get(category).cloned()
    }
}

pub fn v(major: u32, minor: u32) -> CompatibilityVersion {
    CompatibilityVersion::new(major, minor)
}

pub fn builtin_resolver() -> CompatibilityResolver {
    CompatibilityResolver::builtin().unwrap()
}

/// Palette chain A -> B (<= 5.10), B -> C (<= 5.11), A -> D (<= 5.12)
pub fn layered_palette_rules() -> RuleSet {
    RuleSet::new()
        .with_identifier(IdentifierRule::new(PALETTE, v(5, 10), "A", "B"))
        .with_identifier(IdentifierRule::new(PALETTE, v(5, 11), "B", "C"))
        .with_identifier(IdentifierRule::new(PALETTE, v(5, 12), "A", "D"))
}

pub fn resolver_from(rules: RuleSet) -> CompatibilityResolver {
    CompatibilityResolver::new(rules.validate().unwrap())
}

/// Route `tracing` output to the test harness; honors `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
