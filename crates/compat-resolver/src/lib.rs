//! Compatibility Resolver
//!
//! Lets scripts written for an older release keep working. Requests are
//! spelled the old way; the resolver rewrites them, at the selected
//! compatibility version, into what the current engine understands.
//!
//! # Core Concepts
//!
//! - [`CompatibilityResolver`]: pure translation of proxy names, property
//!   assignments and setting identifiers
//! - [`ProxyEngine`]: the construction backend requests are handed to
//! - [`CompatSession`]: engine plus resolver plus schemas at one version
//! - [`ResolverConfig`]: startup configuration producing a [`CompatContext`]
//! - [`global`]: process-wide version holder and installed context
//!
//! # Example
//!
//! ```rust
//! use compat_resolver::CompatibilityResolver;
//! use compat_version::CompatibilityVersion;
//!
//! let resolver = CompatibilityResolver::builtin().unwrap();
//!
//! let name = resolver.resolve_proxy_name(
//!     "HyperTreeGridCellCenters",
//!     CompatibilityVersion::new(5, 14),
//! );
//! assert_eq!(name, "CellCenters");
//!
//! let name = resolver.resolve_proxy_name("HyperTreeGridCellCenters", CompatibilityVersion::LATEST);
//! assert_eq!(name, "HyperTreeGridCellCenters");
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod global;
mod resolver;
mod schema;
mod session;

pub use config::{ResolverConfig, VERSION_ENV};
pub use engine::ProxyEngine;
pub use error::{ConfigError, InitError, SchemaError};
pub use resolver::{CompatibilityResolver, ProxyRequest};
pub use schema::{ProxySchema, SchemaRegistry};
pub use session::{CompatContext, CompatSession, VersionSource};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for resolver users
    pub use crate::{
        CompatContext, CompatSession, CompatibilityResolver, ProxyEngine, ResolverConfig,
        SchemaError,
    };
    pub use compat_rules::{Assignments, PropertyValue};
    pub use compat_version::CompatibilityVersion;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
