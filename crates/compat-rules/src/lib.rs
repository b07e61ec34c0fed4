//! Compatibility Rules
//!
//! Declarative rule tables mapping legacy proxy names, properties and
//! setting identifiers onto their modern equivalents.
//!
//! # Core Concepts
//!
//! - [`RenameRule`]: legacy proxy name → modern proxy name inside a version range
//! - [`PropertyRemapRule`]: legacy property → one or more modern assignments
//! - [`IdentifierRule`]: threshold-layered string substitution (palettes, ...)
//! - [`RuleSet`]: editable, serializable rules
//! - [`RuleTable`]: validated, indexed rules; only built by [`RuleSet::validate`]
//!
//! # Example
//!
//! ```rust
//! use compat_rules::{RenameRule, RuleSet};
//! use compat_version::{CompatibilityVersion, VersionRange};
//!
//! let table = RuleSet::new()
//!     .with_rename(RenameRule::new(
//!         "GhostCellsGenerator",
//!         "GhostCells",
//!         VersionRange::through(CompatibilityVersion::new(5, 12)),
//!     ))
//!     .validate()
//!     .unwrap();
//!
//! assert_eq!(table.rename_rules("GhostCellsGenerator").len(), 1);
//! ```

#![warn(missing_docs)]

mod assignments;
mod error;
mod identifier;
mod loader;
mod path;
mod property;
mod rename;
mod table;
mod value;

pub use assignments::Assignments;
pub use error::{LoadError, PathError, RuleKind, RuleTableError};
pub use identifier::{IdentifierRule, PALETTE};
pub use loader::{load_file, Format};
pub use path::PropertyPath;
pub use property::{Expansion, PropertyRemapRule, ValueCase};
pub use rename::RenameRule;
pub use table::{RuleSet, RuleTable};
pub use value::{PropertyKind, PropertyValue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for rule authoring
    pub use crate::{
        Assignments, Expansion, IdentifierRule, PropertyPath, PropertyRemapRule, PropertyValue,
        RenameRule, RuleSet, RuleTable, ValueCase,
    };
    pub use compat_version::{CompatibilityVersion, VersionRange};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
