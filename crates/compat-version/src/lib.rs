//! Compatibility Versions
//!
//! Ordered `(major, minor)` API eras and the half-open ranges rule tables
//! are keyed on.
//!
//! # Example
//!
//! ```rust
//! use compat_version::{CompatibilityVersion, VersionRange};
//!
//! let v: CompatibilityVersion = "5.10".parse().unwrap();
//! assert!(v > CompatibilityVersion::new(5, 9));
//!
//! let range = VersionRange::through(CompatibilityVersion::new(5, 12));
//! assert!(range.contains(v));
//! assert!(!range.contains(CompatibilityVersion::LATEST));
//! ```

#![warn(missing_docs)]

mod error;
mod range;
mod version;

pub use error::VersionError;
pub use range::VersionRange;
pub use version::CompatibilityVersion;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
