//! Engine seam
//!
//! The resolver never constructs anything itself. It hands the resolved name
//! and assignments to a [`ProxyEngine`] and returns whatever the engine
//! returns, errors included.

use compat_rules::Assignments;
use std::collections::HashSet;

/// Proxy construction backend
pub trait ProxyEngine {
    /// Constructed proxy
    type Handle;

    /// Engine failure (unknown proxy, bad value, ...)
    type Error: std::error::Error;

    /// Construct a proxy from its concrete name and modern assignments
    ///
    /// # Errors
    /// Returns the engine's own error; callers forward it unchanged
    fn construct_proxy(
        &self,
        name: &str,
        assignments: &Assignments,
    ) -> Result<Self::Handle, Self::Error>;

    /// Identifiers the engine accepts for a category
    ///
    /// `None` means the engine does not enumerate this category.
    fn known_identifiers(&self, _category: &str) -> Option<HashSet<String>> {
        None
    }
}

impl<E: ProxyEngine + ?Sized> ProxyEngine for &E {
    type Handle = E::Handle;
    type Error = E::Error;

    fn construct_proxy(
        &self,
        name: &str,
        assignments: &Assignments,
    ) -> Result<Self::Handle, Self::Error> {
        (**self).construct_proxy(name, assignments)
    }

    fn known_identifiers(&self, category: &str) -> Option<HashSet<String>> {
        (**self).known_identifiers(category)
    }
}
