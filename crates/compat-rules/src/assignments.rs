//! Ordered property assignments
//!
//! Provides [`Assignments`], the explicit `path → value` mapping a caller
//! hands to proxy construction.

use crate::error::PathError;
use crate::path::PropertyPath;
use crate::value::PropertyValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered property assignments
///
/// Setting an existing path keeps its position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignments(IndexMap<PropertyPath, PropertyValue>);

impl Assignments {
    /// Create empty assignment set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert from a dotted path string
    ///
    /// # Errors
    /// Returns error if `path` is not a valid property path
    pub fn with(mut self, path: &str, value: impl Into<PropertyValue>) -> Result<Self, PathError> {
        self.set(path.parse()?, value.into());
        Ok(self)
    }

    /// Set a property, returning the previous value
    #[inline]
    pub fn set(&mut self, path: PropertyPath, value: PropertyValue) -> Option<PropertyValue> {
        self.0.insert(path, value)
    }

    /// Get value by path
    #[inline]
    #[must_use]
    pub fn get(&self, path: &PropertyPath) -> Option<&PropertyValue> {
        self.0.get(path)
    }

    /// Get value by dotted path string
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(p, _)| *p == path).map(|(_, v)| v)
    }

    /// Check if a path is assigned
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &PropertyPath) -> bool {
        self.0.contains_key(path)
    }

    /// Replace one assignment, in place, with zero or more others
    ///
    /// Replacements land where `path` was. A replacement naming a path that
    /// is already assigned overwrites that value wherever it sits: an earlier
    /// assignment keeps its position, a later one is dropped. Returns the
    /// removed value, or `None` (and leaves `self` untouched) if `path` was
    /// not assigned.
    pub fn splice(
        &mut self,
        path: &PropertyPath,
        replacements: impl IntoIterator<Item = (PropertyPath, PropertyValue)>,
    ) -> Option<PropertyValue> {
        let index = self.0.get_index_of(path)?;
        let mut replacements: IndexMap<PropertyPath, PropertyValue> =
            replacements.into_iter().collect();
        let old = std::mem::take(&mut self.0);

        let mut removed = None;
        for (i, (key, value)) in old.into_iter().enumerate() {
            if i < index {
                self.0.insert(key, value);
            } else if i == index {
                removed = Some(value);
                self.0.extend(std::mem::take(&mut replacements));
            } else if !self.0.contains_key(&key) {
                self.0.insert(key, value);
            }
        }
        removed
    }

    /// Number of assignments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no property is assigned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&PropertyPath, &PropertyValue)> {
        self.0.iter()
    }

    /// Iterate over assigned paths in insertion order
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &PropertyPath> {
        self.0.keys()
    }
}

impl FromIterator<(PropertyPath, PropertyValue)> for Assignments {
    fn from_iter<I: IntoIterator<Item = (PropertyPath, PropertyValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Assignments {
    type Item = (PropertyPath, PropertyValue);
    type IntoIter = indexmap::map::IntoIter<PropertyPath, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Assignments {
    type Item = (&'a PropertyPath, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, PropertyPath, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PropertyPath {
        s.parse().unwrap()
    }

    #[test]
    fn test_with_keeps_order() {
        let a = Assignments::new()
            .with("B", 1)
            .unwrap()
            .with("A", 2)
            .unwrap();
        let order: Vec<String> = a.paths().map(ToString::to_string).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_with_rejects_bad_path() {
        assert!(Assignments::new().with("a..b", 1).is_err());
    }

    #[test]
    fn test_lookup_by_str() {
        let a = Assignments::new().with("Plane.Normal", [0.0, 0.0, 1.0]).unwrap();
        assert_eq!(
            a.lookup("Plane.Normal"),
            Some(&PropertyValue::Vector(vec![0.0, 0.0, 1.0]))
        );
        assert!(a.lookup("Plane").is_none());
    }

    #[test]
    fn test_splice_in_place() {
        let mut a = Assignments::new()
            .with("Input", "src")
            .unwrap()
            .with("MergePoints", 1)
            .unwrap()
            .with("Triangulate", true)
            .unwrap();

        let removed = a.splice(
            &p("MergePoints"),
            [(p("Locator"), PropertyValue::from("Uniform Binning"))],
        );

        assert_eq!(removed, Some(PropertyValue::Int(1)));
        let order: Vec<String> = a.paths().map(ToString::to_string).collect();
        assert_eq!(order, vec!["Input", "Locator", "Triangulate"]);
    }

    #[test]
    fn test_splice_missing_is_noop() {
        let mut a = Assignments::new().with("Input", "src").unwrap();
        let before = a.clone();
        assert!(a.splice(&p("MergePoints"), Vec::new()).is_none());
        assert_eq!(a, before);
    }

    #[test]
    fn test_splice_onto_existing_key_overwrites() {
        let mut a = Assignments::new()
            .with("Locator", "Octree Binning")
            .unwrap()
            .with("MergePoints", 0)
            .unwrap();

        a.splice(
            &p("MergePoints"),
            [(p("Locator"), PropertyValue::from("Not Merging Points"))],
        );

        assert_eq!(a.len(), 1);
        assert_eq!(a.lookup("Locator"), Some(&PropertyValue::from("Not Merging Points")));
    }

    #[test]
    fn test_splice_onto_later_key_overwrites() {
        let mut a = Assignments::new()
            .with("MergePoints", 0)
            .unwrap()
            .with("Triangulate", true)
            .unwrap()
            .with("Locator", "Octree Binning")
            .unwrap();

        a.splice(
            &p("MergePoints"),
            [(p("Locator"), PropertyValue::from("Not Merging Points"))],
        );

        let order: Vec<String> = a.paths().map(ToString::to_string).collect();
        assert_eq!(order, vec!["Locator", "Triangulate"]);
        assert_eq!(a.lookup("Locator"), Some(&PropertyValue::from("Not Merging Points")));
    }
}
