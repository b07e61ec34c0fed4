//! Typed property values
//!
//! Provides [`PropertyValue`], the tagged value a caller assigns to a proxy
//! property, and [`PropertyKind`], the type a schema declares for it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Value assigned to a proxy property
///
/// Deserializes untagged, so rule and schema files write plain literals:
/// `true`, `0`, `2.5`, `"Uniform Binning"`, `[0, 1, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Boolean flag
    Bool(bool),
    /// Integer (also legacy enumeration codes)
    Int(i64),
    /// Floating point scalar
    Double(f64),
    /// String, also used to select a named sub-proxy
    Text(String),
    /// Fixed-width numeric tuple
    Vector(Vec<f64>),
}

impl PropertyValue {
    /// Kind of this value
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::Int(_) => PropertyKind::Int,
            Self::Double(_) => PropertyKind::Double,
            Self::Text(_) => PropertyKind::Text,
            Self::Vector(_) => PropertyKind::Vector,
        }
    }

    /// Numeric view of scalar values; booleans count as 0/1
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            Self::Text(_) | Self::Vector(_) => None,
        }
    }

    /// String view of text values
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Equality that ignores the numeric representation
    ///
    /// `Int(1)`, `Double(1.0)` and `Bool(true)` are all equal; scripts wrote
    /// flags as either booleans or 0/1.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Vector(a), Self::Vector(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Vector(v) => {
                f.write_str("[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{x}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(value: Vec<f64>) -> Self {
        Self::Vector(value)
    }
}

impl<const N: usize> From<[f64; N]> for PropertyValue {
    fn from(value: [f64; N]) -> Self {
        Self::Vector(value.to_vec())
    }
}

/// Declared type of a property in a proxy schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    /// Boolean flag
    Bool,
    /// Integer
    Int,
    /// Floating point scalar
    Double,
    /// String or sub-proxy selection
    Text,
    /// Numeric tuple
    Vector,
}

impl PropertyKind {
    /// Check if a value may be assigned to a property of this kind
    ///
    /// Integers widen to doubles; booleans and integers are interchangeable.
    #[must_use]
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        matches!(
            (self, value),
            (Self::Bool | Self::Int, PropertyValue::Bool(_) | PropertyValue::Int(_))
                | (Self::Double, PropertyValue::Int(_) | PropertyValue::Double(_))
                | (Self::Text, PropertyValue::Text(_))
                | (Self::Vector, PropertyValue::Vector(_))
        )
    }
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Double => "double",
            Self::Text => "text",
            Self::Vector => "vector",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged_literals() {
        let values: Vec<PropertyValue> =
            serde_json::from_str(r#"[true, 7, 2.5, "Uniform Binning", [0, 1, 0]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PropertyValue::Bool(true),
                PropertyValue::Int(7),
                PropertyValue::Double(2.5),
                PropertyValue::Text("Uniform Binning".into()),
                PropertyValue::Vector(vec![0.0, 1.0, 0.0]),
            ]
        );
    }

    #[test]
    fn test_loose_numeric_equality() {
        assert!(PropertyValue::Int(1).loosely_eq(&PropertyValue::Bool(true)));
        assert!(PropertyValue::Double(0.0).loosely_eq(&PropertyValue::Int(0)));
        assert!(!PropertyValue::Int(2).loosely_eq(&PropertyValue::Bool(true)));
        assert!(!PropertyValue::Text("1".into()).loosely_eq(&PropertyValue::Int(1)));
    }

    #[test]
    fn test_kind_acceptance() {
        assert!(PropertyKind::Double.accepts(&PropertyValue::Int(3)));
        assert!(PropertyKind::Bool.accepts(&PropertyValue::Int(0)));
        assert!(!PropertyKind::Int.accepts(&PropertyValue::Double(0.5)));
        assert!(!PropertyKind::Vector.accepts(&PropertyValue::Double(2.0)));
        assert!(PropertyKind::Text.accepts(&PropertyValue::from("x")));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyValue::from([0.0, 1.0, 0.0]).to_string(), "[0, 1, 0]");
        assert_eq!(PropertyValue::from("a").to_string(), "\"a\"");
        assert_eq!(PropertyKind::Vector.to_string(), "vector");
    }
}
