//! Compatibility versions
//!
//! Provides [`CompatibilityVersion`], the `(major, minor)` pair naming the API
//! era a script was written against.

use crate::error::VersionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// API era to emulate, ordered by `(major, minor)`
///
/// [`CompatibilityVersion::LATEST`] compares greater than every concrete
/// version, so no version-gated rule ever fires for it.
///
/// # Examples
/// - `"5.10"` → `(5, 10)`
/// - `"5"` → `(5, 0)`
/// - `"latest"` → [`CompatibilityVersion::LATEST`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompatibilityVersion {
    major: u32,
    minor: u32,
}

impl CompatibilityVersion {
    /// Smallest representable version (`0.0`)
    pub const MIN: Self = Self { major: 0, minor: 0 };

    /// Current API, no substitution
    pub const LATEST: Self = Self {
        major: u32::MAX,
        minor: u32::MAX,
    };

    /// Create version from components
    #[inline]
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Major component
    #[inline]
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Minor component
    #[inline]
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Check if this is [`CompatibilityVersion::LATEST`]
    #[inline]
    #[must_use]
    pub const fn is_latest(&self) -> bool {
        self.major == u32::MAX && self.minor == u32::MAX
    }

    /// Smallest version strictly greater than this one
    ///
    /// Used to turn an inclusive bound (`<= 5.12`) into an exclusive one
    /// (`< 5.13`). Saturates at [`CompatibilityVersion::LATEST`].
    #[must_use]
    pub const fn next_minor(&self) -> Self {
        if self.minor < u32::MAX {
            Self::new(self.major, self.minor + 1)
        } else if self.major < u32::MAX {
            Self::new(self.major + 1, 0)
        } else {
            Self::LATEST
        }
    }
}

impl Default for CompatibilityVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl Display for CompatibilityVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_latest() {
            f.write_str("latest")
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl FromStr for CompatibilityVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        if s.eq_ignore_ascii_case("latest") {
            return Ok(Self::LATEST);
        }

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };

        let major = major
            .parse::<u32>()
            .map_err(|source| VersionError::InvalidComponent {
                input: s.to_string(),
                component: "major",
                source,
            })?;
        let minor = minor
            .parse::<u32>()
            .map_err(|source| VersionError::InvalidComponent {
                input: s.to_string(),
                component: "minor",
                source,
            })?;

        let version = Self::new(major, minor);
        if version.is_latest() {
            // u32::MAX.u32::MAX is reserved for the sentinel
            return Err(VersionError::Reserved(s.to_string()));
        }
        Ok(version)
    }
}

impl TryFrom<String> for CompatibilityVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for CompatibilityVersion {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompatibilityVersion> for String {
    fn from(version: CompatibilityVersion) -> Self {
        version.to_string()
    }
}

impl From<(u32, u32)> for CompatibilityVersion {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor)
    }
}

impl PartialEq<(u32, u32)> for CompatibilityVersion {
    fn eq(&self, other: &(u32, u32)) -> bool {
        *self == Self::from(*other)
    }
}

impl PartialOrd<(u32, u32)> for CompatibilityVersion {
    fn partial_cmp(&self, other: &(u32, u32)) -> Option<Ordering> {
        Some(self.cmp(&Self::from(*other)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_major_minor() {
        let v: CompatibilityVersion = "5.10".parse().unwrap();
        assert_eq!(v, CompatibilityVersion::new(5, 10));
        assert_eq!(v.to_string(), "5.10");
    }

    #[test]
    fn test_parse_major_only() {
        let v: CompatibilityVersion = "6".parse().unwrap();
        assert_eq!(v, (6, 0));
    }

    #[test]
    fn test_parse_latest() {
        let v: CompatibilityVersion = " Latest ".parse().unwrap();
        assert!(v.is_latest());
        assert_eq!(v.to_string(), "latest");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "".parse::<CompatibilityVersion>(),
            Err(VersionError::Empty)
        ));
        assert!(matches!(
            "5.x".parse::<CompatibilityVersion>(),
            Err(VersionError::InvalidComponent { component: "minor", .. })
        ));
        assert!(matches!(
            "v5.1".parse::<CompatibilityVersion>(),
            Err(VersionError::InvalidComponent { component: "major", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_sentinel_numbers() {
        let s = format!("{}.{}", u32::MAX, u32::MAX);
        assert!(matches!(
            s.parse::<CompatibilityVersion>(),
            Err(VersionError::Reserved(_))
        ));
    }

    #[test]
    fn test_minor_is_numeric_not_decimal() {
        // 5.9 < 5.10, unlike the floats 5.9 and 5.1
        let a: CompatibilityVersion = "5.9".parse().unwrap();
        let b: CompatibilityVersion = "5.10".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_latest_is_greatest() {
        assert!(CompatibilityVersion::LATEST > CompatibilityVersion::new(999, 999));
        assert_eq!(CompatibilityVersion::default(), CompatibilityVersion::LATEST);
    }

    #[test]
    fn test_next_minor_rolls_over() {
        assert_eq!(CompatibilityVersion::new(5, 12).next_minor(), (5, 13));
        assert_eq!(
            CompatibilityVersion::new(5, u32::MAX).next_minor(),
            CompatibilityVersion::new(6, 0)
        );
        assert!(CompatibilityVersion::LATEST.next_minor().is_latest());
    }

    #[test]
    fn test_compare_with_tuple() {
        let v = CompatibilityVersion::new(5, 11);
        assert!(v < (5, 12));
        assert!(v > (5, 9));
        assert!(v == (5, 11));
    }

    #[test]
    fn test_serde_as_string() {
        let v = CompatibilityVersion::new(5, 13);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"5.13\"");

        let back: CompatibilityVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        let latest: CompatibilityVersion = serde_json::from_str("\"latest\"").unwrap();
        assert!(latest.is_latest());
    }
}
