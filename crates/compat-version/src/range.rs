//! Half-open version ranges
//!
//! Provides [`VersionRange`], the `[introduced_in, removed_in)` window during
//! which a legacy name must be translated.

use crate::error::VersionError;
use crate::version::CompatibilityVersion;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Non-empty half-open range `[start, end)` of compatibility versions
///
/// Deserializes from either explicit bounds or the `through` shorthand used
/// for simple deprecations:
///
/// ```toml
/// introduced_in = "5.0"
/// removed_in = "5.13"
/// ```
///
/// ```toml
/// through = "5.12"   # same as [0.0, 5.13)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct VersionRange {
    start: CompatibilityVersion,
    end: CompatibilityVersion,
}

impl VersionRange {
    /// Create range `[start, end)`
    ///
    /// # Errors
    /// Returns [`VersionError::EmptyRange`] if `start >= end`
    pub fn new(start: CompatibilityVersion, end: CompatibilityVersion) -> Result<Self, VersionError> {
        if start >= end {
            return Err(VersionError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Every version `<= last`
    #[must_use]
    pub fn through(last: CompatibilityVersion) -> Self {
        Self {
            start: CompatibilityVersion::MIN,
            end: last.next_minor(),
        }
    }

    /// Every version `< end`
    ///
    /// # Errors
    /// Returns [`VersionError::EmptyRange`] if `end` is `0.0`
    pub fn before(end: CompatibilityVersion) -> Result<Self, VersionError> {
        Self::new(CompatibilityVersion::MIN, end)
    }

    /// Inclusive lower bound
    #[inline]
    #[must_use]
    pub fn introduced_in(&self) -> CompatibilityVersion {
        self.start
    }

    /// Exclusive upper bound
    ///
    /// Doubles as the rule's threshold when ordering chained rules.
    #[inline]
    #[must_use]
    pub fn removed_in(&self) -> CompatibilityVersion {
        self.end
    }

    /// Check if `version` falls inside the range
    #[inline]
    #[must_use]
    pub fn contains(&self, version: CompatibilityVersion) -> bool {
        self.start <= version && version < self.end
    }

    /// Check if two ranges share at least one version
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Display for VersionRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Wire form of [`VersionRange`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    introduced_in: Option<CompatibilityVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    removed_in: Option<CompatibilityVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    through: Option<CompatibilityVersion>,
}

impl TryFrom<RawRange> for VersionRange {
    type Error = VersionError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        match (raw.removed_in, raw.through) {
            (Some(end), None) => {
                Self::new(raw.introduced_in.unwrap_or(CompatibilityVersion::MIN), end)
            }
            (None, Some(last)) => match raw.introduced_in {
                Some(start) => Self::new(start, last.next_minor()),
                None => Ok(Self::through(last)),
            },
            (Some(_), Some(_)) => Err(VersionError::ConflictingBounds),
            (None, None) => Err(VersionError::MissingUpperBound),
        }
    }
}

impl From<VersionRange> for RawRange {
    fn from(range: VersionRange) -> Self {
        Self {
            introduced_in: Some(range.start),
            removed_in: Some(range.end),
            through: None,
        }
    }
}
