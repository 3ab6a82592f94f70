//! PAN-OS software version numbers.
//!
//! A version is `major.minor.patch` with an optional suffix such as `-h3` or
//! `-b1`. Only the numeric part takes part in ordering checks: `9.0.3-h3` is
//! neither newer nor older than `9.0.3`.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A negotiated schema version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    suffix: String,
}

impl Version {
    /// Creates a version without a suffix.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            suffix: String::new(),
        }
    }

    /// Returns a copy of this version carrying the given suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Parses `"10.1.3"`, `"9.0.0-h3"` or `"8.1"` (missing patch is 0).
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let (numbers, suffix) = match s.split_once('-') {
            Some((numbers, suffix)) => (numbers, suffix),
            None => (s, ""),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        let number = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| Error::InvalidVersion(s.to_string()))
        };

        Ok(Self {
            major: number(parts[0])?,
            minor: number(parts[1])?,
            patch: match parts.get(2) {
                Some(part) => number(part)?,
                None => 0,
            },
            suffix: suffix.to_string(),
        })
    }

    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    #[must_use]
    pub const fn patch(&self) -> u32 {
        self.patch
    }

    /// The suffix after the dash, or an empty string.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// `(major, minor, patch)` for comparisons.
    #[must_use]
    pub const fn numeric(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    /// Returns true if this version is at least `other`, ignoring suffixes.
    #[must_use]
    pub fn gte(&self, other: &Version) -> bool {
        self.numeric() >= other.numeric()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.suffix.is_empty() {
            write!(f, "-{}", self.suffix)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Version> for String {
    fn from(v: Version) -> Self {
        v.to_string()
    }
}
