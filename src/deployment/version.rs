//! Four-part application versions.
//!
//! Versions have the shape `major[.minor[.build[.revision]]]`. Components
//! after `major` are optional, and an absent component sorts below any
//! present value at the same position, so `1.0 < 1.0.0 < 1.0.0.0`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::VersionParseError;

/// An ordered numeric version with up to four components.
///
/// Field order matters: the derived ordering compares `major`, then `minor`,
/// `build` and `revision`, with `None` sorting first.
///
/// # Example
///
/// ```
/// use deployinfo::deployment::Version;
///
/// let current: Version = "1.1.9.9".parse().unwrap();
/// let latest: Version = "1.2.0.0".parse().unwrap();
/// assert!(latest > current);
/// assert_eq!(latest.to_string(), "1.2.0.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    major: u32,
    minor: Option<u32>,
    build: Option<u32>,
    revision: Option<u32>,
}

impl Version {
    /// Create a full four-part version.
    pub fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            build: Some(build),
            revision: Some(revision),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> Option<u32> {
        self.minor
    }

    pub fn build(&self) -> Option<u32> {
        self.build
    }

    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Number of components present (1 to 4).
    pub fn component_count(&self) -> usize {
        1 + [self.minor, self.build, self.revision]
            .iter()
            .filter(|c| c.is_some())
            .count()
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| VersionParseError {
            input: s.to_string(),
            reason,
        };

        let mut components = [None; 4];
        let mut count = 0;

        for part in s.split('.') {
            if count == components.len() {
                return Err(fail("more than four components"));
            }
            if part.is_empty() {
                return Err(fail("empty component"));
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail("component is not a non-negative integer"));
            }
            let value = part
                .parse::<u32>()
                .map_err(|_| fail("component is out of range"))?;
            components[count] = Some(value);
            count += 1;
        }

        let [major, minor, build, revision] = components;
        Ok(Self {
            major: major.ok_or_else(|| fail("empty component"))?,
            minor,
            build,
            revision,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        for component in [self.minor, self.build, self.revision].into_iter().flatten() {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
