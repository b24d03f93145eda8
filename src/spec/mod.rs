//! Spec-version capability profiles.
//!
//! Each supported CycloneDX version gets one immutable
//! [`SpecVersionProfile`] describing which enum values and document features
//! are legal to emit under that version. Profiles live in an append-only
//! registry: supporting a new version means adding a profile, never editing
//! an existing one.

mod profile;
mod registry;

pub use profile::SpecVersionProfile;
pub use registry::{lookup, profile};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnsupportedSpecVersion;

/// Supported CycloneDX specification versions, oldest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SpecVersion {
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V1_6,
}

impl SpecVersion {
    /// All supported versions, oldest first.
    pub const ALL: [Self; 5] = [Self::V1_2, Self::V1_3, Self::V1_4, Self::V1_5, Self::V1_6];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
            Self::V1_6 => "1.6",
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecVersion {
    type Err = UnsupportedSpecVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.2" => Ok(Self::V1_2),
            "1.3" => Ok(Self::V1_3),
            "1.4" => Ok(Self::V1_4),
            "1.5" => Ok(Self::V1_5),
            "1.6" => Ok(Self::V1_6),
            other => Err(UnsupportedSpecVersion(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_ordered_oldest_first() {
        assert!(SpecVersion::V1_2 < SpecVersion::V1_6);
        let mut sorted = SpecVersion::ALL;
        sorted.sort();
        assert_eq!(sorted, SpecVersion::ALL);
    }

    #[test]
    fn from_str_rejects_unknown_keys() {
        assert_eq!("1.4".parse::<SpecVersion>(), Ok(SpecVersion::V1_4));
        let err = "1.1".parse::<SpecVersion>().unwrap_err();
        assert_eq!(err, UnsupportedSpecVersion("1.1".to_string()));
    }
}
