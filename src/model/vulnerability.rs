//! Vulnerability data structures (spec 1.4+).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity classification used by vulnerability ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
    None,
    Unknown,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "info" => Self::Info,
            "none" => Self::None,
            "unknown" => Self::Unknown,
            _ => return None,
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rating methodology. `Other` is a literal wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingMethod {
    CvssV2,
    CvssV3,
    CvssV31,
    CvssV4,
    Owasp,
    Ssvc,
    Other,
}

impl RatingMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CvssV2 => "CVSSv2",
            Self::CvssV3 => "CVSSv3",
            Self::CvssV31 => "CVSSv31",
            Self::CvssV4 => "CVSSv4",
            Self::Owasp => "OWASP",
            Self::Ssvc => "SSVC",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "CVSSv2" => Self::CvssV2,
            "CVSSv3" => Self::CvssV3,
            "CVSSv31" => Self::CvssV31,
            "CVSSv4" => Self::CvssV4,
            "OWASP" => Self::Owasp,
            "SSVC" => Self::Ssvc,
            "other" => Self::Other,
            _ => return None,
        })
    }
}

/// Where a vulnerability was published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilitySource {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// One score assigned to a vulnerability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRating {
    pub score: Option<f64>,
    pub severity: Option<Severity>,
    pub method: Option<RatingMethod>,
    pub vector: Option<String>,
}

/// A known vulnerability affecting components of the document.
///
/// `affects` entries are plain ref strings; vulnerabilities reference
/// components by identity value but do not participate in identity
/// discrimination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub bom_ref: Option<String>,
    pub id: Option<String>,
    pub source: Option<VulnerabilitySource>,
    pub description: Option<String>,
    pub detail: Option<String>,
    pub recommendation: Option<String>,
    pub ratings: Vec<VulnerabilityRating>,
    pub cwes: Vec<u32>,
    pub affects: Vec<String>,
}

impl Vulnerability {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_method_wire_names_are_case_sensitive() {
        assert_eq!(RatingMethod::parse("CVSSv31"), Some(RatingMethod::CvssV31));
        assert_eq!(RatingMethod::parse("cvssv31"), None);
        assert_eq!(RatingMethod::parse("other"), Some(RatingMethod::Other));
    }
}
