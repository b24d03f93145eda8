//! Document metadata and the small shared structures: tools, organizations,
//! contacts, properties, hashes, and external references.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{License, NodeId};

/// Name/value pair attached to an entity (spec 1.3+).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub timestamp: Option<DateTime<Utc>>,
    /// Lifecycle phases the document covers (spec 1.5+).
    pub lifecycles: Vec<Lifecycle>,
    pub tools: Vec<Tool>,
    pub authors: Vec<OrganizationalContact>,
    /// The component the BOM describes — the dependency-graph entry point.
    pub component: Option<NodeId>,
    pub manufacture: Option<OrganizationalEntity>,
    pub supplier: Option<OrganizationalEntity>,
    pub licenses: Vec<License>,
    pub properties: Vec<Property>,
}

/// A lifecycle entry: either a predefined phase or a named custom phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Phase(LifecyclePhase),
    Named {
        name: String,
        description: Option<String>,
    },
}

/// Predefined lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Design,
    PreBuild,
    Build,
    PostBuild,
    Operations,
    Discovery,
    Decommission,
}

impl LifecyclePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Design => "design",
            Self::PreBuild => "pre-build",
            Self::Build => "build",
            Self::PostBuild => "post-build",
            Self::Operations => "operations",
            Self::Discovery => "discovery",
            Self::Decommission => "decommission",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "design" => Self::Design,
            "pre-build" => Self::PreBuild,
            "build" => Self::Build,
            "post-build" => Self::PostBuild,
            "operations" => Self::Operations,
            "discovery" => Self::Discovery,
            "decommission" => Self::Decommission,
            _ => return None,
        })
    }
}

/// A tool that produced or processed the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub vendor: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub hashes: IndexMap<HashAlgorithm, String>,
    /// Emitted only for spec versions that support tool references.
    pub external_references: Vec<ExternalReference>,
}

impl Tool {
    #[must_use]
    pub fn new(vendor: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            vendor: Some(vendor.into()),
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Organization or supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalEntity {
    pub name: Option<String>,
    pub urls: Vec<String>,
    pub contacts: Vec<OrganizationalContact>,
}

impl OrganizationalEntity {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Contact information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationalContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Hash algorithm. Identical across all supported spec versions; content
/// shape is validated per algorithm family by the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
}

impl HashAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "MD5" => Self::Md5,
            "SHA-1" => Self::Sha1,
            "SHA-256" => Self::Sha256,
            "SHA-384" => Self::Sha384,
            "SHA-512" => Self::Sha512,
            "SHA3-256" => Self::Sha3_256,
            "SHA3-384" => Self::Sha3_384,
            "SHA3-512" => Self::Sha3_512,
            "BLAKE2b-256" => Self::Blake2b256,
            "BLAKE2b-384" => Self::Blake2b384,
            "BLAKE2b-512" => Self::Blake2b512,
            "BLAKE3" => Self::Blake3,
            _ => return None,
        })
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External reference to a resource outside the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalReference {
    pub reference_type: ExternalReferenceType,
    pub url: String,
    pub comment: Option<String>,
    /// Hashes of the referenced content (spec 1.3+).
    pub hashes: IndexMap<HashAlgorithm, String>,
}

impl ExternalReference {
    #[must_use]
    pub fn new(reference_type: ExternalReferenceType, url: impl Into<String>) -> Self {
        Self {
            reference_type,
            url: url.into(),
            comment: None,
            hashes: IndexMap::new(),
        }
    }
}

/// External reference types — the full 1.6 value set. Which values a
/// document may carry is decided by the active profile; `Other` is a literal
/// wire value, not a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalReferenceType {
    Vcs,
    IssueTracker,
    Website,
    Advisories,
    Bom,
    MailingList,
    Social,
    Chat,
    Documentation,
    Support,
    Distribution,
    DistributionIntake,
    License,
    BuildMeta,
    BuildSystem,
    ReleaseNotes,
    SecurityContact,
    ModelCard,
    Log,
    Configuration,
    Evidence,
    Formulation,
    Attestation,
    ThreatModel,
    AdversaryModel,
    RiskAssessment,
    VulnerabilityAssertion,
    ExploitabilityStatement,
    PentestReport,
    StaticAnalysisReport,
    DynamicAnalysisReport,
    RuntimeAnalysisReport,
    ComponentAnalysisReport,
    MaturityReport,
    CertificationReport,
    CodifiedInfrastructure,
    QualityMetrics,
    Poam,
    SourceDistribution,
    ElectronicSignature,
    DigitalSignature,
    Rfc9116,
    Other,
}

impl ExternalReferenceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vcs => "vcs",
            Self::IssueTracker => "issue-tracker",
            Self::Website => "website",
            Self::Advisories => "advisories",
            Self::Bom => "bom",
            Self::MailingList => "mailing-list",
            Self::Social => "social",
            Self::Chat => "chat",
            Self::Documentation => "documentation",
            Self::Support => "support",
            Self::Distribution => "distribution",
            Self::DistributionIntake => "distribution-intake",
            Self::License => "license",
            Self::BuildMeta => "build-meta",
            Self::BuildSystem => "build-system",
            Self::ReleaseNotes => "release-notes",
            Self::SecurityContact => "security-contact",
            Self::ModelCard => "model-card",
            Self::Log => "log",
            Self::Configuration => "configuration",
            Self::Evidence => "evidence",
            Self::Formulation => "formulation",
            Self::Attestation => "attestation",
            Self::ThreatModel => "threat-model",
            Self::AdversaryModel => "adversary-model",
            Self::RiskAssessment => "risk-assessment",
            Self::VulnerabilityAssertion => "vulnerability-assertion",
            Self::ExploitabilityStatement => "exploitability-statement",
            Self::PentestReport => "pentest-report",
            Self::StaticAnalysisReport => "static-analysis-report",
            Self::DynamicAnalysisReport => "dynamic-analysis-report",
            Self::RuntimeAnalysisReport => "runtime-analysis-report",
            Self::ComponentAnalysisReport => "component-analysis-report",
            Self::MaturityReport => "maturity-report",
            Self::CertificationReport => "certification-report",
            Self::CodifiedInfrastructure => "codified-infrastructure",
            Self::QualityMetrics => "quality-metrics",
            Self::Poam => "poam",
            Self::SourceDistribution => "source-distribution",
            Self::ElectronicSignature => "electronic-signature",
            Self::DigitalSignature => "digital-signature",
            Self::Rfc9116 => "rfc-9116",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "vcs" => Self::Vcs,
            "issue-tracker" => Self::IssueTracker,
            "website" => Self::Website,
            "advisories" => Self::Advisories,
            "bom" => Self::Bom,
            "mailing-list" => Self::MailingList,
            "social" => Self::Social,
            "chat" => Self::Chat,
            "documentation" => Self::Documentation,
            "support" => Self::Support,
            "distribution" => Self::Distribution,
            "distribution-intake" => Self::DistributionIntake,
            "license" => Self::License,
            "build-meta" => Self::BuildMeta,
            "build-system" => Self::BuildSystem,
            "release-notes" => Self::ReleaseNotes,
            "security-contact" => Self::SecurityContact,
            "model-card" => Self::ModelCard,
            "log" => Self::Log,
            "configuration" => Self::Configuration,
            "evidence" => Self::Evidence,
            "formulation" => Self::Formulation,
            "attestation" => Self::Attestation,
            "threat-model" => Self::ThreatModel,
            "adversary-model" => Self::AdversaryModel,
            "risk-assessment" => Self::RiskAssessment,
            "vulnerability-assertion" => Self::VulnerabilityAssertion,
            "exploitability-statement" => Self::ExploitabilityStatement,
            "pentest-report" => Self::PentestReport,
            "static-analysis-report" => Self::StaticAnalysisReport,
            "dynamic-analysis-report" => Self::DynamicAnalysisReport,
            "runtime-analysis-report" => Self::RuntimeAnalysisReport,
            "component-analysis-report" => Self::ComponentAnalysisReport,
            "maturity-report" => Self::MaturityReport,
            "certification-report" => Self::CertificationReport,
            "codified-infrastructure" => Self::CodifiedInfrastructure,
            "quality-metrics" => Self::QualityMetrics,
            "poam" => Self::Poam,
            "source-distribution" => Self::SourceDistribution,
            "electronic-signature" => Self::ElectronicSignature,
            "digital-signature" => Self::DigitalSignature,
            "rfc-9116" => Self::Rfc9116,
            "other" => Self::Other,
            _ => return None,
        })
    }
}

impl fmt::Display for ExternalReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_algorithm_wire_names_round_trip() {
        for alg in [
            HashAlgorithm::Md5,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha3_512,
            HashAlgorithm::Blake2b384,
            HashAlgorithm::Blake3,
        ] {
            assert_eq!(HashAlgorithm::parse(alg.as_str()), Some(alg));
        }
        // wire names are case-sensitive
        assert_eq!(HashAlgorithm::parse("sha-256"), None);
    }

    #[test]
    fn external_reference_type_other_is_a_literal() {
        assert_eq!(
            ExternalReferenceType::parse("other"),
            Some(ExternalReferenceType::Other)
        );
        assert_eq!(ExternalReferenceType::parse("homepage"), None);
    }
}
