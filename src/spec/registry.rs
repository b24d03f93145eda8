//! Append-only registry of spec-version profiles.
//!
//! One static profile per supported version, each with its own explicit
//! capability tables. Supporting a new spec version means appending a new
//! profile and tables; existing entries are never modified.

use crate::error::UnsupportedSpecVersion;
use crate::model::{ComponentType, ExternalReferenceType, HashAlgorithm, RatingMethod};

use super::{SpecVersion, SpecVersionProfile};

/// Look up the profile for a version string, e.g. `"1.5"`.
pub fn lookup(version: &str) -> Result<&'static SpecVersionProfile, UnsupportedSpecVersion> {
    let version: SpecVersion = version.parse()?;
    Ok(profile(version))
}

/// The profile for a known version.
#[must_use]
pub fn profile(version: SpecVersion) -> &'static SpecVersionProfile {
    match version {
        SpecVersion::V1_2 => &PROFILE_V1_2,
        SpecVersion::V1_3 => &PROFILE_V1_3,
        SpecVersion::V1_4 => &PROFILE_V1_4,
        SpecVersion::V1_5 => &PROFILE_V1_5,
        SpecVersion::V1_6 => &PROFILE_V1_6,
    }
}

// ---------------------------------------------------------------------------
// Component types
// ---------------------------------------------------------------------------

const COMPONENT_TYPES_V1_2: &[ComponentType] = &[
    ComponentType::Application,
    ComponentType::Framework,
    ComponentType::Library,
    ComponentType::Container,
    ComponentType::OperatingSystem,
    ComponentType::Device,
    ComponentType::Firmware,
    ComponentType::File,
];

const COMPONENT_TYPES_V1_3: &[ComponentType] = COMPONENT_TYPES_V1_2;

const COMPONENT_TYPES_V1_4: &[ComponentType] = COMPONENT_TYPES_V1_2;

const COMPONENT_TYPES_V1_5: &[ComponentType] = &[
    ComponentType::Application,
    ComponentType::Framework,
    ComponentType::Library,
    ComponentType::Container,
    ComponentType::OperatingSystem,
    ComponentType::Device,
    ComponentType::Firmware,
    ComponentType::File,
    ComponentType::Data,
    ComponentType::DeviceDriver,
    ComponentType::MachineLearningModel,
    ComponentType::Platform,
];

const COMPONENT_TYPES_V1_6: &[ComponentType] = &[
    ComponentType::Application,
    ComponentType::Framework,
    ComponentType::Library,
    ComponentType::Container,
    ComponentType::OperatingSystem,
    ComponentType::Device,
    ComponentType::Firmware,
    ComponentType::File,
    ComponentType::Data,
    ComponentType::DeviceDriver,
    ComponentType::MachineLearningModel,
    ComponentType::Platform,
    ComponentType::CryptographicAsset,
];

// ---------------------------------------------------------------------------
// Hash algorithms — identical in 1.2 through 1.6
// ---------------------------------------------------------------------------

const HASH_ALGORITHMS: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_384,
    HashAlgorithm::Sha3_512,
    HashAlgorithm::Blake2b256,
    HashAlgorithm::Blake2b384,
    HashAlgorithm::Blake2b512,
    HashAlgorithm::Blake3,
];

// ---------------------------------------------------------------------------
// External reference types
// ---------------------------------------------------------------------------

const EXTERNAL_REFERENCE_TYPES_V1_2: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::Other,
];

const EXTERNAL_REFERENCE_TYPES_V1_3: &[ExternalReferenceType] = EXTERNAL_REFERENCE_TYPES_V1_2;

const EXTERNAL_REFERENCE_TYPES_V1_4: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::ReleaseNotes,
    ExternalReferenceType::Other,
];

const EXTERNAL_REFERENCE_TYPES_V1_5: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::DistributionIntake,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::ReleaseNotes,
    ExternalReferenceType::SecurityContact,
    ExternalReferenceType::ModelCard,
    ExternalReferenceType::Log,
    ExternalReferenceType::Configuration,
    ExternalReferenceType::Evidence,
    ExternalReferenceType::Formulation,
    ExternalReferenceType::Attestation,
    ExternalReferenceType::ThreatModel,
    ExternalReferenceType::AdversaryModel,
    ExternalReferenceType::RiskAssessment,
    ExternalReferenceType::VulnerabilityAssertion,
    ExternalReferenceType::ExploitabilityStatement,
    ExternalReferenceType::PentestReport,
    ExternalReferenceType::StaticAnalysisReport,
    ExternalReferenceType::DynamicAnalysisReport,
    ExternalReferenceType::RuntimeAnalysisReport,
    ExternalReferenceType::ComponentAnalysisReport,
    ExternalReferenceType::MaturityReport,
    ExternalReferenceType::CertificationReport,
    ExternalReferenceType::CodifiedInfrastructure,
    ExternalReferenceType::QualityMetrics,
    ExternalReferenceType::Poam,
    ExternalReferenceType::Other,
];

const EXTERNAL_REFERENCE_TYPES_V1_6: &[ExternalReferenceType] = &[
    ExternalReferenceType::Vcs,
    ExternalReferenceType::IssueTracker,
    ExternalReferenceType::Website,
    ExternalReferenceType::Advisories,
    ExternalReferenceType::Bom,
    ExternalReferenceType::MailingList,
    ExternalReferenceType::Social,
    ExternalReferenceType::Chat,
    ExternalReferenceType::Documentation,
    ExternalReferenceType::Support,
    ExternalReferenceType::Distribution,
    ExternalReferenceType::DistributionIntake,
    ExternalReferenceType::License,
    ExternalReferenceType::BuildMeta,
    ExternalReferenceType::BuildSystem,
    ExternalReferenceType::ReleaseNotes,
    ExternalReferenceType::SecurityContact,
    ExternalReferenceType::ModelCard,
    ExternalReferenceType::Log,
    ExternalReferenceType::Configuration,
    ExternalReferenceType::Evidence,
    ExternalReferenceType::Formulation,
    ExternalReferenceType::Attestation,
    ExternalReferenceType::ThreatModel,
    ExternalReferenceType::AdversaryModel,
    ExternalReferenceType::RiskAssessment,
    ExternalReferenceType::VulnerabilityAssertion,
    ExternalReferenceType::ExploitabilityStatement,
    ExternalReferenceType::PentestReport,
    ExternalReferenceType::StaticAnalysisReport,
    ExternalReferenceType::DynamicAnalysisReport,
    ExternalReferenceType::RuntimeAnalysisReport,
    ExternalReferenceType::ComponentAnalysisReport,
    ExternalReferenceType::MaturityReport,
    ExternalReferenceType::CertificationReport,
    ExternalReferenceType::CodifiedInfrastructure,
    ExternalReferenceType::QualityMetrics,
    ExternalReferenceType::Poam,
    ExternalReferenceType::SourceDistribution,
    ExternalReferenceType::ElectronicSignature,
    ExternalReferenceType::DigitalSignature,
    ExternalReferenceType::Rfc9116,
    ExternalReferenceType::Other,
];

// ---------------------------------------------------------------------------
// Vulnerability rating methods
// ---------------------------------------------------------------------------

const RATING_METHODS_NONE: &[RatingMethod] = &[];

const RATING_METHODS_V1_4: &[RatingMethod] = &[
    RatingMethod::CvssV2,
    RatingMethod::CvssV3,
    RatingMethod::CvssV31,
    RatingMethod::Owasp,
    RatingMethod::Other,
];

const RATING_METHODS_V1_5: &[RatingMethod] = &[
    RatingMethod::CvssV2,
    RatingMethod::CvssV3,
    RatingMethod::CvssV31,
    RatingMethod::CvssV4,
    RatingMethod::Owasp,
    RatingMethod::Ssvc,
    RatingMethod::Other,
];

const RATING_METHODS_V1_6: &[RatingMethod] = RATING_METHODS_V1_5;

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

static PROFILE_V1_2: SpecVersionProfile = SpecVersionProfile {
    version: SpecVersion::V1_2,
    json_schema_url: "http://cyclonedx.org/schema/bom-1.2.schema.json",
    xml_namespace: "http://cyclonedx.org/schema/bom/1.2",
    component_types: COMPONENT_TYPES_V1_2,
    hash_algorithms: HASH_ALGORITHMS,
    external_reference_types: EXTERNAL_REFERENCE_TYPES_V1_2,
    rating_methods: RATING_METHODS_NONE,
    supports_dependency_graph: true,
    supports_services: true,
    supports_properties: false,
    supports_metadata_licenses: false,
    supports_metadata_lifecycles: false,
    supports_external_reference_hashes: false,
    supports_tool_references: false,
    supports_vulnerabilities: false,
    requires_component_version: true,
};

static PROFILE_V1_3: SpecVersionProfile = SpecVersionProfile {
    version: SpecVersion::V1_3,
    json_schema_url: "http://cyclonedx.org/schema/bom-1.3.schema.json",
    xml_namespace: "http://cyclonedx.org/schema/bom/1.3",
    component_types: COMPONENT_TYPES_V1_3,
    hash_algorithms: HASH_ALGORITHMS,
    external_reference_types: EXTERNAL_REFERENCE_TYPES_V1_3,
    rating_methods: RATING_METHODS_NONE,
    supports_dependency_graph: true,
    supports_services: true,
    supports_properties: true,
    supports_metadata_licenses: true,
    supports_metadata_lifecycles: false,
    supports_external_reference_hashes: true,
    supports_tool_references: false,
    supports_vulnerabilities: false,
    requires_component_version: true,
};

static PROFILE_V1_4: SpecVersionProfile = SpecVersionProfile {
    version: SpecVersion::V1_4,
    json_schema_url: "http://cyclonedx.org/schema/bom-1.4.schema.json",
    xml_namespace: "http://cyclonedx.org/schema/bom/1.4",
    component_types: COMPONENT_TYPES_V1_4,
    hash_algorithms: HASH_ALGORITHMS,
    external_reference_types: EXTERNAL_REFERENCE_TYPES_V1_4,
    rating_methods: RATING_METHODS_V1_4,
    supports_dependency_graph: true,
    supports_services: true,
    supports_properties: true,
    supports_metadata_licenses: true,
    supports_metadata_lifecycles: false,
    supports_external_reference_hashes: true,
    supports_tool_references: false,
    supports_vulnerabilities: true,
    requires_component_version: false,
};

static PROFILE_V1_5: SpecVersionProfile = SpecVersionProfile {
    version: SpecVersion::V1_5,
    json_schema_url: "http://cyclonedx.org/schema/bom-1.5.schema.json",
    xml_namespace: "http://cyclonedx.org/schema/bom/1.5",
    component_types: COMPONENT_TYPES_V1_5,
    hash_algorithms: HASH_ALGORITHMS,
    external_reference_types: EXTERNAL_REFERENCE_TYPES_V1_5,
    rating_methods: RATING_METHODS_V1_5,
    supports_dependency_graph: true,
    supports_services: true,
    supports_properties: true,
    supports_metadata_licenses: true,
    supports_metadata_lifecycles: true,
    supports_external_reference_hashes: true,
    supports_tool_references: true,
    supports_vulnerabilities: true,
    requires_component_version: false,
};

static PROFILE_V1_6: SpecVersionProfile = SpecVersionProfile {
    version: SpecVersion::V1_6,
    json_schema_url: "http://cyclonedx.org/schema/bom-1.6.schema.json",
    xml_namespace: "http://cyclonedx.org/schema/bom/1.6",
    component_types: COMPONENT_TYPES_V1_6,
    hash_algorithms: HASH_ALGORITHMS,
    external_reference_types: EXTERNAL_REFERENCE_TYPES_V1_6,
    rating_methods: RATING_METHODS_V1_6,
    supports_dependency_graph: true,
    supports_services: true,
    supports_properties: true,
    supports_metadata_licenses: true,
    supports_metadata_lifecycles: true,
    supports_external_reference_hashes: true,
    supports_tool_references: true,
    supports_vulnerabilities: true,
    requires_component_version: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_version_string() {
        let p = lookup("1.5").expect("1.5 is registered");
        assert_eq!(p.version(), SpecVersion::V1_5);
        assert!(lookup("1.1").is_err());
        assert!(lookup("2.0").is_err());
    }

    #[test]
    fn every_version_resolves_to_its_own_profile() {
        for version in SpecVersion::ALL {
            assert_eq!(profile(version).version(), version);
        }
    }

    #[test]
    fn component_type_matrix_spot_checks() {
        assert!(!profile(SpecVersion::V1_4)
            .supports_component_type(ComponentType::MachineLearningModel));
        assert!(profile(SpecVersion::V1_5)
            .supports_component_type(ComponentType::MachineLearningModel));
        assert!(!profile(SpecVersion::V1_5)
            .supports_component_type(ComponentType::CryptographicAsset));
        assert!(profile(SpecVersion::V1_6)
            .supports_component_type(ComponentType::CryptographicAsset));
        for version in SpecVersion::ALL {
            assert!(profile(version).supports_component_type(ComponentType::Library));
        }
    }

    #[test]
    fn external_reference_matrix_spot_checks() {
        assert!(!profile(SpecVersion::V1_3)
            .supports_external_reference_type(ExternalReferenceType::ReleaseNotes));
        assert!(profile(SpecVersion::V1_4)
            .supports_external_reference_type(ExternalReferenceType::ReleaseNotes));
        assert!(!profile(SpecVersion::V1_4)
            .supports_external_reference_type(ExternalReferenceType::SecurityContact));
        assert!(profile(SpecVersion::V1_5)
            .supports_external_reference_type(ExternalReferenceType::SecurityContact));
        assert!(!profile(SpecVersion::V1_5)
            .supports_external_reference_type(ExternalReferenceType::Rfc9116));
        assert!(profile(SpecVersion::V1_6)
            .supports_external_reference_type(ExternalReferenceType::Rfc9116));
    }

    #[test]
    fn rating_method_matrix_spot_checks() {
        assert!(!profile(SpecVersion::V1_3).supports_rating_method(RatingMethod::CvssV31));
        assert!(profile(SpecVersion::V1_4).supports_rating_method(RatingMethod::CvssV31));
        assert!(!profile(SpecVersion::V1_4).supports_rating_method(RatingMethod::CvssV4));
        assert!(profile(SpecVersion::V1_5).supports_rating_method(RatingMethod::Ssvc));
    }

    #[test]
    fn feature_flag_matrix_spot_checks() {
        assert!(!profile(SpecVersion::V1_2).supports_properties());
        assert!(profile(SpecVersion::V1_3).supports_properties());
        assert!(profile(SpecVersion::V1_3).requires_component_version());
        assert!(!profile(SpecVersion::V1_4).requires_component_version());
        assert!(!profile(SpecVersion::V1_4).supports_tool_references());
        assert!(profile(SpecVersion::V1_5).supports_tool_references());
        assert!(!profile(SpecVersion::V1_4).supports_metadata_lifecycles());
        assert!(profile(SpecVersion::V1_5).supports_metadata_lifecycles());
    }
}
