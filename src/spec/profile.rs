//! The per-version capability table.

use crate::model::{ComponentType, ExternalReferenceType, HashAlgorithm, RatingMethod};

use super::SpecVersion;

/// Immutable capability table for one spec version.
///
/// Every `supports_*` predicate is a pure membership or shape test with no
/// side effects. Instances are constructed once, as statics in the registry,
/// and never mutated.
#[derive(Debug)]
pub struct SpecVersionProfile {
    pub(crate) version: SpecVersion,
    pub(crate) json_schema_url: &'static str,
    pub(crate) xml_namespace: &'static str,
    pub(crate) component_types: &'static [ComponentType],
    pub(crate) hash_algorithms: &'static [HashAlgorithm],
    pub(crate) external_reference_types: &'static [ExternalReferenceType],
    pub(crate) rating_methods: &'static [RatingMethod],
    pub(crate) supports_dependency_graph: bool,
    pub(crate) supports_services: bool,
    pub(crate) supports_properties: bool,
    pub(crate) supports_metadata_licenses: bool,
    pub(crate) supports_metadata_lifecycles: bool,
    pub(crate) supports_external_reference_hashes: bool,
    pub(crate) supports_tool_references: bool,
    pub(crate) supports_vulnerabilities: bool,
    pub(crate) requires_component_version: bool,
}

impl SpecVersionProfile {
    #[must_use]
    pub const fn version(&self) -> SpecVersion {
        self.version
    }

    #[must_use]
    pub const fn json_schema_url(&self) -> &'static str {
        self.json_schema_url
    }

    #[must_use]
    pub const fn xml_namespace(&self) -> &'static str {
        self.xml_namespace
    }

    #[must_use]
    pub fn supports_component_type(&self, component_type: ComponentType) -> bool {
        self.component_types.contains(&component_type)
    }

    #[must_use]
    pub fn supports_hash_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        self.hash_algorithms.contains(&algorithm)
    }

    /// Whether `content` has the shape required for `algorithm`'s family:
    /// the exact hex-digit count for that digest size. Independent of
    /// whether the algorithm itself is supported.
    #[must_use]
    pub fn supports_hash_value(&self, algorithm: HashAlgorithm, content: &str) -> bool {
        content.len() == hash_hex_len(algorithm)
            && content.bytes().all(|b| b.is_ascii_hexdigit())
    }

    #[must_use]
    pub fn supports_external_reference_type(
        &self,
        reference_type: ExternalReferenceType,
    ) -> bool {
        self.external_reference_types.contains(&reference_type)
    }

    #[must_use]
    pub fn supports_rating_method(&self, method: RatingMethod) -> bool {
        self.rating_methods.contains(&method)
    }

    #[must_use]
    pub const fn supports_dependency_graph(&self) -> bool {
        self.supports_dependency_graph
    }

    #[must_use]
    pub const fn supports_services(&self) -> bool {
        self.supports_services
    }

    #[must_use]
    pub const fn supports_properties(&self) -> bool {
        self.supports_properties
    }

    #[must_use]
    pub const fn supports_metadata_licenses(&self) -> bool {
        self.supports_metadata_licenses
    }

    #[must_use]
    pub const fn supports_metadata_lifecycles(&self) -> bool {
        self.supports_metadata_lifecycles
    }

    #[must_use]
    pub const fn supports_external_reference_hashes(&self) -> bool {
        self.supports_external_reference_hashes
    }

    #[must_use]
    pub const fn supports_tool_references(&self) -> bool {
        self.supports_tool_references
    }

    #[must_use]
    pub const fn supports_vulnerabilities(&self) -> bool {
        self.supports_vulnerabilities
    }

    #[must_use]
    pub const fn requires_component_version(&self) -> bool {
        self.requires_component_version
    }
}

/// Hex-digit count of a hash content string, by algorithm digest size.
const fn hash_hex_len(algorithm: HashAlgorithm) -> usize {
    match algorithm {
        HashAlgorithm::Md5 => 32,
        HashAlgorithm::Sha1 => 40,
        HashAlgorithm::Sha256
        | HashAlgorithm::Sha3_256
        | HashAlgorithm::Blake2b256
        | HashAlgorithm::Blake3 => 64,
        HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 | HashAlgorithm::Blake2b384 => 96,
        HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 | HashAlgorithm::Blake2b512 => 128,
    }
}
