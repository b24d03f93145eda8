//! Component data structures.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use packageurl::PackageUrl;
use serde::{Deserialize, Serialize};

use super::{
    BomRef, ExternalReference, HashAlgorithm, License, NodeId, OrganizationalEntity, Property,
};

/// Component type classification.
///
/// The full CycloneDX 1.6 value set; which values may actually be emitted is
/// decided per spec version by the active profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    Application,
    Framework,
    #[default]
    Library,
    Container,
    OperatingSystem,
    Device,
    Firmware,
    File,
    Data,
    DeviceDriver,
    MachineLearningModel,
    Platform,
    CryptographicAsset,
}

impl ComponentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::Container => "container",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::Firmware => "firmware",
            Self::File => "file",
            Self::Data => "data",
            Self::DeviceDriver => "device-driver",
            Self::MachineLearningModel => "machine-learning-model",
            Self::Platform => "platform",
            Self::CryptographicAsset => "cryptographic-asset",
        }
    }

    /// Parse a wire value. Returns `None` for strings outside the closed set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "application" => Self::Application,
            "framework" => Self::Framework,
            "library" => Self::Library,
            "container" => Self::Container,
            "operating-system" => Self::OperatingSystem,
            "device" => Self::Device,
            "firmware" => Self::Firmware,
            "file" => Self::File,
            "data" => Self::Data,
            "device-driver" => Self::DeviceDriver,
            "machine-learning-model" => Self::MachineLearningModel,
            "platform" => Self::Platform,
            "cryptographic-asset" => Self::CryptographicAsset,
            _ => return None,
        })
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component scope within the parent application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Required,
    Optional,
    Excluded,
}

impl Scope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Excluded => "excluded",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "required" => Self::Required,
            "optional" => Self::Optional,
            "excluded" => Self::Excluded,
            _ => return None,
        })
    }
}

/// Package URL in canonical string form.
///
/// Constructed only through [`Purl::parse`], so the inner string is always a
/// valid, canonically rendered package-url.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purl(String);

impl Purl {
    pub fn parse(input: &str) -> Result<Self, packageurl::Error> {
        let purl = PackageUrl::from_str(input)?;
        Ok(Self(purl.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Purl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A software component: library, application, container image, ...
///
/// `components` are owning edges into the document graph (nested
/// subcomponents); `dependencies` are non-owning edges naming other nodes'
/// identities, which may be unresolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Owned identity of this component.
    pub bom_ref: BomRef,
    pub component_type: ComponentType,
    pub name: String,
    pub version: Option<String>,
    pub group: Option<String>,
    pub description: Option<String>,
    pub scope: Option<Scope>,
    pub copyright: Option<String>,
    pub cpe: Option<String>,
    pub purl: Option<Purl>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub supplier: Option<OrganizationalEntity>,
    pub licenses: Vec<License>,
    /// Hashes keyed by algorithm; at most one content per algorithm.
    pub hashes: IndexMap<HashAlgorithm, String>,
    pub external_references: Vec<ExternalReference>,
    pub properties: Vec<Property>,
    /// Owned subcomponents.
    pub components: Vec<NodeId>,
    /// Non-owning dependency edges.
    pub dependencies: Vec<NodeId>,
}

impl Component {
    #[must_use]
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        Self {
            component_type,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bom_ref(mut self, value: impl Into<String>) -> Self {
        self.bom_ref = BomRef::new(value);
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_purl(mut self, purl: Purl) -> Self {
        self.purl = Some(purl);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_type_strings_round_trip() {
        for ty in [
            ComponentType::Application,
            ComponentType::Library,
            ComponentType::MachineLearningModel,
            ComponentType::CryptographicAsset,
        ] {
            assert_eq!(ComponentType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(ComponentType::parse("flux-capacitor"), None);
    }

    #[test]
    fn purl_rejects_garbage_and_keeps_canonical_form() {
        assert!(Purl::parse("not a purl").is_err());
        let purl = Purl::parse("pkg:cargo/serde@1.0.200").expect("valid purl");
        assert!(purl.as_str().starts_with("pkg:cargo/serde"));
    }
}
