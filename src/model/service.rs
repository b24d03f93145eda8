//! Service data structures.

use serde::{Deserialize, Serialize};

use super::{BomRef, ExternalReference, License, NodeId, OrganizationalEntity, Property};

/// A service: an external API, microservice, or other network-reachable
/// capability described by the document.
///
/// Like components, services nest (`services` is an owning edge list) and
/// participate in the dependency graph through non-owning `dependencies`
/// edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Owned identity of this service.
    pub bom_ref: BomRef,
    pub provider: Option<OrganizationalEntity>,
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub endpoints: Vec<String>,
    pub authenticated: Option<bool>,
    pub x_trust_boundary: Option<bool>,
    pub licenses: Vec<License>,
    pub external_references: Vec<ExternalReference>,
    pub properties: Vec<Property>,
    /// Owned subservices.
    pub services: Vec<NodeId>,
    /// Non-owning dependency edges.
    pub dependencies: Vec<NodeId>,
}

impl Service {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
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
}
