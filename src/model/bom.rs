//! The root BOM aggregate.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::InvalidSerialNumber;

use super::{Metadata, NodeGraph, NodeId, Vulnerability};

static URN_UUID: OnceLock<Regex> = OnceLock::new();

fn urn_uuid_pattern() -> &'static Regex {
    URN_UUID.get_or_init(|| {
        Regex::new(
            r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
        )
        .expect("pattern is valid")
    })
}

/// Document serial number in `urn:uuid:` form, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrnUuid(String);

impl UrnUuid {
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidSerialNumber> {
        let value = value.into();
        if urn_uuid_pattern().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidSerialNumber(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UrnUuid {
    type Err = InvalidSerialNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UrnUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root aggregate of one SBOM document.
///
/// All components and services live in `graph`; the `components`/`services`
/// vectors here and the nested vectors on each entity are the owning tree
/// edges. The BOM is caller-owned plain data — serialization never keeps any
/// part of it beyond one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    /// Document version; must be strictly positive.
    pub version: u32,
    pub serial_number: Option<UrnUuid>,
    pub metadata: Metadata,
    /// Top-level components (owning edges into `graph`).
    pub components: Vec<NodeId>,
    /// Top-level services (owning edges into `graph`).
    pub services: Vec<NodeId>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub graph: NodeGraph,
}

impl Bom {
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: 1,
            serial_number: None,
            metadata: Metadata::default(),
            components: Vec::new(),
            services: Vec::new(),
            vulnerabilities: Vec::new(),
            graph: NodeGraph::new(),
        }
    }
}

impl Default for Bom {
    fn default() -> Self {
        Self::new()
    }
}
