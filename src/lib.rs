//! **A library for modeling and serializing CycloneDX Software Bills of
//! Materials.**
//!
//! `sbom-codec` models an SBOM document as a typed entity graph and converts
//! it, faithfully and deterministically, to and from the CycloneDX wire
//! representations — a JSON tree and an XML element tree — across spec
//! versions 1.2 through 1.6.
//!
//! ## Key Features
//!
//! - **Version-gated output**: each spec version has an immutable capability
//!   profile; model values the active version does not support are omitted
//!   from output, never errors, and never affect sibling nodes.
//! - **Reference identity discrimination**: unset or colliding `bom-ref`
//!   values are made unique for the duration of one serialize call and
//!   restored afterwards, so caller-owned data is never left mutated.
//! - **Dependency-graph derivation**: the nested component/service tree plus
//!   per-node dependency edges flatten into the wire `dependencies` section,
//!   and are reconstructed from it on the way back.
//! - **Deterministic ordering**: with [`NormalizeOptions::sort_lists`] every
//!   collection sorts with a fixed per-entity comparator, making output
//!   byte-identical run to run.
//! - **Path-qualified validation**: denormalization type-asserts every field
//!   and reports failures with a JSON-pointer-style path.
//!
//! ## Getting Started
//!
//! ```
//! use sbom_codec::model::{Bom, Component, ComponentType};
//! use sbom_codec::serialize::{to_json_string, NormalizeOptions};
//! use sbom_codec::spec::SpecVersion;
//!
//! # fn main() -> Result<(), sbom_codec::SerializeError> {
//! let mut bom = Bom::new();
//! let app = bom.graph.add_component(
//!     Component::new(ComponentType::Application, "acme-app")
//!         .with_version("1.2.3")
//!         .with_bom_ref("acme-app"),
//! );
//! bom.metadata.component = Some(app);
//!
//! let lib = bom.graph.add_component(
//!     Component::new(ComponentType::Library, "left-pad").with_version("0.9.1"),
//! );
//! bom.components.push(lib);
//! if let Some(app) = bom.graph.component_mut(app) {
//!     app.dependencies.push(lib);
//! }
//!
//! let json = to_json_string(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())?;
//! assert!(json.contains("\"bomFormat\": \"CycloneDX\""));
//! assert!(json.contains("\"dependencies\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - **[`model`]**: the entity graph — [`model::Bom`], components, services,
//!   licenses — stored in an arena so owning and dependency edges share one
//!   index type.
//! - **[`spec`]**: the append-only registry of per-version capability
//!   profiles.
//! - **[`serialize`]**: the engine — discriminator, dependency deriver, and
//!   the JSON/XML normalizer and JSON denormalizer factories.
//!
//! Schema validation, file scanning, and network lookups are out of scope:
//! this crate produces and consumes document trees, and its renderers are
//! thin `serde_json`/`quick-xml` calls.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // factory types live in modules named after their format on purpose
    clippy::module_name_repetitions
)]

pub mod error;
pub mod model;
pub mod serialize;
pub mod spec;

// Re-export main types for convenience
pub use error::{
    DenormalizeError, InvalidLicenseExpression, InvalidSerialNumber, SerializeError,
    UnknownSpdxId, UnsupportedSpecVersion,
};
pub use model::{
    Bom, BomRef, Component, ComponentType, License, Metadata, Node, NodeGraph, NodeId, Service,
};
pub use serialize::{
    from_json_str, from_json_value, to_json_string, to_json_value, to_xml_element,
    to_xml_string, NormalizeOptions, XmlElement,
};
pub use spec::{SpecVersion, SpecVersionProfile};
