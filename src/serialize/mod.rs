//! The serialization engine.
//!
//! `serialize(model, version, options)` is three steps: the discriminator
//! makes every reachable identity unique for the duration of the call, a
//! format-specific normalizer factory walks the model into a generic
//! document tree (deriving the flat dependency graph on the way), and a thin
//! external call renders the tree to a string. The reverse path reads a
//! generic tree back into a model with path-qualified validation and
//! re-attaches dependency sets.
//!
//! The engine is synchronous with no I/O; the only mutation is the
//! discriminator's transient bom-ref assignment, scoped by the exclusive
//! borrow it holds.

mod depgraph;
mod discriminator;
pub mod json;
pub(crate) mod order;
pub mod xml;

pub use depgraph::{apply_dependencies, derive_dependencies, DependencyEntry};
pub use discriminator::BomRefDiscriminator;
pub use xml::{XmlContent, XmlElement};

use serde_json::Value;

use crate::error::{DenormalizeError, SerializeError};
use crate::model::Bom;
use crate::spec::{self, SpecVersion};

/// Options controlling normalization output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Sort every collection with its fixed per-entity comparator, making
    /// repeated serializations of the same document byte-identical
    /// regardless of insertion order.
    pub sort_lists: bool,
}

/// Normalize a BOM to a generic JSON value under the given spec version.
///
/// Takes `&mut Bom` because reference identities are transiently
/// discriminated; the original values are restored before this returns,
/// on every path.
pub fn to_json_value(
    bom: &mut Bom,
    version: SpecVersion,
    options: &NormalizeOptions,
) -> Result<Value, SerializeError> {
    let profile = spec::profile(version);
    let scope = BomRefDiscriminator::discriminate(bom);
    json::JsonNormalizerFactory::new(profile).normalize_bom(scope.bom(), options)
}

/// Normalize and render to a JSON string.
pub fn to_json_string(
    bom: &mut Bom,
    version: SpecVersion,
    options: &NormalizeOptions,
) -> Result<String, SerializeError> {
    let value = to_json_value(bom, version, options)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Normalize a BOM to a generic XML element tree under the given spec
/// version.
pub fn to_xml_element(
    bom: &mut Bom,
    version: SpecVersion,
    options: &NormalizeOptions,
) -> Result<XmlElement, SerializeError> {
    let profile = spec::profile(version);
    let scope = BomRefDiscriminator::discriminate(bom);
    xml::XmlNormalizerFactory::new(profile).normalize_bom(scope.bom(), options)
}

/// Normalize and render to an XML string.
pub fn to_xml_string(
    bom: &mut Bom,
    version: SpecVersion,
    options: &NormalizeOptions,
) -> Result<String, SerializeError> {
    let element = to_xml_element(bom, version, options)?;
    xml::render_string(&element)
}

/// Reconstruct a BOM from a generic JSON value.
///
/// The document's `specVersion` selects the profile; an unknown version is
/// fatal with no fallback.
pub fn from_json_value(value: &Value) -> Result<Bom, DenormalizeError> {
    let version = value
        .get("specVersion")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let profile = spec::lookup(version)?;
    json::JsonDenormalizerFactory::new(profile).denormalize_bom(value)
}

/// Parse and reconstruct a BOM from a JSON string.
pub fn from_json_str(input: &str) -> Result<Bom, DenormalizeError> {
    let value: Value = serde_json::from_str(input)?;
    from_json_value(&value)
}
