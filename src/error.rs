//! Unified error types for sbom-codec.
//!
//! Three failure families exist, mirroring the serialization contract:
//! unsupported spec versions are fatal and surfaced immediately, structural
//! denormalization errors carry a JSON-pointer-style path to the offending
//! field, and serialization itself can only fail on an invalid document
//! version or in the final string-rendering step. Values a spec-version
//! profile does not support are *omitted* from output, never errors.

use thiserror::Error;

/// Raised when a spec-version key is not present in the registry.
///
/// The registry is append-only; there is no fallback to a neighbouring
/// version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported CycloneDX spec version: {0:?}")]
pub struct UnsupportedSpecVersion(pub String);

/// Raised when a serial number does not match the `urn:uuid:...` pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a urn:uuid serial number: {0:?}")]
pub struct InvalidSerialNumber(pub String);

/// Raised when a license id is not on the SPDX license list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown SPDX license id: {0:?}")]
pub struct UnknownSpdxId(pub String);

/// Raised when a license expression does not parse as an SPDX expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid SPDX license expression: {0:?}")]
pub struct InvalidLicenseExpression(pub String);

/// Errors from the model -> document-tree direction.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SerializeError {
    /// A BOM document version must be a strictly positive integer.
    #[error("BOM document version must be strictly positive, got {0}")]
    InvalidBomVersion(u32),

    /// Final JSON string rendering failed.
    #[error("failed to render JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Final XML string rendering failed.
    #[error("failed to render XML output: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Structural errors from the document-tree -> model direction.
///
/// Every variant carries the path of the offending field so malformed input
/// fails close to where it is wrong instead of producing a garbled entity.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DenormalizeError {
    /// The document declares a spec version the registry does not know.
    #[error(transparent)]
    UnsupportedSpecVersion(#[from] UnsupportedSpecVersion),

    /// The input string is not JSON at all.
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value of the wrong JSON type.
    #[error("{path}: expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A required field is absent.
    #[error("{path}: missing required field")]
    MissingField { path: String },

    /// A required string field is present but empty.
    #[error("{path}: value must be a non-empty string")]
    EmptyString { path: String },

    /// A string field holds a value outside the closed enum for that field.
    #[error("{path}: unknown {kind} value {value:?}")]
    UnknownEnumValue {
        path: String,
        kind: &'static str,
        value: String,
    },

    /// A field is well-typed but semantically invalid (bad timestamp, bad
    /// serial number, zero document version, ...).
    #[error("{path}: {message}")]
    InvalidValue { path: String, message: String },

    /// A `purl` field failed package-url parsing; the original parse error
    /// is preserved as the source.
    #[error("{path}: malformed package-url")]
    InvalidPurl {
        path: String,
        #[source]
        source: packageurl::Error,
    },
}
