//! License representations.
//!
//! A license is a closed tagged union: a named license, an SPDX-listed
//! license, or an SPDX license expression. Every consumption site matches
//! exhaustively, so adding a variant is a compile error at each site rather
//! than a runtime surprise. Validation uses the `spdx` crate: ids against
//! the SPDX license list, expressions in lax parse mode to accept common
//! non-standard spellings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{InvalidLicenseExpression, UnknownSpdxId};

/// An id from the SPDX license list, stored in canonical casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpdxId(String);

impl SpdxId {
    pub fn parse(id: impl Into<String>) -> Result<Self, UnknownSpdxId> {
        let id = id.into();
        match spdx::license_id(&id) {
            Some(known) => Ok(Self(known.name.to_string())),
            None => Err(UnknownSpdxId(id)),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpdxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An SPDX license expression, e.g. `MIT OR Apache-2.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseExpression(String);

impl LicenseExpression {
    /// Accepts anything the `spdx` crate parses in lax mode.
    pub fn parse(expression: impl Into<String>) -> Result<Self, InvalidLicenseExpression> {
        let expression = expression.into();
        if expression.trim().is_empty()
            || spdx::Expression::parse_mode(&expression, spdx::ParseMode::LAX).is_err()
        {
            return Err(InvalidLicenseExpression(expression));
        }
        Ok(Self(expression))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// License text attached inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedText {
    pub content: String,
    pub content_type: Option<String>,
    pub encoding: Option<String>,
}

impl AttachedText {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: None,
            encoding: None,
        }
    }
}

/// A single license statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum License {
    /// A license identified by name only (not on the SPDX list).
    Named {
        name: String,
        text: Option<AttachedText>,
        url: Option<String>,
    },
    /// A license from the SPDX license list.
    Spdx {
        id: SpdxId,
        text: Option<AttachedText>,
        url: Option<String>,
    },
    /// A compound SPDX expression.
    Expression(LicenseExpression),
}

impl License {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            text: None,
            url: None,
        }
    }

    pub fn spdx(id: impl Into<String>) -> Result<Self, UnknownSpdxId> {
        Ok(Self::Spdx {
            id: SpdxId::parse(id)?,
            text: None,
            url: None,
        })
    }

    pub fn expression(
        expression: impl Into<String>,
    ) -> Result<Self, InvalidLicenseExpression> {
        Ok(Self::Expression(LicenseExpression::parse(expression)?))
    }

    /// Deterministic output order: variant rank, then the variant's key.
    #[must_use]
    pub(crate) fn sort_key(&self) -> (u8, &str) {
        match self {
            Self::Expression(expression) => (0, expression.as_str()),
            Self::Named { name, .. } => (1, name.as_str()),
            Self::Spdx { id, .. } => (2, id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spdx_id_canonicalizes_casing() {
        let id = SpdxId::parse("MIT").expect("MIT is on the list");
        assert_eq!(id.as_str(), "MIT");
        assert!(SpdxId::parse("Not-A-License-2.0").is_err());
    }

    #[test]
    fn expression_accepts_lax_spellings() {
        assert!(LicenseExpression::parse("MIT OR Apache-2.0").is_ok());
        // lax mode tolerates common sloppy forms
        assert!(LicenseExpression::parse("Apache-2.0").is_ok());
        assert!(LicenseExpression::parse("").is_err());
        assert!(LicenseExpression::parse("AND AND").is_err());
    }

    #[test]
    fn sort_key_orders_variants_deterministically() {
        let expression = License::expression("MIT OR Apache-2.0").expect("valid");
        let named = License::named("Custom EULA");
        let spdx = License::spdx("Apache-2.0").expect("valid");
        let mut licenses = vec![spdx.clone(), named.clone(), expression.clone()];
        licenses.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        assert_eq!(licenses, vec![expression, named, spdx]);
    }
}
