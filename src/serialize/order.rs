//! Deterministic output ordering.
//!
//! Each entity type has one fixed comparator used when
//! `NormalizeOptions::sort_lists` is set. Comparators are weighted tuples —
//! the first non-equal field decides — so sorted output is reproducible
//! regardless of the insertion order of the underlying collections.

use std::cmp::Ordering;

use crate::model::{
    Component, ExternalReference, Lifecycle, OrganizationalContact, Purl, Service, Tool,
    Vulnerability,
};

/// Components: bom-ref, then purl, then cpe, then (group, name, version).
pub(crate) fn components(a: &Component, b: &Component) -> Ordering {
    a.bom_ref
        .value()
        .cmp(&b.bom_ref.value())
        .then_with(|| {
            a.purl
                .as_ref()
                .map(Purl::as_str)
                .cmp(&b.purl.as_ref().map(Purl::as_str))
        })
        .then_with(|| a.cpe.cmp(&b.cpe))
        .then_with(|| a.group.cmp(&b.group))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.version.cmp(&b.version))
}

/// Services: bom-ref, then (group, name, version).
pub(crate) fn services(a: &Service, b: &Service) -> Ordering {
    a.bom_ref
        .value()
        .cmp(&b.bom_ref.value())
        .then_with(|| a.group.cmp(&b.group))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.version.cmp(&b.version))
}

/// Tools: vendor, then name, then version.
pub(crate) fn tools(a: &Tool, b: &Tool) -> Ordering {
    a.vendor
        .cmp(&b.vendor)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.version.cmp(&b.version))
}

/// External references: type, then url, then comment.
pub(crate) fn external_references(a: &ExternalReference, b: &ExternalReference) -> Ordering {
    a.reference_type
        .as_str()
        .cmp(b.reference_type.as_str())
        .then_with(|| a.url.cmp(&b.url))
        .then_with(|| a.comment.cmp(&b.comment))
}

/// Contacts: name, then email, then phone.
pub(crate) fn contacts(a: &OrganizationalContact, b: &OrganizationalContact) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.email.cmp(&b.email))
        .then_with(|| a.phone.cmp(&b.phone))
}

/// Properties: name, then value.
pub(crate) fn properties(a: &crate::model::Property, b: &crate::model::Property) -> Ordering {
    a.name.cmp(&b.name).then_with(|| a.value.cmp(&b.value))
}

/// Lifecycles: predefined phases before named ones, each by key.
pub(crate) fn lifecycles(a: &Lifecycle, b: &Lifecycle) -> Ordering {
    lifecycle_key(a).cmp(&lifecycle_key(b))
}

fn lifecycle_key(lifecycle: &Lifecycle) -> (u8, &str) {
    match lifecycle {
        Lifecycle::Phase(phase) => (0, phase.as_str()),
        Lifecycle::Named { name, .. } => (1, name.as_str()),
    }
}

/// Vulnerabilities: bom-ref, then id.
pub(crate) fn vulnerabilities(a: &Vulnerability, b: &Vulnerability) -> Ordering {
    a.bom_ref.cmp(&b.bom_ref).then_with(|| a.id.cmp(&b.id))
}
