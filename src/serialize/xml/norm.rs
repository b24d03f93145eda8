//! XML normalizer factory.
//!
//! Symmetric to the JSON factory: same omission rules, same comparators,
//! same version gating — only the tree shape differs. Collections use the
//! schema's wrapper elements (`<components><component>...`), scalar fields
//! become child elements, and identities become attributes.

use chrono::SecondsFormat;
use indexmap::IndexMap;

use crate::error::SerializeError;
use crate::model::{
    AttachedText, Bom, Component, ExternalReference, HashAlgorithm, License, Lifecycle,
    NodeId, OrganizationalContact, OrganizationalEntity, Property, Service, Tool,
    Vulnerability, VulnerabilityRating,
};
use crate::serialize::depgraph::{derive_dependencies, DependencyEntry};
use crate::serialize::{order, NormalizeOptions};
use crate::spec::SpecVersionProfile;

use super::{XmlContent, XmlElement};

/// Manufactures XML representations of model entities under one profile.
pub struct XmlNormalizerFactory {
    profile: &'static SpecVersionProfile,
}

impl XmlNormalizerFactory {
    #[must_use]
    pub fn new(profile: &'static SpecVersionProfile) -> Self {
        Self { profile }
    }

    /// Normalize a whole document into a `<bom>` element tree.
    pub fn normalize_bom(
        &self,
        bom: &Bom,
        options: &NormalizeOptions,
    ) -> Result<XmlElement, SerializeError> {
        if bom.version == 0 {
            return Err(SerializeError::InvalidBomVersion(0));
        }

        let mut root = XmlElement::new("bom");
        root.namespace = Some(self.profile.xml_namespace().to_string());
        if let Some(serial) = &bom.serial_number {
            root.attributes
                .push(("serialNumber".to_string(), serial.as_str().to_string()));
        }
        root.attributes
            .push(("version".to_string(), bom.version.to_string()));

        let mut children = Vec::new();
        if let Some(metadata) = self.normalize_metadata(bom, options) {
            children.push(metadata);
        }

        let components = self.normalize_components(bom, &bom.components, options);
        if !components.is_empty() {
            children.push(XmlElement::with_children("components", components));
        }

        if self.profile.supports_services() {
            let services = self.normalize_services(bom, &bom.services, options);
            if !services.is_empty() {
                children.push(XmlElement::with_children("services", services));
            }
        }

        if self.profile.supports_dependency_graph() {
            if let Some(entries) = derive_dependencies(bom, options.sort_lists) {
                let entries: Vec<XmlElement> =
                    entries.iter().map(dependency_to_element).collect();
                children.push(XmlElement::with_children("dependencies", entries));
            }
        }

        if self.profile.supports_vulnerabilities() && !bom.vulnerabilities.is_empty() {
            let mut items: Vec<&Vulnerability> = bom.vulnerabilities.iter().collect();
            if options.sort_lists {
                items.sort_by(|a, b| order::vulnerabilities(a, b));
            }
            let values: Vec<XmlElement> = items
                .into_iter()
                .map(|v| self.normalize_vulnerability(v, options))
                .collect();
            if !values.is_empty() {
                children.push(XmlElement::with_children("vulnerabilities", values));
            }
        }

        if !children.is_empty() {
            root.children = XmlContent::Elements(children);
        }
        Ok(root)
    }

    fn normalize_metadata(&self, bom: &Bom, options: &NormalizeOptions) -> Option<XmlElement> {
        let metadata = &bom.metadata;
        let mut children = Vec::new();

        if let Some(timestamp) = &metadata.timestamp {
            children.push(XmlElement::with_text(
                "timestamp",
                timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }

        if self.profile.supports_metadata_lifecycles() && !metadata.lifecycles.is_empty() {
            let mut items: Vec<&Lifecycle> = metadata.lifecycles.iter().collect();
            if options.sort_lists {
                items.sort_by(|a, b| order::lifecycles(a, b));
            }
            let entries: Vec<XmlElement> = items.into_iter().map(lifecycle_to_element).collect();
            children.push(XmlElement::with_children("lifecycles", entries));
        }

        let tools = self.normalize_tools(&metadata.tools, options);
        if !tools.is_empty() {
            children.push(XmlElement::with_children("tools", tools));
        }

        let authors = normalize_contacts("author", &metadata.authors, options);
        if !authors.is_empty() {
            children.push(XmlElement::with_children("authors", authors));
        }

        if let Some(id) = metadata.component {
            if let Some(component) = bom.graph.component(id) {
                if let Some(element) = self.normalize_component(bom, component, options) {
                    children.push(element);
                }
            }
        }

        if let Some(manufacture) = &metadata.manufacture {
            if let Some(element) =
                normalize_organizational_entity("manufacture", manufacture, options)
            {
                children.push(element);
            }
        }
        if let Some(supplier) = &metadata.supplier {
            if let Some(element) = normalize_organizational_entity("supplier", supplier, options) {
                children.push(element);
            }
        }

        if self.profile.supports_metadata_licenses() {
            let licenses = normalize_licenses(&metadata.licenses, options);
            if !licenses.is_empty() {
                children.push(XmlElement::with_children("licenses", licenses));
            }
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&metadata.properties, options);
            if !properties.is_empty() {
                children.push(XmlElement::with_children("properties", properties));
            }
        }

        if children.is_empty() {
            None
        } else {
            Some(XmlElement::with_children("metadata", children))
        }
    }

    fn normalize_components(
        &self,
        bom: &Bom,
        ids: &[NodeId],
        options: &NormalizeOptions,
    ) -> Vec<XmlElement> {
        let mut items: Vec<&Component> = ids
            .iter()
            .filter_map(|&id| bom.graph.component(id))
            .collect();
        if options.sort_lists {
            items.sort_by(|a, b| order::components(a, b));
        }
        items
            .into_iter()
            .filter_map(|component| self.normalize_component(bom, component, options))
            .collect()
    }

    fn normalize_component(
        &self,
        bom: &Bom,
        component: &Component,
        options: &NormalizeOptions,
    ) -> Option<XmlElement> {
        if !self.profile.supports_component_type(component.component_type) {
            return None;
        }

        let mut element = XmlElement::new("component")
            .attr("type", component.component_type.as_str());
        if let Some(value) = component.bom_ref.nonempty_value() {
            element = element.attr("bom-ref", value);
        }

        let mut children = Vec::new();
        if let Some(supplier) = &component.supplier {
            if let Some(child) = normalize_organizational_entity("supplier", supplier, options) {
                children.push(child);
            }
        }
        push_opt_text(&mut children, "author", component.author.as_deref());
        push_opt_text(&mut children, "publisher", component.publisher.as_deref());
        push_opt_text(&mut children, "group", component.group.as_deref());
        children.push(XmlElement::with_text("name", &component.name));
        match nonempty(component.version.as_deref()) {
            Some(version) => children.push(XmlElement::with_text("version", version)),
            // older spec versions require the element; emit it empty
            None if self.profile.requires_component_version() => {
                children.push(XmlElement::new("version"));
            }
            None => {}
        }
        push_opt_text(&mut children, "description", component.description.as_deref());
        if let Some(scope) = component.scope {
            children.push(XmlElement::with_text("scope", scope.as_str()));
        }

        let hashes = self.normalize_hashes(&component.hashes, options);
        if !hashes.is_empty() {
            children.push(XmlElement::with_children("hashes", hashes));
        }

        let licenses = normalize_licenses(&component.licenses, options);
        if !licenses.is_empty() {
            children.push(XmlElement::with_children("licenses", licenses));
        }

        push_opt_text(&mut children, "copyright", component.copyright.as_deref());
        push_opt_text(&mut children, "cpe", component.cpe.as_deref());
        if let Some(purl) = &component.purl {
            children.push(XmlElement::with_text("purl", purl.as_str()));
        }

        let external = self.normalize_external_references(&component.external_references, options);
        if !external.is_empty() {
            children.push(XmlElement::with_children("externalReferences", external));
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&component.properties, options);
            if !properties.is_empty() {
                children.push(XmlElement::with_children("properties", properties));
            }
        }

        let nested = self.normalize_components(bom, &component.components, options);
        if !nested.is_empty() {
            children.push(XmlElement::with_children("components", nested));
        }

        if !children.is_empty() {
            element.children = XmlContent::Elements(children);
        }
        Some(element)
    }

    fn normalize_services(
        &self,
        bom: &Bom,
        ids: &[NodeId],
        options: &NormalizeOptions,
    ) -> Vec<XmlElement> {
        let mut items: Vec<&Service> = ids
            .iter()
            .filter_map(|&id| bom.graph.service(id))
            .collect();
        if options.sort_lists {
            items.sort_by(|a, b| order::services(a, b));
        }
        items
            .into_iter()
            .map(|service| self.normalize_service(bom, service, options))
            .collect()
    }

    fn normalize_service(
        &self,
        bom: &Bom,
        service: &Service,
        options: &NormalizeOptions,
    ) -> XmlElement {
        let mut element = XmlElement::new("service");
        if let Some(value) = service.bom_ref.nonempty_value() {
            element = element.attr("bom-ref", value);
        }

        let mut children = Vec::new();
        if let Some(provider) = &service.provider {
            if let Some(child) = normalize_organizational_entity("provider", provider, options) {
                children.push(child);
            }
        }
        push_opt_text(&mut children, "group", service.group.as_deref());
        children.push(XmlElement::with_text("name", &service.name));
        push_opt_text(&mut children, "version", service.version.as_deref());
        push_opt_text(&mut children, "description", service.description.as_deref());

        let mut endpoints: Vec<&str> = service
            .endpoints
            .iter()
            .map(String::as_str)
            .filter(|e| !e.is_empty())
            .collect();
        if options.sort_lists {
            endpoints.sort_unstable();
        }
        if !endpoints.is_empty() {
            let entries: Vec<XmlElement> = endpoints
                .into_iter()
                .map(|endpoint| XmlElement::with_text("endpoint", endpoint))
                .collect();
            children.push(XmlElement::with_children("endpoints", entries));
        }

        if let Some(authenticated) = service.authenticated {
            children.push(XmlElement::with_text(
                "authenticated",
                authenticated.to_string(),
            ));
        }
        if let Some(x_trust_boundary) = service.x_trust_boundary {
            children.push(XmlElement::with_text(
                "x-trust-boundary",
                x_trust_boundary.to_string(),
            ));
        }

        let licenses = normalize_licenses(&service.licenses, options);
        if !licenses.is_empty() {
            children.push(XmlElement::with_children("licenses", licenses));
        }

        let external = self.normalize_external_references(&service.external_references, options);
        if !external.is_empty() {
            children.push(XmlElement::with_children("externalReferences", external));
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&service.properties, options);
            if !properties.is_empty() {
                children.push(XmlElement::with_children("properties", properties));
            }
        }

        let nested = self.normalize_services(bom, &service.services, options);
        if !nested.is_empty() {
            children.push(XmlElement::with_children("services", nested));
        }

        if !children.is_empty() {
            element.children = XmlContent::Elements(children);
        }
        element
    }

    fn normalize_hashes(
        &self,
        hashes: &IndexMap<HashAlgorithm, String>,
        options: &NormalizeOptions,
    ) -> Vec<XmlElement> {
        let mut pairs: Vec<(HashAlgorithm, &str)> = hashes
            .iter()
            .map(|(alg, content)| (*alg, content.as_str()))
            .filter(|(alg, content)| {
                self.profile.supports_hash_algorithm(*alg)
                    && self.profile.supports_hash_value(*alg, content)
            })
            .collect();
        if options.sort_lists {
            pairs.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()).then_with(|| a.1.cmp(b.1)));
        }
        pairs
            .into_iter()
            .map(|(alg, content)| {
                XmlElement::with_text("hash", content).attr("alg", alg.as_str())
            })
            .collect()
    }

    fn normalize_external_references(
        &self,
        references: &[ExternalReference],
        options: &NormalizeOptions,
    ) -> Vec<XmlElement> {
        let mut items: Vec<&ExternalReference> = references
            .iter()
            .filter(|r| {
                self.profile
                    .supports_external_reference_type(r.reference_type)
                    && !r.url.is_empty()
            })
            .collect();
        if options.sort_lists {
            items.sort_by(|a, b| order::external_references(a, b));
        }
        items
            .into_iter()
            .map(|reference| {
                let mut children = vec![XmlElement::with_text("url", &reference.url)];
                if let Some(comment) = nonempty(reference.comment.as_deref()) {
                    children.push(XmlElement::with_text("comment", comment));
                }
                if self.profile.supports_external_reference_hashes() {
                    let hashes = self.normalize_hashes(&reference.hashes, options);
                    if !hashes.is_empty() {
                        children.push(XmlElement::with_children("hashes", hashes));
                    }
                }
                XmlElement::with_children("reference", children)
                    .attr("type", reference.reference_type.as_str())
            })
            .collect()
    }

    fn normalize_tools(&self, tools: &[Tool], options: &NormalizeOptions) -> Vec<XmlElement> {
        let mut items: Vec<&Tool> = tools.iter().collect();
        if options.sort_lists {
            items.sort_by(|a, b| order::tools(a, b));
        }
        items
            .into_iter()
            .filter_map(|tool| {
                let mut children = Vec::new();
                push_opt_text(&mut children, "vendor", tool.vendor.as_deref());
                push_opt_text(&mut children, "name", tool.name.as_deref());
                push_opt_text(&mut children, "version", tool.version.as_deref());
                let hashes = self.normalize_hashes(&tool.hashes, options);
                if !hashes.is_empty() {
                    children.push(XmlElement::with_children("hashes", hashes));
                }
                if self.profile.supports_tool_references() {
                    let external =
                        self.normalize_external_references(&tool.external_references, options);
                    if !external.is_empty() {
                        children.push(XmlElement::with_children("externalReferences", external));
                    }
                }
                if children.is_empty() {
                    None
                } else {
                    Some(XmlElement::with_children("tool", children))
                }
            })
            .collect()
    }

    fn normalize_vulnerability(
        &self,
        vulnerability: &Vulnerability,
        options: &NormalizeOptions,
    ) -> XmlElement {
        let mut element = XmlElement::new("vulnerability");
        if let Some(value) = nonempty(vulnerability.bom_ref.as_deref()) {
            element = element.attr("bom-ref", value);
        }

        let mut children = Vec::new();
        push_opt_text(&mut children, "id", vulnerability.id.as_deref());
        if let Some(source) = &vulnerability.source {
            let mut source_children = Vec::new();
            push_opt_text(&mut source_children, "name", source.name.as_deref());
            push_opt_text(&mut source_children, "url", source.url.as_deref());
            if !source_children.is_empty() {
                children.push(XmlElement::with_children("source", source_children));
            }
        }

        let mut ratings: Vec<&VulnerabilityRating> = vulnerability
            .ratings
            .iter()
            .filter(|rating| match rating.method {
                Some(method) => self.profile.supports_rating_method(method),
                None => true,
            })
            .collect();
        if options.sort_lists {
            ratings.sort_by(|a, b| {
                let key = |r: &VulnerabilityRating| {
                    (
                        r.method.map(|m| m.as_str()),
                        r.severity.map(|s| s.as_str()),
                        r.vector.clone(),
                    )
                };
                key(a).cmp(&key(b))
            });
        }
        if !ratings.is_empty() {
            let entries: Vec<XmlElement> = ratings.into_iter().map(rating_to_element).collect();
            children.push(XmlElement::with_children("ratings", entries));
        }

        let mut cwes = vulnerability.cwes.clone();
        if options.sort_lists {
            cwes.sort_unstable();
        }
        if !cwes.is_empty() {
            let entries: Vec<XmlElement> = cwes
                .into_iter()
                .map(|cwe| XmlElement::with_text("cwe", cwe.to_string()))
                .collect();
            children.push(XmlElement::with_children("cwes", entries));
        }

        push_opt_text(&mut children, "description", vulnerability.description.as_deref());
        push_opt_text(&mut children, "detail", vulnerability.detail.as_deref());
        push_opt_text(
            &mut children,
            "recommendation",
            vulnerability.recommendation.as_deref(),
        );

        let mut affects: Vec<&str> = vulnerability
            .affects
            .iter()
            .map(String::as_str)
            .filter(|r| !r.is_empty())
            .collect();
        if options.sort_lists {
            affects.sort_unstable();
        }
        if !affects.is_empty() {
            let entries: Vec<XmlElement> = affects
                .into_iter()
                .map(|target| {
                    XmlElement::with_children(
                        "target",
                        vec![XmlElement::with_text("ref", target)],
                    )
                })
                .collect();
            children.push(XmlElement::with_children("affects", entries));
        }

        if !children.is_empty() {
            element.children = XmlContent::Elements(children);
        }
        element
    }
}

fn rating_to_element(rating: &VulnerabilityRating) -> XmlElement {
    let mut children = Vec::new();
    if let Some(score) = rating.score {
        children.push(XmlElement::with_text("score", score.to_string()));
    }
    if let Some(severity) = rating.severity {
        children.push(XmlElement::with_text("severity", severity.as_str()));
    }
    if let Some(method) = rating.method {
        children.push(XmlElement::with_text("method", method.as_str()));
    }
    push_opt_text(&mut children, "vector", rating.vector.as_deref());
    XmlElement::with_children("rating", children)
}

fn lifecycle_to_element(lifecycle: &Lifecycle) -> XmlElement {
    match lifecycle {
        Lifecycle::Phase(phase) => XmlElement::with_children(
            "lifecycle",
            vec![XmlElement::with_text("phase", phase.as_str())],
        ),
        Lifecycle::Named { name, description } => {
            let mut children = vec![XmlElement::with_text("name", name)];
            push_opt_text(&mut children, "description", description.as_deref());
            XmlElement::with_children("lifecycle", children)
        }
    }
}

fn dependency_to_element(entry: &DependencyEntry) -> XmlElement {
    let mut element = XmlElement::new("dependency").attr("ref", &entry.dependency_ref);
    if !entry.depends_on.is_empty() {
        let children: Vec<XmlElement> = entry
            .depends_on
            .iter()
            .map(|target| XmlElement::new("dependency").attr("ref", target))
            .collect();
        element.children = XmlContent::Elements(children);
    }
    element
}

/// License normalization dispatches exhaustively over the closed union.
fn normalize_licenses(licenses: &[License], options: &NormalizeOptions) -> Vec<XmlElement> {
    let mut items: Vec<&License> = licenses.iter().collect();
    if options.sort_lists {
        items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }
    items
        .into_iter()
        .map(|license| match license {
            License::Named { name, text, url } => {
                let mut children = vec![XmlElement::with_text("name", name)];
                if let Some(text) = text {
                    children.push(attached_text_to_element(text));
                }
                push_opt_text(&mut children, "url", url.as_deref());
                XmlElement::with_children("license", children)
            }
            License::Spdx { id, text, url } => {
                let mut children = vec![XmlElement::with_text("id", id.as_str())];
                if let Some(text) = text {
                    children.push(attached_text_to_element(text));
                }
                push_opt_text(&mut children, "url", url.as_deref());
                XmlElement::with_children("license", children)
            }
            License::Expression(expression) => {
                XmlElement::with_text("expression", expression.as_str())
            }
        })
        .collect()
}

fn attached_text_to_element(text: &AttachedText) -> XmlElement {
    let mut element = XmlElement::with_text("text", &text.content);
    if let Some(content_type) = nonempty(text.content_type.as_deref()) {
        element = element.attr("content-type", content_type);
    }
    if let Some(encoding) = nonempty(text.encoding.as_deref()) {
        element = element.attr("encoding", encoding);
    }
    element
}

fn normalize_organizational_entity(
    name: &str,
    entity: &OrganizationalEntity,
    options: &NormalizeOptions,
) -> Option<XmlElement> {
    let mut children = Vec::new();
    push_opt_text(&mut children, "name", entity.name.as_deref());
    let mut urls: Vec<&str> = entity
        .urls
        .iter()
        .map(String::as_str)
        .filter(|u| !u.is_empty())
        .collect();
    if options.sort_lists {
        urls.sort_unstable();
    }
    for url in urls {
        children.push(XmlElement::with_text("url", url));
    }
    children.extend(normalize_contacts("contact", &entity.contacts, options));
    if children.is_empty() {
        None
    } else {
        Some(XmlElement::with_children(name, children))
    }
}

fn normalize_contacts(
    element_name: &str,
    contacts: &[OrganizationalContact],
    options: &NormalizeOptions,
) -> Vec<XmlElement> {
    let mut items: Vec<&OrganizationalContact> = contacts.iter().collect();
    if options.sort_lists {
        items.sort_by(|a, b| order::contacts(a, b));
    }
    items
        .into_iter()
        .filter_map(|contact| {
            let mut children = Vec::new();
            push_opt_text(&mut children, "name", contact.name.as_deref());
            push_opt_text(&mut children, "email", contact.email.as_deref());
            push_opt_text(&mut children, "phone", contact.phone.as_deref());
            if children.is_empty() {
                None
            } else {
                Some(XmlElement::with_children(element_name, children))
            }
        })
        .collect()
}

fn normalize_properties(properties: &[Property], options: &NormalizeOptions) -> Vec<XmlElement> {
    let mut items: Vec<&Property> = properties
        .iter()
        .filter(|p| !p.name.is_empty())
        .collect();
    if options.sort_lists {
        items.sort_by(|a, b| order::properties(a, b));
    }
    items
        .into_iter()
        .map(|property| {
            XmlElement::with_text("property", &property.value).attr("name", &property.name)
        })
        .collect()
}

fn push_opt_text(children: &mut Vec<XmlElement>, name: &str, value: Option<&str>) {
    if let Some(value) = nonempty(value) {
        children.push(XmlElement::with_text(name, value));
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
