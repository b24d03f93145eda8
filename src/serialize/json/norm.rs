//! JSON normalizer factory.
//!
//! One factory per spec-version profile; every entity normalizer on it is
//! stateless and shares the profile, so nested normalization (component →
//! organizational entity → contact) is gated by one version consistently.
//!
//! Uniform rules across entity types: a value the profile does not support
//! omits that single node, never an error and never its siblings; optional
//! string fields treat the empty string as absent; collections sort with
//! their fixed per-entity comparators when `sort_lists` is set.

use chrono::SecondsFormat;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::SerializeError;
use crate::model::{
    AttachedText, Bom, Component, ExternalReference, HashAlgorithm, License, Lifecycle,
    NodeId, OrganizationalContact, OrganizationalEntity, Property, Service, Tool,
    Vulnerability, VulnerabilityRating,
};
use crate::serialize::depgraph::{derive_dependencies, DependencyEntry};
use crate::serialize::{order, NormalizeOptions};
use crate::spec::SpecVersionProfile;

/// Manufactures JSON representations of model entities under one profile.
pub struct JsonNormalizerFactory {
    profile: &'static SpecVersionProfile,
}

impl JsonNormalizerFactory {
    #[must_use]
    pub fn new(profile: &'static SpecVersionProfile) -> Self {
        Self { profile }
    }

    /// Normalize a whole document.
    ///
    /// Expects identities to be discriminated already; `serialize::to_json_value`
    /// arranges that.
    pub fn normalize_bom(
        &self,
        bom: &Bom,
        options: &NormalizeOptions,
    ) -> Result<Value, SerializeError> {
        if bom.version == 0 {
            return Err(SerializeError::InvalidBomVersion(0));
        }

        let mut doc = Map::new();
        put_str(&mut doc, "$schema", self.profile.json_schema_url());
        put_str(&mut doc, "bomFormat", "CycloneDX");
        put_str(&mut doc, "specVersion", self.profile.version().as_str());
        if let Some(serial) = &bom.serial_number {
            put_str(&mut doc, "serialNumber", serial.as_str());
        }
        put(&mut doc, "version", Value::from(bom.version));

        if let Some(metadata) = self.normalize_metadata(bom, options) {
            put(&mut doc, "metadata", metadata);
        }

        let components = self.normalize_components(bom, &bom.components, options);
        if !components.is_empty() {
            put(&mut doc, "components", Value::Array(components));
        }

        if self.profile.supports_services() {
            let services = self.normalize_services(bom, &bom.services, options);
            if !services.is_empty() {
                put(&mut doc, "services", Value::Array(services));
            }
        }

        if self.profile.supports_dependency_graph() {
            if let Some(entries) = derive_dependencies(bom, options.sort_lists) {
                let entries: Vec<Value> = entries.iter().map(dependency_to_value).collect();
                put(&mut doc, "dependencies", Value::Array(entries));
            }
        }

        if self.profile.supports_vulnerabilities() && !bom.vulnerabilities.is_empty() {
            let mut items: Vec<&Vulnerability> = bom.vulnerabilities.iter().collect();
            if options.sort_lists {
                items.sort_by(|a, b| order::vulnerabilities(a, b));
            }
            let values: Vec<Value> = items
                .into_iter()
                .map(|v| self.normalize_vulnerability(v, options))
                .collect();
            if !values.is_empty() {
                put(&mut doc, "vulnerabilities", Value::Array(values));
            }
        }

        Ok(Value::Object(doc))
    }

    fn normalize_metadata(&self, bom: &Bom, options: &NormalizeOptions) -> Option<Value> {
        let metadata = &bom.metadata;
        let mut map = Map::new();

        if let Some(timestamp) = &metadata.timestamp {
            put_str(
                &mut map,
                "timestamp",
                &timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }

        if self.profile.supports_metadata_lifecycles() && !metadata.lifecycles.is_empty() {
            let mut items: Vec<&Lifecycle> = metadata.lifecycles.iter().collect();
            if options.sort_lists {
                items.sort_by(|a, b| order::lifecycles(a, b));
            }
            let values: Vec<Value> = items.into_iter().map(lifecycle_to_value).collect();
            put(&mut map, "lifecycles", Value::Array(values));
        }

        let tools = self.normalize_tools(&metadata.tools, options);
        if !tools.is_empty() {
            put(&mut map, "tools", Value::Array(tools));
        }

        let authors = normalize_contacts(&metadata.authors, options);
        if !authors.is_empty() {
            put(&mut map, "authors", Value::Array(authors));
        }

        if let Some(id) = metadata.component {
            if let Some(component) = bom.graph.component(id) {
                if let Some(value) = self.normalize_component(bom, component, options) {
                    put(&mut map, "component", value);
                }
            }
        }

        if let Some(manufacture) = &metadata.manufacture {
            if let Some(value) = normalize_organizational_entity(manufacture, options) {
                put(&mut map, "manufacture", value);
            }
        }
        if let Some(supplier) = &metadata.supplier {
            if let Some(value) = normalize_organizational_entity(supplier, options) {
                put(&mut map, "supplier", value);
            }
        }

        if self.profile.supports_metadata_licenses() {
            let licenses = normalize_licenses(&metadata.licenses, options);
            if !licenses.is_empty() {
                put(&mut map, "licenses", Value::Array(licenses));
            }
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&metadata.properties, options);
            if !properties.is_empty() {
                put(&mut map, "properties", Value::Array(properties));
            }
        }

        if map.is_empty() {
            None
        } else {
            Some(Value::Object(map))
        }
    }

    fn normalize_components(
        &self,
        bom: &Bom,
        ids: &[NodeId],
        options: &NormalizeOptions,
    ) -> Vec<Value> {
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

    /// Normalize one component; `None` when the profile does not support its
    /// type (the component is omitted, siblings are unaffected).
    fn normalize_component(
        &self,
        bom: &Bom,
        component: &Component,
        options: &NormalizeOptions,
    ) -> Option<Value> {
        if !self.profile.supports_component_type(component.component_type) {
            return None;
        }

        let mut map = Map::new();
        put_str(&mut map, "type", component.component_type.as_str());
        if let Some(value) = component.bom_ref.nonempty_value() {
            put_str(&mut map, "bom-ref", value);
        }
        if let Some(supplier) = &component.supplier {
            if let Some(value) = normalize_organizational_entity(supplier, options) {
                put(&mut map, "supplier", value);
            }
        }
        put_opt_str(&mut map, "author", component.author.as_deref());
        put_opt_str(&mut map, "publisher", component.publisher.as_deref());
        put_opt_str(&mut map, "group", component.group.as_deref());
        put_str(&mut map, "name", &component.name);
        match nonempty(component.version.as_deref()) {
            Some(version) => put_str(&mut map, "version", version),
            // older spec versions require the field; emit it empty
            None if self.profile.requires_component_version() => {
                put_str(&mut map, "version", "");
            }
            None => {}
        }
        put_opt_str(&mut map, "description", component.description.as_deref());
        if let Some(scope) = component.scope {
            put_str(&mut map, "scope", scope.as_str());
        }

        let hashes = self.normalize_hashes(&component.hashes, options);
        if !hashes.is_empty() {
            put(&mut map, "hashes", Value::Array(hashes));
        }

        let licenses = normalize_licenses(&component.licenses, options);
        if !licenses.is_empty() {
            put(&mut map, "licenses", Value::Array(licenses));
        }

        put_opt_str(&mut map, "copyright", component.copyright.as_deref());
        put_opt_str(&mut map, "cpe", component.cpe.as_deref());
        if let Some(purl) = &component.purl {
            put_str(&mut map, "purl", purl.as_str());
        }

        let external = self.normalize_external_references(&component.external_references, options);
        if !external.is_empty() {
            put(&mut map, "externalReferences", Value::Array(external));
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&component.properties, options);
            if !properties.is_empty() {
                put(&mut map, "properties", Value::Array(properties));
            }
        }

        let children = self.normalize_components(bom, &component.components, options);
        if !children.is_empty() {
            put(&mut map, "components", Value::Array(children));
        }

        Some(Value::Object(map))
    }

    fn normalize_services(
        &self,
        bom: &Bom,
        ids: &[NodeId],
        options: &NormalizeOptions,
    ) -> Vec<Value> {
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
    ) -> Value {
        let mut map = Map::new();
        if let Some(value) = service.bom_ref.nonempty_value() {
            put_str(&mut map, "bom-ref", value);
        }
        if let Some(provider) = &service.provider {
            if let Some(value) = normalize_organizational_entity(provider, options) {
                put(&mut map, "provider", value);
            }
        }
        put_opt_str(&mut map, "group", service.group.as_deref());
        put_str(&mut map, "name", &service.name);
        put_opt_str(&mut map, "version", service.version.as_deref());
        put_opt_str(&mut map, "description", service.description.as_deref());

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
            put(
                &mut map,
                "endpoints",
                Value::Array(endpoints.into_iter().map(Value::from).collect()),
            );
        }

        if let Some(authenticated) = service.authenticated {
            put(&mut map, "authenticated", Value::from(authenticated));
        }
        if let Some(x_trust_boundary) = service.x_trust_boundary {
            put(&mut map, "x-trust-boundary", Value::from(x_trust_boundary));
        }

        let licenses = normalize_licenses(&service.licenses, options);
        if !licenses.is_empty() {
            put(&mut map, "licenses", Value::Array(licenses));
        }

        let external = self.normalize_external_references(&service.external_references, options);
        if !external.is_empty() {
            put(&mut map, "externalReferences", Value::Array(external));
        }

        if self.profile.supports_properties() {
            let properties = normalize_properties(&service.properties, options);
            if !properties.is_empty() {
                put(&mut map, "properties", Value::Array(properties));
            }
        }

        let children = self.normalize_services(bom, &service.services, options);
        if !children.is_empty() {
            put(&mut map, "services", Value::Array(children));
        }

        Value::Object(map)
    }

    /// Hashes whose algorithm is unsupported, or whose content does not have
    /// the algorithm family's shape, are omitted individually.
    fn normalize_hashes(
        &self,
        hashes: &IndexMap<HashAlgorithm, String>,
        options: &NormalizeOptions,
    ) -> Vec<Value> {
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
                let mut map = Map::new();
                put_str(&mut map, "alg", alg.as_str());
                put_str(&mut map, "content", content);
                Value::Object(map)
            })
            .collect()
    }

    fn normalize_external_references(
        &self,
        references: &[ExternalReference],
        options: &NormalizeOptions,
    ) -> Vec<Value> {
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
                let mut map = Map::new();
                put_str(&mut map, "type", reference.reference_type.as_str());
                put_str(&mut map, "url", &reference.url);
                put_opt_str(&mut map, "comment", reference.comment.as_deref());
                if self.profile.supports_external_reference_hashes() {
                    let hashes = self.normalize_hashes(&reference.hashes, options);
                    if !hashes.is_empty() {
                        put(&mut map, "hashes", Value::Array(hashes));
                    }
                }
                Value::Object(map)
            })
            .collect()
    }

    fn normalize_tools(&self, tools: &[Tool], options: &NormalizeOptions) -> Vec<Value> {
        let mut items: Vec<&Tool> = tools.iter().collect();
        if options.sort_lists {
            items.sort_by(|a, b| order::tools(a, b));
        }
        items
            .into_iter()
            .filter_map(|tool| {
                let mut map = Map::new();
                put_opt_str(&mut map, "vendor", tool.vendor.as_deref());
                put_opt_str(&mut map, "name", tool.name.as_deref());
                put_opt_str(&mut map, "version", tool.version.as_deref());
                let hashes = self.normalize_hashes(&tool.hashes, options);
                if !hashes.is_empty() {
                    put(&mut map, "hashes", Value::Array(hashes));
                }
                if self.profile.supports_tool_references() {
                    let external =
                        self.normalize_external_references(&tool.external_references, options);
                    if !external.is_empty() {
                        put(&mut map, "externalReferences", Value::Array(external));
                    }
                }
                if map.is_empty() {
                    None
                } else {
                    Some(Value::Object(map))
                }
            })
            .collect()
    }

    fn normalize_vulnerability(
        &self,
        vulnerability: &Vulnerability,
        options: &NormalizeOptions,
    ) -> Value {
        let mut map = Map::new();
        put_opt_str(&mut map, "bom-ref", vulnerability.bom_ref.as_deref());
        put_opt_str(&mut map, "id", vulnerability.id.as_deref());
        if let Some(source) = &vulnerability.source {
            let mut source_map = Map::new();
            put_opt_str(&mut source_map, "name", source.name.as_deref());
            put_opt_str(&mut source_map, "url", source.url.as_deref());
            if !source_map.is_empty() {
                put(&mut map, "source", Value::Object(source_map));
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
                key(a)
                    .cmp(&key(b))
                    .then_with(|| match (a.score, b.score) {
                        (Some(x), Some(y)) => x.total_cmp(&y),
                        (a, b) => a.is_some().cmp(&b.is_some()),
                    })
            });
        }
        if !ratings.is_empty() {
            let values: Vec<Value> = ratings.into_iter().map(rating_to_value).collect();
            put(&mut map, "ratings", Value::Array(values));
        }

        let mut cwes = vulnerability.cwes.clone();
        if options.sort_lists {
            cwes.sort_unstable();
        }
        if !cwes.is_empty() {
            put(
                &mut map,
                "cwes",
                Value::Array(cwes.into_iter().map(Value::from).collect()),
            );
        }

        put_opt_str(&mut map, "description", vulnerability.description.as_deref());
        put_opt_str(&mut map, "detail", vulnerability.detail.as_deref());
        put_opt_str(
            &mut map,
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
            let values: Vec<Value> = affects
                .into_iter()
                .map(|target| {
                    let mut entry = Map::new();
                    put_str(&mut entry, "ref", target);
                    Value::Object(entry)
                })
                .collect();
            put(&mut map, "affects", Value::Array(values));
        }

        Value::Object(map)
    }
}

fn rating_to_value(rating: &VulnerabilityRating) -> Value {
    let mut map = Map::new();
    if let Some(score) = rating.score {
        put(&mut map, "score", Value::from(score));
    }
    if let Some(severity) = rating.severity {
        put_str(&mut map, "severity", severity.as_str());
    }
    if let Some(method) = rating.method {
        put_str(&mut map, "method", method.as_str());
    }
    put_opt_str(&mut map, "vector", rating.vector.as_deref());
    Value::Object(map)
}

fn lifecycle_to_value(lifecycle: &Lifecycle) -> Value {
    let mut map = Map::new();
    match lifecycle {
        Lifecycle::Phase(phase) => put_str(&mut map, "phase", phase.as_str()),
        Lifecycle::Named { name, description } => {
            put_str(&mut map, "name", name);
            put_opt_str(&mut map, "description", description.as_deref());
        }
    }
    Value::Object(map)
}

fn dependency_to_value(entry: &DependencyEntry) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "ref", &entry.dependency_ref);
    if !entry.depends_on.is_empty() {
        let targets: Vec<Value> = entry
            .depends_on
            .iter()
            .map(|t| Value::from(t.as_str()))
            .collect();
        put(&mut map, "dependsOn", Value::Array(targets));
    }
    Value::Object(map)
}

/// License normalization dispatches exhaustively over the closed union.
fn normalize_licenses(licenses: &[License], options: &NormalizeOptions) -> Vec<Value> {
    let mut items: Vec<&License> = licenses.iter().collect();
    if options.sort_lists {
        items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }
    items
        .into_iter()
        .map(|license| match license {
            License::Named { name, text, url } => {
                let mut inner = Map::new();
                put_str(&mut inner, "name", name);
                if let Some(text) = text {
                    put(&mut inner, "text", attached_text_to_value(text));
                }
                put_opt_str(&mut inner, "url", url.as_deref());
                wrap_license(inner)
            }
            License::Spdx { id, text, url } => {
                let mut inner = Map::new();
                put_str(&mut inner, "id", id.as_str());
                if let Some(text) = text {
                    put(&mut inner, "text", attached_text_to_value(text));
                }
                put_opt_str(&mut inner, "url", url.as_deref());
                wrap_license(inner)
            }
            License::Expression(expression) => {
                let mut map = Map::new();
                put_str(&mut map, "expression", expression.as_str());
                Value::Object(map)
            }
        })
        .collect()
}

fn wrap_license(inner: Map<String, Value>) -> Value {
    let mut map = Map::new();
    put(&mut map, "license", Value::Object(inner));
    Value::Object(map)
}

fn attached_text_to_value(text: &AttachedText) -> Value {
    let mut map = Map::new();
    put_str(&mut map, "content", &text.content);
    put_opt_str(&mut map, "contentType", text.content_type.as_deref());
    put_opt_str(&mut map, "encoding", text.encoding.as_deref());
    Value::Object(map)
}

fn normalize_organizational_entity(
    entity: &OrganizationalEntity,
    options: &NormalizeOptions,
) -> Option<Value> {
    let mut map = Map::new();
    put_opt_str(&mut map, "name", entity.name.as_deref());
    let mut urls: Vec<&str> = entity
        .urls
        .iter()
        .map(String::as_str)
        .filter(|u| !u.is_empty())
        .collect();
    if options.sort_lists {
        urls.sort_unstable();
    }
    if !urls.is_empty() {
        put(
            &mut map,
            "url",
            Value::Array(urls.into_iter().map(Value::from).collect()),
        );
    }
    let contacts = normalize_contacts(&entity.contacts, options);
    if !contacts.is_empty() {
        put(&mut map, "contact", Value::Array(contacts));
    }
    if map.is_empty() {
        None
    } else {
        Some(Value::Object(map))
    }
}

fn normalize_contacts(contacts: &[OrganizationalContact], options: &NormalizeOptions) -> Vec<Value> {
    let mut items: Vec<&OrganizationalContact> = contacts.iter().collect();
    if options.sort_lists {
        items.sort_by(|a, b| order::contacts(a, b));
    }
    items
        .into_iter()
        .filter_map(|contact| {
            let mut map = Map::new();
            put_opt_str(&mut map, "name", contact.name.as_deref());
            put_opt_str(&mut map, "email", contact.email.as_deref());
            put_opt_str(&mut map, "phone", contact.phone.as_deref());
            if map.is_empty() {
                None
            } else {
                Some(Value::Object(map))
            }
        })
        .collect()
}

fn normalize_properties(properties: &[Property], options: &NormalizeOptions) -> Vec<Value> {
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
            let mut map = Map::new();
            put_str(&mut map, "name", &property.name);
            put_str(&mut map, "value", &property.value);
            Value::Object(map)
        })
        .collect()
}

fn put(map: &mut Map<String, Value>, key: &str, value: Value) {
    map.insert(key.to_string(), value);
}

fn put_str(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::from(value));
}

/// Insert an optional string field; `None` and the empty string are absent.
fn put_opt_str(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = nonempty(value) {
        put_str(map, key, value);
    }
}

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
