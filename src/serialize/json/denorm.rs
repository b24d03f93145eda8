//! JSON denormalizer factory.
//!
//! Maps the generic JSON document tree back onto the model with
//! path-qualified structural validation: every primitive field is
//! type-asserted before use, so malformed input fails close to the offending
//! field instead of producing a garbled entity. Unknown values for closed
//! enums are structural errors here — profile gating is a normalize-side
//! concern.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::DenormalizeError;
use crate::model::{
    AttachedText, Bom, Component, ComponentType, ExternalReference, ExternalReferenceType,
    HashAlgorithm, License, LicenseExpression, Lifecycle, LifecyclePhase, Metadata, NodeGraph,
    NodeId, OrganizationalContact, OrganizationalEntity, Property, Purl, RatingMethod, Scope,
    Service, Severity, SpdxId, Tool, UrnUuid, Vulnerability, VulnerabilityRating,
    VulnerabilitySource,
};
use crate::serialize::depgraph::{apply_dependencies, DependencyEntry};
use crate::spec::SpecVersionProfile;

use super::JsonPath;

type Result<T> = std::result::Result<T, DenormalizeError>;

/// Manufactures model entities from JSON values under one profile.
pub struct JsonDenormalizerFactory {
    profile: &'static SpecVersionProfile,
}

impl JsonDenormalizerFactory {
    #[must_use]
    pub fn new(profile: &'static SpecVersionProfile) -> Self {
        Self { profile }
    }

    /// Denormalize a whole document.
    pub fn denormalize_bom(&self, value: &Value) -> Result<Bom> {
        let path = JsonPath::root();
        let obj = as_object(value, &path)?;

        // a document routed to the wrong factory is a structural error
        if let Some(declared) = obj.get("specVersion") {
            let spec_path = path.key("specVersion");
            let declared = as_str(declared, &spec_path)?;
            if declared != self.profile.version().as_str() {
                return Err(DenormalizeError::InvalidValue {
                    path: spec_path.to_string(),
                    message: format!(
                        "document declares spec version {declared:?}, expected {:?}",
                        self.profile.version().as_str()
                    ),
                });
            }
        }

        let mut bom = Bom::new();

        if let Some(version) = obj.get("version") {
            let version_path = path.key("version");
            let version = as_u32(version, &version_path)?;
            if version == 0 {
                return Err(DenormalizeError::InvalidValue {
                    path: version_path.to_string(),
                    message: "document version must be strictly positive".to_string(),
                });
            }
            bom.version = version;
        }

        if let Some(serial) = opt_str(obj, "serialNumber", &path)? {
            let serial_path = path.key("serialNumber");
            bom.serial_number = Some(UrnUuid::parse(serial).map_err(|err| {
                DenormalizeError::InvalidValue {
                    path: serial_path.to_string(),
                    message: err.to_string(),
                }
            })?);
        }

        if let Some(metadata) = obj.get("metadata") {
            bom.metadata =
                self.denormalize_metadata(metadata, &mut bom.graph, &path.key("metadata"))?;
        }

        if let Some(components) = obj.get("components") {
            let components_path = path.key("components");
            for (index, entry) in as_array(components, &components_path)?.iter().enumerate() {
                let id = self.denormalize_component(
                    entry,
                    &mut bom.graph,
                    &components_path.index(index),
                )?;
                bom.components.push(id);
            }
        }

        if let Some(services) = obj.get("services") {
            let services_path = path.key("services");
            for (index, entry) in as_array(services, &services_path)?.iter().enumerate() {
                let id = self.denormalize_service(
                    entry,
                    &mut bom.graph,
                    &services_path.index(index),
                )?;
                bom.services.push(id);
            }
        }

        if let Some(dependencies) = obj.get("dependencies") {
            let entries =
                denormalize_dependencies(dependencies, &path.key("dependencies"))?;
            apply_dependencies(&mut bom, &entries);
        }

        if let Some(vulnerabilities) = obj.get("vulnerabilities") {
            let vulnerabilities_path = path.key("vulnerabilities");
            for (index, entry) in as_array(vulnerabilities, &vulnerabilities_path)?
                .iter()
                .enumerate()
            {
                bom.vulnerabilities.push(denormalize_vulnerability(
                    entry,
                    &vulnerabilities_path.index(index),
                )?);
            }
        }

        Ok(bom)
    }

    fn denormalize_metadata(
        &self,
        value: &Value,
        graph: &mut NodeGraph,
        path: &JsonPath,
    ) -> Result<Metadata> {
        let obj = as_object(value, path)?;
        let mut metadata = Metadata::default();

        if let Some(timestamp) = opt_str(obj, "timestamp", path)? {
            let timestamp_path = path.key("timestamp");
            let parsed = DateTime::parse_from_rfc3339(timestamp).map_err(|err| {
                DenormalizeError::InvalidValue {
                    path: timestamp_path.to_string(),
                    message: format!("not an RFC 3339 timestamp: {err}"),
                }
            })?;
            metadata.timestamp = Some(parsed.with_timezone(&Utc));
        }

        if let Some(lifecycles) = obj.get("lifecycles") {
            let lifecycles_path = path.key("lifecycles");
            for (index, entry) in as_array(lifecycles, &lifecycles_path)?.iter().enumerate() {
                metadata
                    .lifecycles
                    .push(denormalize_lifecycle(entry, &lifecycles_path.index(index))?);
            }
        }

        if let Some(tools) = obj.get("tools") {
            let tools_path = path.key("tools");
            for (index, entry) in as_array(tools, &tools_path)?.iter().enumerate() {
                metadata
                    .tools
                    .push(denormalize_tool(entry, &tools_path.index(index))?);
            }
        }

        if let Some(authors) = obj.get("authors") {
            let authors_path = path.key("authors");
            for (index, entry) in as_array(authors, &authors_path)?.iter().enumerate() {
                metadata
                    .authors
                    .push(denormalize_contact(entry, &authors_path.index(index))?);
            }
        }

        if let Some(component) = obj.get("component") {
            let id =
                self.denormalize_component(component, graph, &path.key("component"))?;
            metadata.component = Some(id);
        }

        if let Some(manufacture) = obj.get("manufacture") {
            metadata.manufacture = Some(denormalize_organizational_entity(
                manufacture,
                &path.key("manufacture"),
            )?);
        }
        if let Some(supplier) = obj.get("supplier") {
            metadata.supplier = Some(denormalize_organizational_entity(
                supplier,
                &path.key("supplier"),
            )?);
        }

        if let Some(licenses) = obj.get("licenses") {
            metadata.licenses = denormalize_licenses(licenses, &path.key("licenses"))?;
        }

        if let Some(properties) = obj.get("properties") {
            metadata.properties =
                denormalize_properties(properties, &path.key("properties"))?;
        }

        Ok(metadata)
    }

    fn denormalize_component(
        &self,
        value: &Value,
        graph: &mut NodeGraph,
        path: &JsonPath,
    ) -> Result<NodeId> {
        let obj = as_object(value, path)?;

        let type_path = path.key("type");
        let type_str = req_str(obj, "type", path)?;
        let component_type = ComponentType::parse(type_str).ok_or_else(|| {
            DenormalizeError::UnknownEnumValue {
                path: type_path.to_string(),
                kind: "component type",
                value: type_str.to_string(),
            }
        })?;

        let name = req_nonempty_str(obj, "name", path)?;
        let mut component = Component::new(component_type, name);

        if let Some(bom_ref) = opt_str(obj, "bom-ref", path)? {
            component = component.with_bom_ref(bom_ref);
        }
        component.version = opt_str(obj, "version", path)?.map(str::to_string);
        component.group = opt_str(obj, "group", path)?.map(str::to_string);
        component.description = opt_str(obj, "description", path)?.map(str::to_string);
        component.copyright = opt_str(obj, "copyright", path)?.map(str::to_string);
        component.cpe = opt_str(obj, "cpe", path)?.map(str::to_string);
        component.author = opt_str(obj, "author", path)?.map(str::to_string);
        component.publisher = opt_str(obj, "publisher", path)?.map(str::to_string);

        if let Some(scope) = opt_str(obj, "scope", path)? {
            component.scope = Some(Scope::parse(scope).ok_or_else(|| {
                DenormalizeError::UnknownEnumValue {
                    path: path.key("scope").to_string(),
                    kind: "component scope",
                    value: scope.to_string(),
                }
            })?);
        }

        if let Some(purl) = opt_str(obj, "purl", path)? {
            // keep the original parse error, qualified with the field path
            component.purl = Some(Purl::parse(purl).map_err(|source| {
                DenormalizeError::InvalidPurl {
                    path: path.key("purl").to_string(),
                    source,
                }
            })?);
        }

        if let Some(supplier) = obj.get("supplier") {
            component.supplier = Some(denormalize_organizational_entity(
                supplier,
                &path.key("supplier"),
            )?);
        }

        if let Some(licenses) = obj.get("licenses") {
            component.licenses = denormalize_licenses(licenses, &path.key("licenses"))?;
        }

        if let Some(hashes) = obj.get("hashes") {
            component.hashes = denormalize_hashes(hashes, &path.key("hashes"))?;
        }

        if let Some(references) = obj.get("externalReferences") {
            component.external_references = denormalize_external_references(
                references,
                &path.key("externalReferences"),
            )?;
        }

        if let Some(properties) = obj.get("properties") {
            component.properties =
                denormalize_properties(properties, &path.key("properties"))?;
        }

        if let Some(children) = obj.get("components") {
            let children_path = path.key("components");
            for (index, entry) in as_array(children, &children_path)?.iter().enumerate() {
                let id =
                    self.denormalize_component(entry, graph, &children_path.index(index))?;
                component.components.push(id);
            }
        }

        Ok(graph.add_component(component))
    }

    fn denormalize_service(
        &self,
        value: &Value,
        graph: &mut NodeGraph,
        path: &JsonPath,
    ) -> Result<NodeId> {
        let obj = as_object(value, path)?;

        let name = req_nonempty_str(obj, "name", path)?;
        let mut service = Service::new(name);

        if let Some(bom_ref) = opt_str(obj, "bom-ref", path)? {
            service = service.with_bom_ref(bom_ref);
        }
        service.group = opt_str(obj, "group", path)?.map(str::to_string);
        service.version = opt_str(obj, "version", path)?.map(str::to_string);
        service.description = opt_str(obj, "description", path)?.map(str::to_string);

        if let Some(provider) = obj.get("provider") {
            service.provider = Some(denormalize_organizational_entity(
                provider,
                &path.key("provider"),
            )?);
        }

        if let Some(endpoints) = obj.get("endpoints") {
            let endpoints_path = path.key("endpoints");
            for (index, entry) in as_array(endpoints, &endpoints_path)?.iter().enumerate() {
                let endpoint = as_str(entry, &endpoints_path.index(index))?;
                if !endpoint.is_empty() {
                    service.endpoints.push(endpoint.to_string());
                }
            }
        }

        if let Some(authenticated) = obj.get("authenticated") {
            service.authenticated = Some(as_bool(authenticated, &path.key("authenticated"))?);
        }
        if let Some(x_trust_boundary) = obj.get("x-trust-boundary") {
            service.x_trust_boundary =
                Some(as_bool(x_trust_boundary, &path.key("x-trust-boundary"))?);
        }

        if let Some(licenses) = obj.get("licenses") {
            service.licenses = denormalize_licenses(licenses, &path.key("licenses"))?;
        }

        if let Some(references) = obj.get("externalReferences") {
            service.external_references = denormalize_external_references(
                references,
                &path.key("externalReferences"),
            )?;
        }

        if let Some(properties) = obj.get("properties") {
            service.properties =
                denormalize_properties(properties, &path.key("properties"))?;
        }

        if let Some(children) = obj.get("services") {
            let children_path = path.key("services");
            for (index, entry) in as_array(children, &children_path)?.iter().enumerate() {
                let id = self.denormalize_service(entry, graph, &children_path.index(index))?;
                service.services.push(id);
            }
        }

        Ok(graph.add_service(service))
    }
}

fn denormalize_dependencies(value: &Value, path: &JsonPath) -> Result<Vec<DependencyEntry>> {
    let mut entries = Vec::new();
    for (index, entry) in as_array(value, path)?.iter().enumerate() {
        let entry_path = path.index(index);
        let obj = as_object(entry, &entry_path)?;
        let dependency_ref = req_nonempty_str(obj, "ref", &entry_path)?.to_string();
        let mut depends_on = Vec::new();
        if let Some(targets) = obj.get("dependsOn") {
            let targets_path = entry_path.key("dependsOn");
            for (target_index, target) in as_array(targets, &targets_path)?.iter().enumerate() {
                let target = as_str(target, &targets_path.index(target_index))?;
                if !target.is_empty() {
                    depends_on.push(target.to_string());
                }
            }
        }
        entries.push(DependencyEntry {
            dependency_ref,
            depends_on,
        });
    }
    Ok(entries)
}

fn denormalize_lifecycle(value: &Value, path: &JsonPath) -> Result<Lifecycle> {
    let obj = as_object(value, path)?;
    if let Some(phase) = opt_str(obj, "phase", path)? {
        let parsed = LifecyclePhase::parse(phase).ok_or_else(|| {
            DenormalizeError::UnknownEnumValue {
                path: path.key("phase").to_string(),
                kind: "lifecycle phase",
                value: phase.to_string(),
            }
        })?;
        return Ok(Lifecycle::Phase(parsed));
    }
    if let Some(name) = opt_str(obj, "name", path)? {
        return Ok(Lifecycle::Named {
            name: name.to_string(),
            description: opt_str(obj, "description", path)?.map(str::to_string),
        });
    }
    Err(DenormalizeError::InvalidValue {
        path: path.to_string(),
        message: "lifecycle requires either a phase or a name".to_string(),
    })
}

fn denormalize_tool(value: &Value, path: &JsonPath) -> Result<Tool> {
    let obj = as_object(value, path)?;
    let mut tool = Tool::default();
    tool.vendor = opt_str(obj, "vendor", path)?.map(str::to_string);
    tool.name = opt_str(obj, "name", path)?.map(str::to_string);
    tool.version = opt_str(obj, "version", path)?.map(str::to_string);
    if let Some(hashes) = obj.get("hashes") {
        tool.hashes = denormalize_hashes(hashes, &path.key("hashes"))?;
    }
    if let Some(references) = obj.get("externalReferences") {
        tool.external_references =
            denormalize_external_references(references, &path.key("externalReferences"))?;
    }
    Ok(tool)
}

fn denormalize_licenses(value: &Value, path: &JsonPath) -> Result<Vec<License>> {
    let mut licenses = Vec::new();
    for (index, entry) in as_array(value, path)?.iter().enumerate() {
        let entry_path = path.index(index);
        let obj = as_object(entry, &entry_path)?;

        if let Some(expression) = opt_str(obj, "expression", &entry_path)? {
            let parsed = LicenseExpression::parse(expression).map_err(|err| {
                DenormalizeError::InvalidValue {
                    path: entry_path.key("expression").to_string(),
                    message: err.to_string(),
                }
            })?;
            licenses.push(License::Expression(parsed));
            continue;
        }

        let license_path = entry_path.key("license");
        let license = obj.get("license").ok_or_else(|| {
            DenormalizeError::MissingField {
                path: license_path.to_string(),
            }
        })?;
        let license_obj = as_object(license, &license_path)?;
        let text = match license_obj.get("text") {
            Some(text) => Some(denormalize_attached_text(text, &license_path.key("text"))?),
            None => None,
        };
        let url = opt_str(license_obj, "url", &license_path)?.map(str::to_string);

        if let Some(id) = opt_str(license_obj, "id", &license_path)? {
            let id = SpdxId::parse(id).map_err(|err| DenormalizeError::InvalidValue {
                path: license_path.key("id").to_string(),
                message: err.to_string(),
            })?;
            licenses.push(License::Spdx { id, text, url });
        } else if let Some(name) = opt_str(license_obj, "name", &license_path)? {
            licenses.push(License::Named {
                name: name.to_string(),
                text,
                url,
            });
        } else {
            return Err(DenormalizeError::InvalidValue {
                path: license_path.to_string(),
                message: "license requires either an id or a name".to_string(),
            });
        }
    }
    Ok(licenses)
}

fn denormalize_attached_text(value: &Value, path: &JsonPath) -> Result<AttachedText> {
    let obj = as_object(value, path)?;
    Ok(AttachedText {
        content: req_str(obj, "content", path)?.to_string(),
        content_type: opt_str(obj, "contentType", path)?.map(str::to_string),
        encoding: opt_str(obj, "encoding", path)?.map(str::to_string),
    })
}

fn denormalize_hashes(
    value: &Value,
    path: &JsonPath,
) -> Result<indexmap::IndexMap<HashAlgorithm, String>> {
    let mut hashes = indexmap::IndexMap::new();
    for (index, entry) in as_array(value, path)?.iter().enumerate() {
        let entry_path = path.index(index);
        let obj = as_object(entry, &entry_path)?;
        let alg_str = req_str(obj, "alg", &entry_path)?;
        let algorithm = HashAlgorithm::parse(alg_str).ok_or_else(|| {
            DenormalizeError::UnknownEnumValue {
                path: entry_path.key("alg").to_string(),
                kind: "hash algorithm",
                value: alg_str.to_string(),
            }
        })?;
        let content = req_nonempty_str(obj, "content", &entry_path)?;
        // unique-key dictionary: a repeated algorithm overwrites
        hashes.insert(algorithm, content.to_string());
    }
    Ok(hashes)
}

fn denormalize_external_references(
    value: &Value,
    path: &JsonPath,
) -> Result<Vec<ExternalReference>> {
    let mut references = Vec::new();
    for (index, entry) in as_array(value, path)?.iter().enumerate() {
        let entry_path = path.index(index);
        let obj = as_object(entry, &entry_path)?;
        let type_str = req_str(obj, "type", &entry_path)?;
        let reference_type = ExternalReferenceType::parse(type_str).ok_or_else(|| {
            DenormalizeError::UnknownEnumValue {
                path: entry_path.key("type").to_string(),
                kind: "external reference type",
                value: type_str.to_string(),
            }
        })?;
        let url = req_nonempty_str(obj, "url", &entry_path)?;
        let mut reference = ExternalReference::new(reference_type, url);
        reference.comment = opt_str(obj, "comment", &entry_path)?.map(str::to_string);
        if let Some(hashes) = obj.get("hashes") {
            reference.hashes = denormalize_hashes(hashes, &entry_path.key("hashes"))?;
        }
        references.push(reference);
    }
    Ok(references)
}

fn denormalize_organizational_entity(
    value: &Value,
    path: &JsonPath,
) -> Result<OrganizationalEntity> {
    let obj = as_object(value, path)?;
    let mut entity = OrganizationalEntity::default();
    entity.name = opt_str(obj, "name", path)?.map(str::to_string);
    if let Some(urls) = obj.get("url") {
        let urls_path = path.key("url");
        for (index, entry) in as_array(urls, &urls_path)?.iter().enumerate() {
            let url = as_str(entry, &urls_path.index(index))?;
            if !url.is_empty() {
                entity.urls.push(url.to_string());
            }
        }
    }
    if let Some(contacts) = obj.get("contact") {
        let contacts_path = path.key("contact");
        for (index, entry) in as_array(contacts, &contacts_path)?.iter().enumerate() {
            entity
                .contacts
                .push(denormalize_contact(entry, &contacts_path.index(index))?);
        }
    }
    Ok(entity)
}

fn denormalize_contact(value: &Value, path: &JsonPath) -> Result<OrganizationalContact> {
    let obj = as_object(value, path)?;
    Ok(OrganizationalContact {
        name: opt_str(obj, "name", path)?.map(str::to_string),
        email: opt_str(obj, "email", path)?.map(str::to_string),
        phone: opt_str(obj, "phone", path)?.map(str::to_string),
    })
}

fn denormalize_properties(value: &Value, path: &JsonPath) -> Result<Vec<Property>> {
    let mut properties = Vec::new();
    for (index, entry) in as_array(value, path)?.iter().enumerate() {
        let entry_path = path.index(index);
        let obj = as_object(entry, &entry_path)?;
        let name = req_nonempty_str(obj, "name", &entry_path)?;
        let value = match obj.get("value") {
            Some(value) => as_str(value, &entry_path.key("value"))?.to_string(),
            None => String::new(),
        };
        properties.push(Property::new(name, value));
    }
    Ok(properties)
}

fn denormalize_vulnerability(value: &Value, path: &JsonPath) -> Result<Vulnerability> {
    let obj = as_object(value, path)?;
    let mut vulnerability = Vulnerability::default();
    vulnerability.bom_ref = opt_str(obj, "bom-ref", path)?.map(str::to_string);
    vulnerability.id = opt_str(obj, "id", path)?.map(str::to_string);
    vulnerability.description = opt_str(obj, "description", path)?.map(str::to_string);
    vulnerability.detail = opt_str(obj, "detail", path)?.map(str::to_string);
    vulnerability.recommendation = opt_str(obj, "recommendation", path)?.map(str::to_string);

    if let Some(source) = obj.get("source") {
        let source_path = path.key("source");
        let source_obj = as_object(source, &source_path)?;
        vulnerability.source = Some(VulnerabilitySource {
            name: opt_str(source_obj, "name", &source_path)?.map(str::to_string),
            url: opt_str(source_obj, "url", &source_path)?.map(str::to_string),
        });
    }

    if let Some(ratings) = obj.get("ratings") {
        let ratings_path = path.key("ratings");
        for (index, entry) in as_array(ratings, &ratings_path)?.iter().enumerate() {
            let entry_path = ratings_path.index(index);
            let rating_obj = as_object(entry, &entry_path)?;
            let mut rating = VulnerabilityRating::default();
            if let Some(score) = rating_obj.get("score") {
                rating.score = Some(as_f64(score, &entry_path.key("score"))?);
            }
            if let Some(severity) = opt_str(rating_obj, "severity", &entry_path)? {
                rating.severity = Some(Severity::parse(severity).ok_or_else(|| {
                    DenormalizeError::UnknownEnumValue {
                        path: entry_path.key("severity").to_string(),
                        kind: "severity",
                        value: severity.to_string(),
                    }
                })?);
            }
            if let Some(method) = opt_str(rating_obj, "method", &entry_path)? {
                rating.method = Some(RatingMethod::parse(method).ok_or_else(|| {
                    DenormalizeError::UnknownEnumValue {
                        path: entry_path.key("method").to_string(),
                        kind: "rating method",
                        value: method.to_string(),
                    }
                })?);
            }
            rating.vector = opt_str(rating_obj, "vector", &entry_path)?.map(str::to_string);
            vulnerability.ratings.push(rating);
        }
    }

    if let Some(cwes) = obj.get("cwes") {
        let cwes_path = path.key("cwes");
        for (index, entry) in as_array(cwes, &cwes_path)?.iter().enumerate() {
            vulnerability
                .cwes
                .push(as_u32(entry, &cwes_path.index(index))?);
        }
    }

    if let Some(affects) = obj.get("affects") {
        let affects_path = path.key("affects");
        for (index, entry) in as_array(affects, &affects_path)?.iter().enumerate() {
            let entry_path = affects_path.index(index);
            let affect_obj = as_object(entry, &entry_path)?;
            let target = req_nonempty_str(affect_obj, "ref", &entry_path)?;
            vulnerability.affects.push(target.to_string());
        }
    }

    Ok(vulnerability)
}

// ---------------------------------------------------------------------------
// Type assertions
// ---------------------------------------------------------------------------

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "object",
            actual: json_type(value),
        })
}

fn as_array<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "array",
            actual: json_type(value),
        })
}

fn as_str<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "string",
            actual: json_type(value),
        })
}

fn as_bool(value: &Value, path: &JsonPath) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "boolean",
            actual: json_type(value),
        })
}

fn as_f64(value: &Value, path: &JsonPath) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "number",
            actual: json_type(value),
        })
}

fn as_u32(value: &Value, path: &JsonPath) -> Result<u32> {
    let number = value
        .as_u64()
        .ok_or_else(|| DenormalizeError::TypeMismatch {
            path: path.to_string(),
            expected: "non-negative integer",
            actual: json_type(value),
        })?;
    u32::try_from(number).map_err(|_| DenormalizeError::InvalidValue {
        path: path.to_string(),
        message: format!("{number} does not fit in 32 bits"),
    })
}

/// Optional string field; absent keys and empty strings are both `None`.
fn opt_str<'v>(
    obj: &'v Map<String, Value>,
    key: &'static str,
    parent: &JsonPath,
) -> Result<Option<&'v str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let value = as_str(value, &parent.key(key))?;
            Ok(if value.is_empty() { None } else { Some(value) })
        }
    }
}

fn req_str<'v>(
    obj: &'v Map<String, Value>,
    key: &'static str,
    parent: &JsonPath,
) -> Result<&'v str> {
    match obj.get(key) {
        None => Err(DenormalizeError::MissingField {
            path: parent.key(key).to_string(),
        }),
        Some(value) => as_str(value, &parent.key(key)),
    }
}

fn req_nonempty_str<'v>(
    obj: &'v Map<String, Value>,
    key: &'static str,
    parent: &JsonPath,
) -> Result<&'v str> {
    let value = req_str(obj, key, parent)?;
    if value.is_empty() {
        return Err(DenormalizeError::EmptyString {
            path: parent.key(key).to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn factory() -> JsonDenormalizerFactory {
        JsonDenormalizerFactory::new(crate::spec::profile(crate::spec::SpecVersion::V1_5))
    }

    #[test]
    fn component_type_errors_carry_the_exact_path() {
        let doc = json!({
            "specVersion": "1.5",
            "components": [
                {"type": "library", "name": "ok"},
                {"type": "flux-capacitor", "name": "bad"}
            ]
        });
        let err = factory().denormalize_bom(&doc).unwrap_err();
        match err {
            DenormalizeError::UnknownEnumValue { path, value, .. } => {
                assert_eq!(path, "/components/1/type");
                assert_eq!(value, "flux-capacitor");
            }
            other => panic!("expected UnknownEnumValue, got {other:?}"),
        }
    }

    #[test]
    fn type_mismatch_reports_expected_and_actual() {
        let doc = json!({"specVersion": "1.5", "components": {"not": "an array"}});
        let err = factory().denormalize_bom(&doc).unwrap_err();
        match err {
            DenormalizeError::TypeMismatch {
                path,
                expected,
                actual,
            } => {
                assert_eq!(path, "/components");
                assert_eq!(expected, "array");
                assert_eq!(actual, "object");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn purl_errors_wrap_the_parse_failure() {
        let doc = json!({
            "specVersion": "1.5",
            "components": [{"type": "library", "name": "x", "purl": "pkg is broken"}]
        });
        let err = factory().denormalize_bom(&doc).unwrap_err();
        match err {
            DenormalizeError::InvalidPurl { path, .. } => {
                assert_eq!(path, "/components/0/purl");
            }
            other => panic!("expected InvalidPurl, got {other:?}"),
        }
    }

    #[test]
    fn zero_document_version_is_rejected() {
        let doc = json!({"specVersion": "1.5", "version": 0});
        let err = factory().denormalize_bom(&doc).unwrap_err();
        assert!(err.to_string().contains("strictly positive"));
    }

    #[test]
    fn mismatched_spec_version_is_rejected() {
        let doc = json!({"specVersion": "1.4"});
        let err = factory().denormalize_bom(&doc).unwrap_err();
        assert!(err.to_string().contains("declares spec version"));
    }
}
