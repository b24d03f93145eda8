//! Sort determinism and profile-gated omission behavior.

use sbom_codec::model::{
    Bom, Component, ComponentType, ExternalReference, ExternalReferenceType, HashAlgorithm,
    License, Lifecycle, LifecyclePhase, Property, Tool,
};
use sbom_codec::serialize::{to_json_string, to_json_value, to_xml_string, NormalizeOptions};
use sbom_codec::spec::SpecVersion;
use serde_json::Value;

/// Build the same logical document with collections inserted in the given
/// order (forward or reversed).
fn shuffled_bom(reverse: bool) -> Bom {
    let mut bom = Bom::new();

    let mut names = vec!["alpha", "beta", "gamma"];
    let mut hash_pairs = vec![
        (HashAlgorithm::Md5, "a".repeat(32)),
        (HashAlgorithm::Sha1, "b".repeat(40)),
        (HashAlgorithm::Sha256, "c".repeat(64)),
    ];
    let mut properties = vec![
        Property::new("one", "1"),
        Property::new("two", "2"),
        Property::new("three", "3"),
    ];
    let mut references = vec![
        ExternalReference::new(ExternalReferenceType::Vcs, "https://example.com/vcs"),
        ExternalReference::new(ExternalReferenceType::Website, "https://example.com"),
        ExternalReference::new(ExternalReferenceType::Chat, "https://example.com/chat"),
    ];
    let mut licenses = vec![
        License::spdx("MIT").expect("valid"),
        License::named("Custom"),
        License::expression("MIT OR Apache-2.0").expect("valid"),
    ];
    let mut tools = vec![
        Tool::new("vendor-b", "tool-b", "2.0"),
        Tool::new("vendor-a", "tool-a", "1.0"),
    ];
    if reverse {
        names.reverse();
        hash_pairs.reverse();
        properties.reverse();
        references.reverse();
        licenses.reverse();
        tools.reverse();
    }

    bom.metadata.tools = tools;
    bom.metadata.lifecycles = vec![
        Lifecycle::Phase(LifecyclePhase::Build),
        Lifecycle::Phase(LifecyclePhase::Design),
    ];
    if reverse {
        bom.metadata.lifecycles.reverse();
    }

    let root = bom
        .graph
        .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("app"));
    bom.metadata.component = Some(root);

    let mut ids = Vec::new();
    for name in names {
        let mut component = Component::new(ComponentType::Library, name)
            .with_bom_ref(name)
            .with_version("1.0.0");
        for (alg, content) in &hash_pairs {
            component.hashes.insert(*alg, content.clone());
        }
        component.properties = properties.clone();
        component.external_references = references.clone();
        component.licenses = licenses.clone();
        ids.push(bom.graph.add_component(component));
    }
    bom.components = ids.clone();

    if let Some(component) = bom.graph.component_mut(root) {
        component.dependencies = ids;
        if reverse {
            component.dependencies.reverse();
        }
    }

    bom
}

#[test]
fn sorted_json_output_is_byte_identical_across_insertion_orders() {
    let options = NormalizeOptions { sort_lists: true };
    let a = to_json_string(&mut shuffled_bom(false), SpecVersion::V1_5, &options)
        .expect("normalizes");
    let b = to_json_string(&mut shuffled_bom(true), SpecVersion::V1_5, &options)
        .expect("normalizes");
    assert_eq!(a, b);
}

#[test]
fn sorted_xml_output_is_byte_identical_across_insertion_orders() {
    let options = NormalizeOptions { sort_lists: true };
    let a = to_xml_string(&mut shuffled_bom(false), SpecVersion::V1_5, &options)
        .expect("normalizes");
    let b = to_xml_string(&mut shuffled_bom(true), SpecVersion::V1_5, &options)
        .expect("normalizes");
    assert_eq!(a, b);
}

#[test]
fn serializing_twice_yields_identical_output() {
    let options = NormalizeOptions { sort_lists: true };
    let mut bom = shuffled_bom(false);
    let first = to_json_string(&mut bom, SpecVersion::V1_6, &options).expect("normalizes");
    let second = to_json_string(&mut bom, SpecVersion::V1_6, &options).expect("normalizes");
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Omission, never error
// ---------------------------------------------------------------------------

fn component_names(doc: &Value) -> Vec<String> {
    doc.get("components")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn unsupported_component_type_omits_that_component_only() {
    let mut bom = Bom::new();
    let model = bom.graph.add_component(
        Component::new(ComponentType::MachineLearningModel, "classifier").with_version("1"),
    );
    let lib = bom
        .graph
        .add_component(Component::new(ComponentType::Library, "utils").with_version("1"));
    bom.components.extend([model, lib]);

    // 1.4 does not know machine-learning-model
    let doc = to_json_value(&mut bom, SpecVersion::V1_4, &NormalizeOptions::default())
        .expect("normalizes without error");
    assert_eq!(component_names(&doc), vec!["utils"]);

    // 1.5 does
    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    assert_eq!(component_names(&doc), vec!["classifier", "utils"]);
}

#[test]
fn malformed_hash_content_omits_that_hash_only() {
    let mut bom = Bom::new();
    let mut component = Component::new(ComponentType::Library, "lib").with_version("1");
    component.hashes.insert(HashAlgorithm::Sha256, "a".repeat(64));
    component.hashes.insert(HashAlgorithm::Md5, "not-hex".to_string());
    let id = bom.graph.add_component(component);
    bom.components.push(id);

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    let hashes = doc["components"][0]["hashes"].as_array().expect("hashes");
    assert_eq!(hashes.len(), 1);
    assert_eq!(hashes[0]["alg"], "SHA-256");
}

#[test]
fn unsupported_external_reference_type_is_omitted_per_version() {
    let mut bom = Bom::new();
    let mut component = Component::new(ComponentType::Library, "lib").with_version("1");
    component.external_references = vec![
        ExternalReference::new(ExternalReferenceType::Website, "https://example.com"),
        ExternalReference::new(
            ExternalReferenceType::ReleaseNotes,
            "https://example.com/notes",
        ),
    ];
    let id = bom.graph.add_component(component);
    bom.components.push(id);

    let doc = to_json_value(&mut bom, SpecVersion::V1_3, &NormalizeOptions::default())
        .expect("normalizes");
    let refs = doc["components"][0]["externalReferences"]
        .as_array()
        .expect("externalReferences");
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0]["type"], "website");

    let doc = to_json_value(&mut bom, SpecVersion::V1_4, &NormalizeOptions::default())
        .expect("normalizes");
    let refs = doc["components"][0]["externalReferences"]
        .as_array()
        .expect("externalReferences");
    assert_eq!(refs.len(), 2);
}

#[test]
fn properties_and_lifecycles_are_gated_by_version() {
    let mut bom = Bom::new();
    bom.metadata.lifecycles = vec![Lifecycle::Phase(LifecyclePhase::Build)];
    let mut component = Component::new(ComponentType::Library, "lib").with_version("1");
    component.properties = vec![Property::new("k", "v")];
    let id = bom.graph.add_component(component);
    bom.components.push(id);

    let doc = to_json_value(&mut bom, SpecVersion::V1_2, &NormalizeOptions::default())
        .expect("normalizes");
    assert!(doc["components"][0].get("properties").is_none());
    assert!(doc.get("metadata").is_none() || doc["metadata"].get("lifecycles").is_none());

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    assert!(doc["components"][0].get("properties").is_some());
    assert!(doc["metadata"]["lifecycles"].is_array());
}

#[test]
fn missing_component_version_is_emitted_empty_only_when_required() {
    let mut bom = Bom::new();
    let id = bom
        .graph
        .add_component(Component::new(ComponentType::Library, "lib"));
    bom.components.push(id);

    // 1.2 requires the field
    let doc = to_json_value(&mut bom, SpecVersion::V1_2, &NormalizeOptions::default())
        .expect("normalizes");
    assert_eq!(doc["components"][0]["version"], "");

    // 1.4 dropped the requirement
    let doc = to_json_value(&mut bom, SpecVersion::V1_4, &NormalizeOptions::default())
        .expect("normalizes");
    assert!(doc["components"][0].get("version").is_none());
}

#[test]
fn vulnerability_rating_method_is_gated_per_version() {
    let mut bom = Bom::new();
    let mut vuln = sbom_codec::model::Vulnerability::new("CVE-2024-0001");
    vuln.ratings = vec![
        sbom_codec::model::VulnerabilityRating {
            score: Some(5.0),
            severity: None,
            method: Some(sbom_codec::model::RatingMethod::CvssV31),
            vector: None,
        },
        sbom_codec::model::VulnerabilityRating {
            score: Some(6.0),
            severity: None,
            method: Some(sbom_codec::model::RatingMethod::CvssV4),
            vector: None,
        },
    ];
    bom.vulnerabilities.push(vuln);

    // 1.3 has no vulnerabilities section at all
    let doc = to_json_value(&mut bom, SpecVersion::V1_3, &NormalizeOptions::default())
        .expect("normalizes");
    assert!(doc.get("vulnerabilities").is_none());

    // 1.4 knows CVSSv31 but not CVSSv4
    let doc = to_json_value(&mut bom, SpecVersion::V1_4, &NormalizeOptions::default())
        .expect("normalizes");
    let ratings = doc["vulnerabilities"][0]["ratings"].as_array().expect("ratings");
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["method"], "CVSSv31");

    // 1.5 knows both
    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    assert_eq!(
        doc["vulnerabilities"][0]["ratings"]
            .as_array()
            .expect("ratings")
            .len(),
        2
    );
}

#[test]
fn xml_root_carries_namespace_and_document_attributes() {
    let mut bom = Bom::new();
    bom.version = 3;
    bom.serial_number = Some(
        sbom_codec::model::UrnUuid::parse("urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79")
            .expect("valid"),
    );
    let out = to_xml_string(&mut bom, SpecVersion::V1_6, &NormalizeOptions::default())
        .expect("renders");
    assert!(out.contains("xmlns=\"http://cyclonedx.org/schema/bom/1.6\""));
    assert!(out.contains("serialNumber=\"urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79\""));
    assert!(out.contains("version=\"3\""));
}
