//! Dependency-graph and reference-identity behavior through the public
//! serialization entry points.

use sbom_codec::model::{Bom, Component, ComponentType};
use sbom_codec::serialize::{to_json_value, NormalizeOptions};
use sbom_codec::spec::SpecVersion;
use serde_json::Value;
use std::collections::HashSet;

/// Capture engine logs (dropped dangling refs, reassignment counts) when a
/// test run sets `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn library(name: &str) -> Component {
    Component::new(ComponentType::Library, name)
}

fn dependency_refs(doc: &Value) -> Vec<String> {
    doc.get("dependencies")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e.get("ref").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn absent_entry_point_omits_the_dependencies_section() {
    let mut bom = Bom::new();
    let lib = bom.graph.add_component(library("solo"));
    bom.components.push(lib);

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    assert!(doc.get("dependencies").is_none());
}

#[test]
fn colliding_and_absent_refs_become_unique_and_are_restored() {
    let mut bom = Bom::new();
    let root = bom
        .graph
        .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("dup"));
    bom.metadata.component = Some(root);

    let a = bom.graph.add_component(library("a").with_bom_ref("dup"));
    let b = bom.graph.add_component(library("b").with_bom_ref("dup"));
    let c = bom.graph.add_component(library("c")); // absent ref
    bom.components.extend([a, b, c]);

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");

    let refs = dependency_refs(&doc);
    assert_eq!(refs.len(), 4);
    let distinct: HashSet<_> = refs.iter().collect();
    assert_eq!(distinct.len(), 4, "all emitted refs distinct: {refs:?}");

    // caller-owned data is untouched after the call
    assert_eq!(bom.graph.bom_ref(root).value(), Some("dup"));
    assert_eq!(bom.graph.bom_ref(a).value(), Some("dup"));
    assert_eq!(bom.graph.bom_ref(b).value(), Some("dup"));
    assert_eq!(bom.graph.bom_ref(c).value(), None);
}

#[test]
fn foreign_dependency_targets_are_filtered_from_depends_on() {
    init_tracing();
    let mut bom = Bom::new();
    let root = bom
        .graph
        .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("app"));
    bom.metadata.component = Some(root);

    let lib = bom.graph.add_component(library("lib").with_bom_ref("lib"));
    bom.components.push(lib);

    let foreign = bom.graph.add_ref("not-in-tree");
    if let Some(component) = bom.graph.component_mut(root) {
        component.dependencies.push(lib);
        component.dependencies.push(foreign);
    }

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
        .expect("normalizes");
    let entries = doc["dependencies"].as_array().expect("dependencies");
    let app_entry = entries
        .iter()
        .find(|e| e["ref"] == "app")
        .expect("app entry");
    let depends_on: Vec<&str> = app_entry["dependsOn"]
        .as_array()
        .expect("dependsOn")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(depends_on, vec!["lib"]);
}

#[test]
fn every_reachable_node_gets_a_dependency_entry() {
    let mut bom = Bom::new();
    let root = bom
        .graph
        .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("app"));
    bom.metadata.component = Some(root);

    let inner = bom.graph.add_component(library("inner").with_bom_ref("inner"));
    let mut outer = library("outer").with_bom_ref("outer");
    outer.components.push(inner);
    let outer = bom.graph.add_component(outer);
    bom.components.push(outer);

    let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions { sort_lists: true })
        .expect("normalizes");
    assert_eq!(dependency_refs(&doc), vec!["app", "inner", "outer"]);
}

#[test]
fn dependency_graph_survives_denormalization() {
    let doc = serde_json::json!({
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "version": 1,
        "metadata": {
            "component": {"type": "application", "bom-ref": "app", "name": "app"}
        },
        "components": [
            {"type": "library", "bom-ref": "lib-a", "name": "a"},
            {"type": "library", "bom-ref": "lib-b", "name": "b"}
        ],
        // lib-b's entry precedes lib-a's definition being referenced; ghost
        // never resolves at all
        "dependencies": [
            {"ref": "app", "dependsOn": ["lib-b", "lib-a"]},
            {"ref": "lib-b", "dependsOn": ["ghost"]}
        ]
    });

    let mut bom = sbom_codec::from_json_value(&doc).expect("denormalizes");
    let root = bom.metadata.component.expect("root");
    assert_eq!(
        bom.graph.component(root).expect("root").dependencies.len(),
        2
    );

    // the ghost edge exists in the model but is dropped on re-normalize
    let out = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions { sort_lists: true })
        .expect("normalizes");
    let entries = out["dependencies"].as_array().expect("dependencies");
    let lib_b = entries
        .iter()
        .find(|e| e["ref"] == "lib-b")
        .expect("lib-b entry");
    assert!(lib_b.get("dependsOn").is_none(), "ghost was dropped: {lib_b}");
}
