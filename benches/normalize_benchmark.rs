//! Benchmarks for the normalize path.

use criterion::{criterion_group, criterion_main, Criterion};
use sbom_codec::model::{Bom, Component, ComponentType, HashAlgorithm};
use sbom_codec::serialize::{to_json_value, to_xml_element, NormalizeOptions};
use sbom_codec::spec::SpecVersion;
use std::hint::black_box;

fn synthetic_bom(component_count: usize) -> Bom {
    let mut bom = Bom::new();
    let root = bom
        .graph
        .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("app"));
    bom.metadata.component = Some(root);

    let mut ids = Vec::with_capacity(component_count);
    for index in 0..component_count {
        let mut component = Component::new(ComponentType::Library, format!("lib-{index}"))
            .with_bom_ref(format!("lib-{index}"))
            .with_version("1.0.0");
        component
            .hashes
            .insert(HashAlgorithm::Sha256, format!("{index:064x}"));
        ids.push(bom.graph.add_component(component));
    }
    bom.components = ids.clone();
    if let Some(component) = bom.graph.component_mut(root) {
        component.dependencies = ids;
    }
    bom
}

fn benchmark_normalize(c: &mut Criterion) {
    let options = NormalizeOptions { sort_lists: true };

    c.bench_function("normalize_json_500", |b| {
        let mut bom = synthetic_bom(500);
        b.iter(|| {
            let doc = to_json_value(&mut bom, SpecVersion::V1_5, &options)
                .expect("normalizes");
            black_box(doc);
        });
    });

    c.bench_function("normalize_xml_500", |b| {
        let mut bom = synthetic_bom(500);
        b.iter(|| {
            let tree = to_xml_element(&mut bom, SpecVersion::V1_5, &options)
                .expect("normalizes");
            black_box(tree);
        });
    });
}

criterion_group!(benches, benchmark_normalize);
criterion_main!(benches);
