//! Property-based tests for validators and the identity discriminator.
//!
//! Ensures constructors and the serialize path handle arbitrary input
//! without panicking, and that the discriminator's restore invariant holds
//! across random ref-value sets.

use proptest::prelude::*;
use sbom_codec::model::{Bom, Component, ComponentType, HashAlgorithm, UrnUuid};
use sbom_codec::serialize::{to_json_value, NormalizeOptions};
use sbom_codec::spec::{profile, SpecVersion};
use std::collections::HashSet;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn urn_uuid_parse_never_panics(s in "\\PC{0,100}") {
        let _ = UrnUuid::parse(s);
    }

    #[test]
    fn urn_uuid_accepts_exactly_the_pattern(hex in "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}") {
        let prefixed = format!("urn:uuid:{}", hex);
        prop_assert!(UrnUuid::parse(prefixed).is_ok());
        prop_assert!(UrnUuid::parse(hex).is_err());
    }

    #[test]
    fn hash_value_validation_never_panics_and_matches_shape(
        content in "\\PC{0,140}",
    ) {
        let p = profile(SpecVersion::V1_5);
        let expected = content.len() == 64 && content.bytes().all(|b| b.is_ascii_hexdigit());
        prop_assert_eq!(p.supports_hash_value(HashAlgorithm::Sha256, &content), expected);
    }

    #[test]
    fn license_expression_parse_never_panics(s in "\\PC{0,120}") {
        let _ = sbom_codec::model::LicenseExpression::parse(s);
    }

    #[test]
    fn discriminator_restores_and_emits_unique_refs(
        refs in prop::collection::vec(prop::option::of("[a-z0-9:.-]{0,10}"), 0..8),
    ) {
        let mut bom = Bom::new();
        let root = bom.graph.add_component(
            Component::new(ComponentType::Application, "app").with_bom_ref("root-app"),
        );
        bom.metadata.component = Some(root);

        let mut ids = Vec::new();
        for (index, value) in refs.iter().enumerate() {
            let mut component = Component::new(ComponentType::Library, format!("lib-{index}"))
                .with_version("1.0.0");
            if let Some(value) = value {
                component = component.with_bom_ref(value.clone());
            }
            let id = bom.graph.add_component(component);
            ids.push(id);
            bom.components.push(id);
        }

        let doc = to_json_value(&mut bom, SpecVersion::V1_5, &NormalizeOptions::default())
            .expect("serialize never fails for these documents");

        // emitted refs are non-empty and pairwise distinct
        let entries = doc["dependencies"].as_array().expect("root present");
        let emitted: Vec<&str> = entries
            .iter()
            .filter_map(|e| e["ref"].as_str())
            .collect();
        prop_assert_eq!(emitted.len(), refs.len() + 1);
        prop_assert!(emitted.iter().all(|r| !r.is_empty()));
        let distinct: HashSet<_> = emitted.iter().collect();
        prop_assert_eq!(distinct.len(), emitted.len());

        // every original value is restored, including absent ones
        for (id, original) in ids.iter().zip(refs.iter()) {
            let after = bom.graph.bom_ref(*id).value();
            prop_assert_eq!(after, original.as_deref());
        }
    }
}
