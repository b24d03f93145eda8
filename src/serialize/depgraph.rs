//! Dependency-graph derivation.
//!
//! The model stores dependencies per node, on a nested tree; the wire
//! formats carry one flat `{ref, dependsOn[]}` list. The normalize direction
//! flattens, the denormalize direction re-attaches dependency sets onto the
//! reconstructed tree.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::{Bom, Node, NodeGraph, NodeId};

/// One flattened dependency-graph entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// Identity of the owning node.
    pub dependency_ref: String,
    /// Identities this node depends on, restricted to nodes present in the
    /// document tree.
    pub depends_on: Vec<String>,
}

/// Derive the flat dependency graph for `bom`.
///
/// Returns `None` when `metadata.component` is absent or carries no ref
/// value: without an entry point the whole section is omitted, and no
/// implicit entry point is invented.
///
/// Dependency targets that do not resolve to a node of the document tree
/// (dangling or foreign refs) are silently dropped — a deliberate leniency.
#[must_use]
pub fn derive_dependencies(bom: &Bom, sort: bool) -> Option<Vec<DependencyEntry>> {
    let root = bom.metadata.component?;
    bom.graph.bom_ref(root).nonempty_value()?;

    // identity -> explicit dependency set, in first-seen tree order
    let mut map: IndexMap<NodeId, &[NodeId]> = IndexMap::new();
    collect(&bom.graph, root, &mut map);
    for &id in &bom.components {
        collect(&bom.graph, id, &mut map);
    }
    for &id in &bom.services {
        collect(&bom.graph, id, &mut map);
    }

    let mut entries = Vec::with_capacity(map.len());
    let mut dropped = 0usize;
    for (&id, deps) in &map {
        let Some(ref_value) = bom.graph.bom_ref(id).nonempty_value() else {
            continue;
        };
        let mut depends_on = Vec::with_capacity(deps.len());
        for &target in *deps {
            if !map.contains_key(&target) {
                dropped += 1;
                continue;
            }
            if let Some(value) = bom.graph.bom_ref(target).nonempty_value() {
                depends_on.push(value.to_string());
            }
        }
        if sort {
            depends_on.sort_unstable();
        }
        entries.push(DependencyEntry {
            dependency_ref: ref_value.to_string(),
            depends_on,
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped dangling dependency references");
    }
    if sort {
        entries.sort_by(|a, b| a.dependency_ref.cmp(&b.dependency_ref));
    }
    Some(entries)
}

fn collect<'g>(graph: &'g NodeGraph, id: NodeId, map: &mut IndexMap<NodeId, &'g [NodeId]>) {
    if map.contains_key(&id) {
        return;
    }
    match graph.node(id) {
        Node::Component(component) => {
            map.insert(id, &component.dependencies);
            for &child in &component.components {
                collect(graph, child, map);
            }
        }
        Node::Service(service) => {
            map.insert(id, &service.dependencies);
            for &child in &service.services {
                collect(graph, child, map);
            }
        }
        Node::Ref(_) => {}
    }
}

/// Re-attach dependency sets from flat entries onto the reconstructed tree
/// (phase two of denormalization; phase one built every node with an empty
/// dependency set plus a ref-string index).
///
/// A `dependsOn` target that resolves to no node still becomes a weak edge:
/// a detached identity node is allocated (one per unique string), so a
/// denormalize → normalize round trip is lossless for refs defined out of
/// array order.
pub fn apply_dependencies(bom: &mut Bom, entries: &[DependencyEntry]) {
    let mut index: HashMap<String, NodeId> = HashMap::new();
    for (id, node) in bom.graph.iter() {
        if let Some(value) = node.bom_ref().nonempty_value() {
            index.entry(value.to_string()).or_insert(id);
        }
    }

    for entry in entries {
        let Some(&owner) = index.get(&entry.dependency_ref) else {
            tracing::debug!(
                dependency_ref = %entry.dependency_ref,
                "dependency entry names a ref with no owning node"
            );
            continue;
        };
        for target_ref in &entry.depends_on {
            let target = match index.get(target_ref) {
                Some(&existing) => existing,
                None => {
                    let placeholder = bom.graph.add_ref(target_ref.clone());
                    index.insert(target_ref.clone(), placeholder);
                    placeholder
                }
            };
            match bom.graph.node_mut(owner) {
                Node::Component(component) => component.dependencies.push(target),
                Node::Service(service) => service.dependencies.push(target),
                // a detached identity cannot own dependencies
                Node::Ref(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, ComponentType, Service};

    fn library(name: &str) -> Component {
        Component::new(ComponentType::Library, name).with_bom_ref(name)
    }

    fn bom_with_root() -> (Bom, NodeId) {
        let mut bom = Bom::new();
        let root = bom
            .graph
            .add_component(Component::new(ComponentType::Application, "app").with_bom_ref("app"));
        bom.metadata.component = Some(root);
        (bom, root)
    }

    #[test]
    fn no_entry_point_means_no_section() {
        let mut bom = Bom::new();
        let a = bom.graph.add_component(library("a"));
        bom.components.push(a);
        assert_eq!(derive_dependencies(&bom, false), None);
    }

    #[test]
    fn unset_entry_point_ref_means_no_section() {
        let mut bom = Bom::new();
        let root = bom
            .graph
            .add_component(Component::new(ComponentType::Application, "app"));
        bom.metadata.component = Some(root);
        assert_eq!(derive_dependencies(&bom, false), None);
    }

    #[test]
    fn flattens_nested_nodes_and_their_edges() {
        let (mut bom, root) = bom_with_root();
        let inner = bom.graph.add_component(library("inner"));
        let mut outer = library("outer");
        outer.components.push(inner);
        outer.dependencies.push(inner);
        let outer = bom.graph.add_component(outer);
        bom.components.push(outer);
        if let Some(c) = bom.graph.component_mut(root) {
            c.dependencies.push(outer);
        }

        let entries = derive_dependencies(&bom, true).expect("has entry point");
        let refs: Vec<_> = entries.iter().map(|e| e.dependency_ref.as_str()).collect();
        assert_eq!(refs, vec!["app", "inner", "outer"]);
        let outer_entry = entries
            .iter()
            .find(|e| e.dependency_ref == "outer")
            .expect("outer entry");
        assert_eq!(outer_entry.depends_on, vec!["inner".to_string()]);
    }

    #[test]
    fn foreign_targets_are_dropped() {
        let (mut bom, root) = bom_with_root();
        let foreign = bom.graph.add_ref("not-in-tree");
        if let Some(c) = bom.graph.component_mut(root) {
            c.dependencies.push(foreign);
        }

        let entries = derive_dependencies(&bom, false).expect("has entry point");
        let root_entry = &entries[0];
        assert_eq!(root_entry.dependency_ref, "app");
        assert!(root_entry.depends_on.is_empty());
    }

    #[test]
    fn services_participate_in_the_graph() {
        let (mut bom, root) = bom_with_root();
        let svc = bom.graph.add_service(Service::new("auth").with_bom_ref("svc-auth"));
        bom.services.push(svc);
        if let Some(c) = bom.graph.component_mut(root) {
            c.dependencies.push(svc);
        }

        let entries = derive_dependencies(&bom, true).expect("has entry point");
        assert_eq!(entries[0].depends_on, vec!["svc-auth".to_string()]);
    }

    #[test]
    fn apply_resolves_out_of_order_and_unknown_refs() {
        let (mut bom, root) = bom_with_root();
        let lib = bom.graph.add_component(library("lib"));
        bom.components.push(lib);

        apply_dependencies(
            &mut bom,
            &[
                DependencyEntry {
                    dependency_ref: "app".to_string(),
                    depends_on: vec!["lib".to_string(), "ghost".to_string()],
                },
                DependencyEntry {
                    dependency_ref: "lib".to_string(),
                    depends_on: vec!["ghost".to_string()],
                },
            ],
        );

        let app_deps = &bom.graph.component(root).expect("root").dependencies;
        assert_eq!(app_deps.len(), 2);
        assert_eq!(app_deps[0], lib);
        // both "ghost" edges share one placeholder identity
        let lib_deps = &bom.graph.component(lib).expect("lib").dependencies;
        assert_eq!(lib_deps.len(), 1);
        assert_eq!(app_deps[1], lib_deps[0]);
        assert_eq!(
            bom.graph.bom_ref(lib_deps[0]).value(),
            Some("ghost")
        );

        // ghost is not part of the tree, so deriving drops it again
        let entries = derive_dependencies(&bom, true).expect("has entry point");
        let app_entry = entries
            .iter()
            .find(|e| e.dependency_ref == "app")
            .expect("app entry");
        assert_eq!(app_entry.depends_on, vec!["lib".to_string()]);
    }
}
