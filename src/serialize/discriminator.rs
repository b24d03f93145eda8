//! Transient bom-ref discrimination.
//!
//! Serialization requires every reachable identity to carry a non-empty,
//! globally unique ref string, but the model allows unset and colliding
//! values. The discriminator is a snapshot/restore scope: it walks the
//! owned entity tree once in first-seen order, records every original value,
//! assigns fresh synthetic values where needed, and restores the snapshot
//! when dropped — on success, error, and unwind paths alike. Callers never
//! observe the mutation.
//!
//! The scope holds the exclusive borrow of the BOM for its lifetime, which
//! also makes the "one serialize call per BOM at a time" contract a
//! compile-time fact.

use std::collections::HashSet;

use crate::model::{Bom, Node, NodeGraph, NodeId};

/// RAII scope that keeps every reachable identity unique until dropped.
pub struct BomRefDiscriminator<'a> {
    bom: &'a mut Bom,
    snapshot: Vec<(NodeId, Option<String>)>,
}

impl<'a> BomRefDiscriminator<'a> {
    /// Walk the owned tree and make every identity unique.
    pub fn discriminate(bom: &'a mut Bom) -> Self {
        let order = reachable_identities(bom);
        let mut snapshot = Vec::with_capacity(order.len());
        let mut seen: HashSet<String> = HashSet::with_capacity(order.len());
        let mut counter = 0usize;
        let mut reassigned = 0usize;

        for id in order {
            let current = bom.graph.bom_ref(id).value().map(str::to_string);
            snapshot.push((id, current.clone()));

            let keep = match &current {
                Some(value) if !value.is_empty() && !seen.contains(value) => true,
                _ => false,
            };
            if keep {
                seen.insert(current.unwrap_or_default());
                continue;
            }

            let token = loop {
                counter += 1;
                let candidate = format!("bomref:{counter}");
                if !seen.contains(&candidate) {
                    break candidate;
                }
            };
            seen.insert(token.clone());
            if let Some(node) = bom.graph.get_mut(id) {
                node.bom_ref_mut().set_value(Some(token));
            }
            reassigned += 1;
        }

        if reassigned > 0 {
            tracing::debug!(
                total = snapshot.len(),
                reassigned,
                "assigned transient bom-ref values"
            );
        }

        Self { bom, snapshot }
    }

    /// The BOM with discriminated identities.
    #[must_use]
    pub fn bom(&self) -> &Bom {
        self.bom
    }
}

impl Drop for BomRefDiscriminator<'_> {
    fn drop(&mut self) {
        for (id, value) in self.snapshot.drain(..) {
            if let Some(node) = self.bom.graph.get_mut(id) {
                node.bom_ref_mut().set_value(value);
            }
        }
    }
}

/// Every owned identity in the document, in first-seen order:
/// `metadata.component` and its subtree, then top-level components
/// depth-first, then services depth-first. Detached `Node::Ref` entries are
/// weak targets, not identities, and are excluded.
fn reachable_identities(bom: &Bom) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    if let Some(root) = bom.metadata.component {
        visit(&bom.graph, root, &mut out, &mut visited);
    }
    for &id in &bom.components {
        visit(&bom.graph, id, &mut out, &mut visited);
    }
    for &id in &bom.services {
        visit(&bom.graph, id, &mut out, &mut visited);
    }
    out
}

fn visit(
    graph: &NodeGraph,
    id: NodeId,
    out: &mut Vec<NodeId>,
    visited: &mut HashSet<NodeId>,
) {
    // owned edges form a tree; the visited set guards against accidentally
    // shared or cyclic ownership so the walk always terminates
    if !visited.insert(id) {
        return;
    }
    match graph.node(id) {
        Node::Component(component) => {
            out.push(id);
            for &child in &component.components {
                visit(graph, child, out, visited);
            }
        }
        Node::Service(service) => {
            out.push(id);
            for &child in &service.services {
                visit(graph, child, out, visited);
            }
        }
        Node::Ref(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, ComponentType};

    fn library(name: &str) -> Component {
        Component::new(ComponentType::Library, name)
    }

    #[test]
    fn assigns_unique_values_and_restores_them() {
        let mut bom = Bom::new();
        let a = bom.graph.add_component(library("a").with_bom_ref("dup"));
        let b = bom.graph.add_component(library("b").with_bom_ref("dup"));
        let c = bom.graph.add_component(library("c"));
        bom.components.extend([a, b, c]);

        {
            let scope = BomRefDiscriminator::discriminate(&mut bom);
            let bom = scope.bom();
            let values: Vec<_> = [a, b, c]
                .iter()
                .map(|&id| bom.graph.bom_ref(id).value().map(str::to_string))
                .collect();
            let set: HashSet<_> = values.iter().cloned().collect();
            assert_eq!(set.len(), 3, "all values distinct: {values:?}");
            assert!(values.iter().all(|v| v.as_deref().is_some_and(|s| !s.is_empty())));
            // first-seen keeps its original value
            assert_eq!(values[0].as_deref(), Some("dup"));
        }

        assert_eq!(bom.graph.bom_ref(a).value(), Some("dup"));
        assert_eq!(bom.graph.bom_ref(b).value(), Some("dup"));
        assert_eq!(bom.graph.bom_ref(c).value(), None);
    }

    #[test]
    fn synthetic_tokens_skip_values_already_in_use() {
        let mut bom = Bom::new();
        let taken = bom
            .graph
            .add_component(library("taken").with_bom_ref("bomref:1"));
        let unset = bom.graph.add_component(library("unset"));
        bom.components.extend([taken, unset]);

        {
            let scope = BomRefDiscriminator::discriminate(&mut bom);
            let assigned = scope.bom().graph.bom_ref(unset).value().map(str::to_string);
            assert!(assigned.is_some());
            assert_ne!(assigned.as_deref(), Some("bomref:1"));
        }
        assert_eq!(bom.graph.bom_ref(unset).value(), None);
    }

    #[test]
    fn restores_on_unwind() {
        let mut bom = Bom::new();
        let id = bom.graph.add_component(library("x"));
        bom.components.push(id);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _scope = BomRefDiscriminator::discriminate(&mut bom);
            panic!("mid-serialize failure");
        }));
        assert!(result.is_err());
        assert_eq!(bom.graph.bom_ref(id).value(), None);
    }

    #[test]
    fn nested_components_are_discriminated_too() {
        let mut bom = Bom::new();
        let child = bom.graph.add_component(library("child"));
        let mut parent = library("parent");
        parent.components.push(child);
        let parent = bom.graph.add_component(parent);
        bom.components.push(parent);

        let scope = BomRefDiscriminator::discriminate(&mut bom);
        assert!(scope.bom().graph.bom_ref(child).value().is_some());
        assert!(scope.bom().graph.bom_ref(parent).value().is_some());
    }
}
