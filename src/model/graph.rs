//! Arena-backed storage for the component/service graph.
//!
//! Components and services nest (a component may own subcomponents, a
//! service may own subservices) and additionally cross-reference each other
//! through dependency edges. Both edge kinds are stored as [`NodeId`]
//! indices into one arena: the `components`/`services` vectors on an entity
//! are owning edges, the `dependencies` vector is non-owning. Reference
//! identity is the arena slot, never the ref string — two nodes carrying
//! equal ref strings remain distinct identities until the serializer
//! discriminates them.

use serde::{Deserialize, Serialize};

use super::{Component, Service};

/// Index of a node in a [`NodeGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

/// Identity cell used to cross-reference nodes within one document.
///
/// The value is optional. The serializer assigns transient synthetic values
/// to unset or colliding refs for the duration of one call and restores the
/// original values afterwards; callers never observe the mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomRef {
    value: Option<String>,
}

impl BomRef {
    /// An identity with no assigned value.
    #[must_use]
    pub const fn unset() -> Self {
        Self { value: None }
    }

    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value, with the empty string treated as unset.
    #[must_use]
    pub fn nonempty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }
}

impl From<&str> for BomRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BomRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A node stored in the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Component(Component),
    Service(Service),
    /// A bare identity with no backing entity: the target of an unresolved
    /// or foreign dependency edge. Never part of the owned document tree.
    Ref(BomRef),
}

impl Node {
    #[must_use]
    pub fn bom_ref(&self) -> &BomRef {
        match self {
            Self::Component(c) => &c.bom_ref,
            Self::Service(s) => &s.bom_ref,
            Self::Ref(r) => r,
        }
    }

    pub(crate) fn bom_ref_mut(&mut self) -> &mut BomRef {
        match self {
            Self::Component(c) => &mut c.bom_ref,
            Self::Service(s) => &mut s.bom_ref,
            Self::Ref(r) => r,
        }
    }

    #[must_use]
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Self::Component(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_service(&self) -> Option<&Service> {
        match self {
            Self::Service(s) => Some(s),
            _ => None,
        }
    }
}

/// The arena holding every component, service, and detached identity of one
/// document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_component(&mut self, component: Component) -> NodeId {
        self.push(Node::Component(component))
    }

    pub fn add_service(&mut self, service: Service) -> NodeId {
        self.push(Node::Service(service))
    }

    /// Add a detached identity node, usable only as a dependency target.
    pub fn add_ref(&mut self, value: impl Into<String>) -> NodeId {
        self.push(Node::Ref(BomRef::new(value)))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Look up a node. Panics if the id comes from a different graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    #[must_use]
    pub fn component(&self, id: NodeId) -> Option<&Component> {
        self.get(id).and_then(Node::as_component)
    }

    pub fn component_mut(&mut self, id: NodeId) -> Option<&mut Component> {
        match self.get_mut(id) {
            Some(Node::Component(c)) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn service(&self, id: NodeId) -> Option<&Service> {
        self.get(id).and_then(Node::as_service)
    }

    pub fn service_mut(&mut self, id: NodeId) -> Option<&mut Service> {
        match self.get_mut(id) {
            Some(Node::Service(s)) => Some(s),
            _ => None,
        }
    }

    /// The identity cell of a node.
    #[must_use]
    pub fn bom_ref(&self, id: NodeId) -> &BomRef {
        self.node(id).bom_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
