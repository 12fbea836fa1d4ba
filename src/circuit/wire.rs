//! Ideal zero-resistance wires.

use std::fmt;

use super::types::{NodeId, WireId};

/// Default wire color on the canvas.
pub const DEFAULT_WIRE_COLOR: &str = "#000000";

/// An ideal short between two nodes.
///
/// Wires contribute no equations; they only decide which nodes share one
/// potential. An endpoint becomes `None` when its node is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    id: WireId,
    pub(crate) node_a: Option<NodeId>,
    pub(crate) node_b: Option<NodeId>,
    /// Display color (cosmetic)
    pub color: String,
}

impl Wire {
    pub(crate) fn new(id: WireId, node_a: NodeId, node_b: NodeId, color: impl Into<String>) -> Self {
        Self {
            id,
            node_a: Some(node_a),
            node_b: Some(node_b),
            color: color.into(),
        }
    }

    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn node_a(&self) -> Option<NodeId> {
        self.node_a
    }

    pub fn node_b(&self) -> Option<NodeId> {
        self.node_b
    }

    /// Both endpoints, if the wire is still fully connected.
    pub fn endpoints(&self) -> Option<(NodeId, NodeId)> {
        Some((self.node_a?, self.node_b?))
    }

    pub(crate) fn release(&mut self, node: NodeId) {
        if self.node_a == Some(node) {
            self.node_a = None;
        }
        if self.node_b == Some(node) {
            self.node_b = None;
        }
    }

    pub(crate) fn disconnect(&mut self) {
        self.node_a = None;
        self.node_b = None;
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |n: Option<NodeId>| n.map_or_else(|| "None".to_string(), |n| n.0.to_string());
        write!(f, "<Wire {} | Nodes: {}-{}>", self.id.0, end(self.node_a), end(self.node_b))
    }
}
