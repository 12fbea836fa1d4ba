//! Electrical nodes.

use std::fmt;

use super::types::{DipoleId, NodeId, Position};

/// An electrical terminal of the circuit.
///
/// The potential of a ground node is pinned at 0 V: every write through
/// [`Node::set_potential`] or [`Node::set_ground`] keeps that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    /// Canvas position (cosmetic)
    pub position: Position,
    is_ground: bool,
    potential: f64,
    /// Dipoles attached to this node, in attach order (non-owning)
    connections: Vec<DipoleId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, position: Position, is_ground: bool) -> Self {
        Self {
            id,
            position,
            is_ground,
            potential: 0.0,
            connections: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn is_ground(&self) -> bool {
        self.is_ground
    }

    /// Set or clear the ground flag. Grounding a node zeroes its potential.
    pub fn set_ground(&mut self, is_ground: bool) {
        self.is_ground = is_ground;
        if is_ground {
            self.potential = 0.0;
        }
    }

    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// Set the node potential. Ignored (clamped to 0) on ground nodes.
    pub fn set_potential(&mut self, value: f64) {
        self.potential = if self.is_ground { 0.0 } else { value };
    }

    /// Dipoles connected to this node, in the order they were attached.
    pub fn connections(&self) -> &[DipoleId] {
        &self.connections
    }

    pub fn is_connected_to(&self, dipole: DipoleId) -> bool {
        self.connections.contains(&dipole)
    }

    pub(crate) fn attach(&mut self, dipole: DipoleId) {
        if !self.connections.contains(&dipole) {
            self.connections.push(dipole);
        }
    }

    pub(crate) fn detach(&mut self, dipole: DipoleId) {
        self.connections.retain(|&d| d != dipole);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground {
            write!(f, "<Node {} | GND>", self.id.0)
        } else {
            write!(f, "<Node {} | {:.2}V>", self.id.0, self.potential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_clamps_potential() {
        let mut node = Node::new(NodeId(1), Position::ORIGIN, true);
        node.set_potential(3.3);
        assert_eq!(node.potential(), 0.0);

        node.set_ground(false);
        node.set_potential(3.3);
        assert_eq!(node.potential(), 3.3);

        node.set_ground(true);
        assert_eq!(node.potential(), 0.0);
    }

    #[test]
    fn test_connections_are_a_set() {
        let mut node = Node::new(NodeId(1), Position::ORIGIN, false);
        node.attach(DipoleId(4));
        node.attach(DipoleId(2));
        node.attach(DipoleId(4));
        assert_eq!(node.connections(), &[DipoleId(4), DipoleId(2)]);

        node.detach(DipoleId(4));
        assert_eq!(node.connections(), &[DipoleId(2)]);
    }
}
