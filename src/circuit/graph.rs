//! Circuit graph structure.

use std::collections::BTreeMap;
use std::fmt;

use super::node::Node;
use super::types::{DipoleId, IdAllocator, NodeId, Position, WireId};
use super::wire::{Wire, DEFAULT_WIRE_COLOR};
use crate::components::{Dipole, DipoleKind};
use crate::error::{CircuitError, Result};

/// Default hit-test radius used by [`Circuit::node_at`] callers.
pub const DEFAULT_PICK_TOLERANCE: f64 = 10.0;

/// A user-edited circuit: nodes, wires and dipoles owned by id.
///
/// All maps are ordered by id, so iteration (and therefore the solver's
/// matrix layout) is deterministic. Every node reference held by a wire or a
/// dipole points at a node of this circuit.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) wires: BTreeMap<WireId, Wire>,
    pub(crate) dipoles: BTreeMap<DipoleId, Dipole>,
    pub(crate) node_ids: IdAllocator,
    pub(crate) wire_ids: IdAllocator,
    pub(crate) dipole_ids: IdAllocator,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Nodes ============

    /// Create a node and return its id.
    pub fn create_node(&mut self, position: impl Into<Position>, is_ground: bool) -> NodeId {
        let id = NodeId(self.node_ids.allocate());
        self.nodes.insert(id, Node::new(id, position.into(), is_ground));
        id
    }

    /// Remove a node, detaching it from every wire and dipole referencing it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Node> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(CircuitError::NodeNotFound { node: id })?;
        for wire in self.wires.values_mut() {
            wire.release(id);
        }
        for dipole in self.dipoles.values_mut() {
            dipole.release(id);
        }
        Ok(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Iterate over nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// First node within `tolerance` of `position`.
    pub fn node_at(&self, position: impl Into<Position>, tolerance: f64) -> Option<NodeId> {
        let position = position.into();
        self.nodes
            .values()
            .find(|n| n.position.distance_squared(position) <= tolerance * tolerance)
            .map(Node::id)
    }

    /// Set or clear a node's ground flag.
    pub fn set_ground(&mut self, id: NodeId, is_ground: bool) -> Result<()> {
        self.node_mut(id)
            .ok_or(CircuitError::NodeNotFound { node: id })?
            .set_ground(is_ground);
        Ok(())
    }

    /// First node (by id) flagged as ground, if any.
    pub fn get_ground_node(&self) -> Option<NodeId> {
        self.nodes.values().find(|n| n.is_ground()).map(Node::id)
    }

    fn require_node(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(CircuitError::NodeNotFound { node: id })
        }
    }

    // ============ Wires ============

    /// Connect two nodes with an ideal wire.
    pub fn create_wire(&mut self, node_a: NodeId, node_b: NodeId) -> Result<WireId> {
        self.require_node(node_a)?;
        self.require_node(node_b)?;
        let id = WireId(self.wire_ids.allocate());
        self.wires
            .insert(id, Wire::new(id, node_a, node_b, DEFAULT_WIRE_COLOR));
        Ok(id)
    }

    pub fn remove_wire(&mut self, id: WireId) -> Result<Wire> {
        let mut wire = self
            .wires
            .remove(&id)
            .ok_or(CircuitError::WireNotFound { wire: id })?;
        wire.disconnect();
        Ok(wire)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(&id)
    }

    pub fn wire_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(&id)
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    // ============ Dipoles ============

    /// Id the next added dipole will receive.
    pub fn next_dipole_id(&self) -> DipoleId {
        DipoleId(self.dipole_ids.peek())
    }

    /// Add a component between `node_a` (+) and `node_b` (-).
    ///
    /// Fails without touching the circuit if either node is not part of it.
    pub fn add_dipole(
        &mut self,
        kind: impl Into<DipoleKind>,
        node_a: Option<NodeId>,
        node_b: Option<NodeId>,
    ) -> Result<DipoleId> {
        if let Some(a) = node_a {
            self.require_node(a)?;
        }
        if let Some(b) = node_b {
            self.require_node(b)?;
        }
        let id = DipoleId(self.dipole_ids.allocate());
        self.insert_dipole(Dipole::new(id, kind.into(), node_a, node_b));
        Ok(id)
    }

    /// Insert a dipole whose node references were already validated.
    pub(crate) fn insert_dipole(&mut self, dipole: Dipole) {
        let id = dipole.id();
        for node in [dipole.node_a(), dipole.node_b()].into_iter().flatten() {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.attach(id);
            }
        }
        self.dipole_ids.reserve(id.0);
        self.dipoles.insert(id, dipole);
    }

    /// Detach a dipole from its nodes and clear its node references.
    pub fn disconnect_dipole(&mut self, id: DipoleId) -> Result<()> {
        let dipole = self
            .dipoles
            .get_mut(&id)
            .ok_or(CircuitError::DipoleNotFound { dipole: id })?;
        let (a, b) = dipole.disconnect();
        for node in [a, b].into_iter().flatten() {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.detach(id);
            }
        }
        Ok(())
    }

    /// Disconnect and remove a dipole.
    pub fn remove_dipole(&mut self, id: DipoleId) -> Result<Dipole> {
        self.disconnect_dipole(id)?;
        self.dipoles
            .remove(&id)
            .ok_or(CircuitError::DipoleNotFound { dipole: id })
    }

    pub fn dipole(&self, id: DipoleId) -> Option<&Dipole> {
        self.dipoles.get(&id)
    }

    pub fn dipole_mut(&mut self, id: DipoleId) -> Option<&mut Dipole> {
        self.dipoles.get_mut(&id)
    }

    pub fn dipoles(&self) -> impl Iterator<Item = &Dipole> {
        self.dipoles.values()
    }

    pub fn dipole_count(&self) -> usize {
        self.dipoles.len()
    }

    /// V(node_a) - V(node_b) across a dipole.
    pub fn dipole_voltage(&self, id: DipoleId) -> Option<f64> {
        self.dipole(id).map(|d| d.voltage(self))
    }

    /// Power absorbed by a dipole.
    pub fn dipole_power(&self, id: DipoleId) -> Option<f64> {
        self.dipole(id).map(|d| d.power(self))
    }

    // ============ Whole-circuit operations ============

    /// Zero every potential and current.
    pub fn reset_simulation(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_potential(0.0);
        }
        for dipole in self.dipoles.values_mut() {
            dipole.set_current(0.0);
        }
    }

    /// Remove everything and restart id allocation.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.wires.is_empty() && self.dipoles.is_empty()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Circuit: {} nodes, {} wires, {} dipoles>",
            self.nodes.len(),
            self.wires.len(),
            self.dipoles.len()
        )
    }
}
