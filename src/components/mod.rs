//! Component models for the circuit graph.
//!
//! Every component is a [`Dipole`]: a two-terminal element between `node_a`
//! (conventional + pole) and `node_b` (- pole). The variant-specific part
//! lives in [`DipoleKind`]:
//! - Linear: Resistor, Capacitor, Inductor
//! - Sources: DC and sinusoidal AC voltage sources
//!
//! Only resistors and DC voltage sources contribute to the DC operating
//! point; the solver asks each kind through [`DipoleKind::conductance`] and
//! [`DipoleKind::dc_voltage`] and skips those that answer `None`.

mod linear;
mod sources;

pub use linear::{Capacitor, Inductor, Resistor};
pub use sources::{VoltageSourceAc, VoltageSourceDc};

use std::collections::BTreeMap;
use std::fmt;

use crate::circuit::{Circuit, DipoleId, NodeId, Position};
use crate::error::Result;

/// Named numeric component parameters, as stored in circuit documents.
pub type Params = BTreeMap<String, f64>;

pub(crate) fn param_or(params: &Params, key: &str, default: f64) -> f64 {
    params.get(key).copied().unwrap_or(default)
}

/// Component type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Resistor,
    Capacitor,
    Inductor,
    VoltageSourceDc,
    VoltageSourceAc,
}

impl ComponentType {
    pub const ALL: [ComponentType; 5] = [
        ComponentType::Resistor,
        ComponentType::Capacitor,
        ComponentType::Inductor,
        ComponentType::VoltageSourceDc,
        ComponentType::VoltageSourceAc,
    ];

    /// Tag used in circuit documents.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentType::Resistor => "Resistor",
            ComponentType::Capacitor => "Capacitor",
            ComponentType::Inductor => "Inductor",
            ComponentType::VoltageSourceDc => "VoltageSourceDC",
            ComponentType::VoltageSourceAc => "VoltageSourceAC",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Display name given to freshly created components.
    pub fn default_name(&self) -> &'static str {
        match self {
            ComponentType::Resistor => "Resistor",
            ComponentType::Capacitor => "Capacitor",
            ComponentType::Inductor => "Inductor",
            ComponentType::VoltageSourceDc => "DC Source",
            ComponentType::VoltageSourceAc => "AC Source",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Variant-specific part of a dipole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DipoleKind {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    VoltageSourceDc(VoltageSourceDc),
    VoltageSourceAc(VoltageSourceAc),
}

impl DipoleKind {
    /// Build a component of the given type from a parameter map.
    /// Missing parameters fall back to the type's defaults.
    pub fn from_params(component_type: ComponentType, params: &Params) -> Result<Self> {
        Ok(match component_type {
            ComponentType::Resistor => DipoleKind::Resistor(Resistor::from_params(params)?),
            ComponentType::Capacitor => DipoleKind::Capacitor(Capacitor::from_params(params)),
            ComponentType::Inductor => DipoleKind::Inductor(Inductor::from_params(params)),
            ComponentType::VoltageSourceDc => {
                DipoleKind::VoltageSourceDc(VoltageSourceDc::from_params(params))
            }
            ComponentType::VoltageSourceAc => {
                DipoleKind::VoltageSourceAc(VoltageSourceAc::from_params(params))
            }
        })
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            DipoleKind::Resistor(_) => ComponentType::Resistor,
            DipoleKind::Capacitor(_) => ComponentType::Capacitor,
            DipoleKind::Inductor(_) => ComponentType::Inductor,
            DipoleKind::VoltageSourceDc(_) => ComponentType::VoltageSourceDc,
            DipoleKind::VoltageSourceAc(_) => ComponentType::VoltageSourceAc,
        }
    }

    pub fn params(&self) -> Params {
        match self {
            DipoleKind::Resistor(r) => r.params(),
            DipoleKind::Capacitor(c) => c.params(),
            DipoleKind::Inductor(l) => l.params(),
            DipoleKind::VoltageSourceDc(v) => v.params(),
            DipoleKind::VoltageSourceAc(v) => v.params(),
        }
    }

    /// Conductance stamped at DC, for components that behave as one.
    pub fn conductance(&self) -> Option<f64> {
        match self {
            DipoleKind::Resistor(r) => Some(r.conductance()),
            _ => None,
        }
    }

    /// Voltage constraint imposed at DC, for independent DC sources.
    pub fn dc_voltage(&self) -> Option<f64> {
        match self {
            DipoleKind::VoltageSourceDc(v) => Some(v.dc_voltage),
            _ => None,
        }
    }
}

impl From<Resistor> for DipoleKind {
    fn from(r: Resistor) -> Self {
        DipoleKind::Resistor(r)
    }
}

impl From<Capacitor> for DipoleKind {
    fn from(c: Capacitor) -> Self {
        DipoleKind::Capacitor(c)
    }
}

impl From<Inductor> for DipoleKind {
    fn from(l: Inductor) -> Self {
        DipoleKind::Inductor(l)
    }
}

impl From<VoltageSourceDc> for DipoleKind {
    fn from(v: VoltageSourceDc) -> Self {
        DipoleKind::VoltageSourceDc(v)
    }
}

impl From<VoltageSourceAc> for DipoleKind {
    fn from(v: VoltageSourceAc) -> Self {
        DipoleKind::VoltageSourceAc(v)
    }
}

/// A two-terminal component placed in a circuit.
///
/// Node references are ids into the owning [`Circuit`]; they are only changed
/// by the circuit so that node back-references stay consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Dipole {
    id: DipoleId,
    /// Display name
    pub name: String,
    /// Component variant and parameters
    pub kind: DipoleKind,
    node_a: Option<NodeId>,
    node_b: Option<NodeId>,
    /// Canvas position (cosmetic)
    pub position: Position,
    /// Rotation in degrees (cosmetic)
    pub rotation: f64,
    current: f64,
}

impl Dipole {
    pub(crate) fn new(
        id: DipoleId,
        kind: DipoleKind,
        node_a: Option<NodeId>,
        node_b: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            name: kind.component_type().default_name().to_string(),
            kind,
            node_a,
            node_b,
            position: Position::ORIGIN,
            rotation: 0.0,
            current: 0.0,
        }
    }

    pub fn id(&self) -> DipoleId {
        self.id
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// The + terminal.
    pub fn node_a(&self) -> Option<NodeId> {
        self.node_a
    }

    /// The - terminal.
    pub fn node_b(&self) -> Option<NodeId> {
        self.node_b
    }

    /// Current through the component, positive from node_a to node_b.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn set_current(&mut self, current: f64) {
        self.current = current;
    }

    /// V(node_a) - V(node_b). A missing terminal counts as 0 V.
    pub fn voltage(&self, circuit: &Circuit) -> f64 {
        let potential = |n: Option<NodeId>| {
            n.and_then(|id| circuit.node(id))
                .map_or(0.0, |node| node.potential())
        };
        potential(self.node_a) - potential(self.node_b)
    }

    /// Power absorbed by the component (voltage * current).
    pub fn power(&self, circuit: &Circuit) -> f64 {
        self.voltage(circuit) * self.current
    }

    pub(crate) fn release(&mut self, node: NodeId) {
        if self.node_a == Some(node) {
            self.node_a = None;
        }
        if self.node_b == Some(node) {
            self.node_b = None;
        }
    }

    pub(crate) fn disconnect(&mut self) -> (Option<NodeId>, Option<NodeId>) {
        (self.node_a.take(), self.node_b.take())
    }
}

impl fmt::Display for Dipole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |n: Option<NodeId>| n.map_or_else(|| "None".to_string(), |n| n.0.to_string());
        write!(
            f,
            "<{} {} (ID={}) | Nodes: {}-{} | I={:.2}A>",
            self.component_type(),
            self.name,
            self.id.0,
            end(self.node_a),
            end(self.node_b),
            self.current
        )
    }
}
