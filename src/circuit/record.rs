//! Circuit documents.
//!
//! A circuit is persisted as a JSON record holding the schema version, the id
//! counters and flat lists of nodes, wires and dipoles. Dipoles carry a type
//! tag resolved through a [`ComponentRegistry`] on load. Records that cannot
//! be honored (unknown tags, dangling wires, ...) are dropped and reported in
//! a [`LoadReport`] instead of failing the whole load.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::graph::Circuit;
use super::node::Node;
use super::types::{DipoleId, IdAllocator, NodeId, WireId};
use super::wire::{Wire, DEFAULT_WIRE_COLOR};
use crate::components::{ComponentType, Dipole, DipoleKind, Params};
use crate::error::Result;

/// Schema version written by [`Circuit::to_record`].
pub const SCHEMA_VERSION: &str = "1.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

fn first_id() -> u64 {
    IdAllocator::FIRST
}

fn default_color() -> String {
    DEFAULT_WIRE_COLOR.to_string()
}

/// Serialized form of a whole circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "first_id")]
    pub next_node_id: u64,
    #[serde(default = "first_id")]
    pub next_dipole_id: u64,
    #[serde(default = "first_id")]
    pub next_wire_id: u64,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub wires: Vec<WireRecord>,
    #[serde(default)]
    pub dipoles: Vec<DipoleRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default)]
    pub is_ground: bool,
    #[serde(default)]
    pub potential: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRecord {
    pub id: u64,
    #[serde(default)]
    pub node_a_id: Option<u64>,
    #[serde(default)]
    pub node_b_id: Option<u64>,
    #[serde(default = "default_color")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DipoleRecord {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub node_a_id: Option<u64>,
    #[serde(default)]
    pub node_b_id: Option<u64>,
    #[serde(default)]
    pub position: [f64; 2],
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub params: Params,
}

/// Constructor building a component from its stored parameters.
pub type ComponentConstructor = fn(&Params) -> Result<DipoleKind>;

/// Maps type tags to component constructors for loading documents.
#[derive(Clone)]
pub struct ComponentRegistry {
    constructors: HashMap<String, ComponentConstructor>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("ComponentRegistry").field("tags", &tags).finish()
    }
}

impl ComponentRegistry {
    /// A registry that knows no component type.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `tag`.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        constructor: ComponentConstructor,
    ) -> Option<ComponentConstructor> {
        self.constructors.insert(tag.into(), constructor)
    }

    /// Register one of the built-in component types under its standard tag.
    pub fn register_builtin(&mut self, component_type: ComponentType) {
        let constructor: ComponentConstructor = match component_type {
            ComponentType::Resistor => {
                |p: &Params| DipoleKind::from_params(ComponentType::Resistor, p)
            }
            ComponentType::Capacitor => {
                |p: &Params| DipoleKind::from_params(ComponentType::Capacitor, p)
            }
            ComponentType::Inductor => {
                |p: &Params| DipoleKind::from_params(ComponentType::Inductor, p)
            }
            ComponentType::VoltageSourceDc => {
                |p: &Params| DipoleKind::from_params(ComponentType::VoltageSourceDc, p)
            }
            ComponentType::VoltageSourceAc => {
                |p: &Params| DipoleKind::from_params(ComponentType::VoltageSourceAc, p)
            }
        };
        self.register(component_type.tag(), constructor);
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Build a component, or `None` if the tag is unknown.
    pub fn construct(&self, tag: &str, params: &Params) -> Option<Result<DipoleKind>> {
        self.constructors.get(tag).map(|ctor| ctor(params))
    }
}

impl Default for ComponentRegistry {
    /// Registry holding every built-in component type.
    fn default() -> Self {
        let mut registry = Self::empty();
        for component_type in ComponentType::ALL {
            registry.register_builtin(component_type);
        }
        registry
    }
}

/// A record dropped or altered while loading a document.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadDiagnostic {
    /// Dipole with a type tag the registry does not know; skipped
    UnknownComponentType { dipole: DipoleId, tag: String },
    /// Dipole whose parameters were rejected; skipped
    InvalidParameters { dipole: DipoleId, message: String },
    /// Wire with a missing endpoint; skipped
    DanglingWire { wire: WireId },
    /// Dipole terminal naming a missing node; loaded unconnected
    MissingDipoleNode { dipole: DipoleId, node: NodeId },
    /// Second record reusing an id; skipped
    DuplicateId { namespace: &'static str, id: u64 },
    /// Record whose id is too large to be allocated; skipped
    IdOutOfRange { namespace: &'static str, id: u64 },
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::UnknownComponentType { dipole, tag } => {
                write!(f, "unknown component type '{tag}' for {dipole}, skipped")
            }
            LoadDiagnostic::InvalidParameters { dipole, message } => {
                write!(f, "invalid parameters for {dipole}: {message}, skipped")
            }
            LoadDiagnostic::DanglingWire { wire } => {
                write!(f, "{wire} references a missing node, skipped")
            }
            LoadDiagnostic::MissingDipoleNode { dipole, node } => {
                write!(f, "{dipole} references missing {node}, left unconnected")
            }
            LoadDiagnostic::DuplicateId { namespace, id } => {
                write!(f, "duplicate {namespace} id {id}, skipped")
            }
            LoadDiagnostic::IdOutOfRange { namespace, id } => {
                write!(f, "{namespace} id {id} is out of range, skipped")
            }
        }
    }
}

/// Diagnostics collected while loading a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Tags of dipoles skipped because their type was unknown.
    pub fn unknown_types(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().filter_map(|d| match d {
            LoadDiagnostic::UnknownComponentType { tag, .. } => Some(tag.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, diagnostic: LoadDiagnostic) {
        warn!("circuit load: {diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

impl Circuit {
    /// Snapshot the circuit as a serializable record.
    pub fn to_record(&self) -> CircuitRecord {
        CircuitRecord {
            version: SCHEMA_VERSION.to_string(),
            next_node_id: self.node_ids.peek(),
            next_dipole_id: self.dipole_ids.peek(),
            next_wire_id: self.wire_ids.peek(),
            nodes: self
                .nodes()
                .map(|n| NodeRecord {
                    id: n.id().0,
                    position: n.position.into(),
                    is_ground: n.is_ground(),
                    potential: n.potential(),
                })
                .collect(),
            wires: self
                .wires()
                .map(|w| WireRecord {
                    id: w.id().0,
                    node_a_id: w.node_a().map(|n| n.0),
                    node_b_id: w.node_b().map(|n| n.0),
                    color: w.color.clone(),
                })
                .collect(),
            dipoles: self
                .dipoles()
                .map(|d| DipoleRecord {
                    type_tag: d.component_type().tag().to_string(),
                    id: d.id().0,
                    name: d.name.clone(),
                    node_a_id: d.node_a().map(|n| n.0),
                    node_b_id: d.node_b().map(|n| n.0),
                    position: d.position.into(),
                    rotation: d.rotation,
                    params: d.kind.params(),
                })
                .collect(),
        }
    }

    /// Serialize the circuit as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Rebuild a circuit from a record.
    ///
    /// Never fails: records that cannot be loaded are skipped and listed in
    /// the returned report.
    pub fn from_record(record: CircuitRecord, registry: &ComponentRegistry) -> (Circuit, LoadReport) {
        if record.version != SCHEMA_VERSION {
            warn!(
                "circuit document version '{}' differs from '{}', loading anyway",
                record.version, SCHEMA_VERSION
            );
        }

        let mut circuit = Circuit::new();
        let mut report = LoadReport::default();
        circuit.node_ids = IdAllocator::starting_at(record.next_node_id);
        circuit.wire_ids = IdAllocator::starting_at(record.next_wire_id);
        circuit.dipole_ids = IdAllocator::starting_at(record.next_dipole_id);

        for n in record.nodes {
            let id = NodeId(n.id);
            if circuit.nodes.contains_key(&id) {
                report.push(LoadDiagnostic::DuplicateId {
                    namespace: "node",
                    id: n.id,
                });
                continue;
            }
            if !circuit.node_ids.reserve(n.id) {
                report.push(LoadDiagnostic::IdOutOfRange {
                    namespace: "node",
                    id: n.id,
                });
                continue;
            }
            let mut node = Node::new(id, n.position.into(), n.is_ground);
            node.set_potential(n.potential);
            circuit.nodes.insert(id, node);
        }

        for w in record.wires {
            let id = WireId(w.id);
            if circuit.wires.contains_key(&id) {
                report.push(LoadDiagnostic::DuplicateId {
                    namespace: "wire",
                    id: w.id,
                });
                continue;
            }
            if !circuit.wire_ids.reserve(w.id) {
                report.push(LoadDiagnostic::IdOutOfRange {
                    namespace: "wire",
                    id: w.id,
                });
                continue;
            }
            let endpoint = |raw: Option<u64>| raw.map(NodeId).filter(|n| circuit.contains_node(*n));
            match (endpoint(w.node_a_id), endpoint(w.node_b_id)) {
                (Some(a), Some(b)) => {
                    circuit.wires.insert(id, Wire::new(id, a, b, w.color));
                }
                _ => report.push(LoadDiagnostic::DanglingWire { wire: id }),
            }
        }

        for d in record.dipoles {
            let id = DipoleId(d.id);
            if circuit.dipoles.contains_key(&id) {
                report.push(LoadDiagnostic::DuplicateId {
                    namespace: "dipole",
                    id: d.id,
                });
                continue;
            }
            if !circuit.dipole_ids.reserve(d.id) {
                report.push(LoadDiagnostic::IdOutOfRange {
                    namespace: "dipole",
                    id: d.id,
                });
                continue;
            }
            let kind = match registry.construct(&d.type_tag, &d.params) {
                Some(Ok(kind)) => kind,
                Some(Err(e)) => {
                    report.push(LoadDiagnostic::InvalidParameters {
                        dipole: id,
                        message: e.to_string(),
                    });
                    continue;
                }
                None => {
                    report.push(LoadDiagnostic::UnknownComponentType {
                        dipole: id,
                        tag: d.type_tag,
                    });
                    continue;
                }
            };

            let mut terminal = |raw: Option<u64>| {
                let node = NodeId(raw?);
                if circuit.contains_node(node) {
                    Some(node)
                } else {
                    report.push(LoadDiagnostic::MissingDipoleNode { dipole: id, node });
                    None
                }
            };
            let node_a = terminal(d.node_a_id);
            let node_b = terminal(d.node_b_id);

            let mut dipole = Dipole::new(id, kind, node_a, node_b);
            if !d.name.is_empty() {
                dipole.name = d.name;
            }
            dipole.position = d.position.into();
            dipole.rotation = d.rotation;
            circuit.insert_dipole(dipole);
        }

        debug!("loaded {circuit} with {} diagnostics", report.diagnostics.len());
        (circuit, report)
    }

    /// Parse a JSON document. Only malformed JSON is an error.
    pub fn from_json(json: &str, registry: &ComponentRegistry) -> Result<(Circuit, LoadReport)> {
        let record: CircuitRecord = serde_json::from_str(json)?;
        Ok(Self::from_record(record, registry))
    }
}
