//! Circuit graph representation.
//!
//! This module provides the user-editable network the solver works on: the
//! [`Circuit`] container owning [`Node`]s, [`Wire`]s and
//! [`Dipole`](crate::components::Dipole)s by id, and the JSON document format
//! used to persist it.

mod graph;
mod node;
mod record;
mod types;
mod wire;

pub use graph::{Circuit, DEFAULT_PICK_TOLERANCE};
pub use node::Node;
pub use record::{
    CircuitRecord, ComponentConstructor, ComponentRegistry, DipoleRecord, LoadDiagnostic,
    LoadReport, NodeRecord, WireRecord, SCHEMA_VERSION,
};
pub use types::{DipoleId, NodeId, Position, WireId};
pub use wire::{Wire, DEFAULT_WIRE_COLOR};
