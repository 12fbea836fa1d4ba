//! # Circuit Lab
//!
//! A lumped-element circuit model with a DC operating point solver.
//!
//! This library provides:
//! - A circuit graph of nodes, ideal wires and two-terminal components
//!   ("dipoles")
//! - Modified Nodal Analysis (MNA) based DC solving
//! - A JSON document format for saving and loading circuits
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit graph, id allocation and persistence
//! - [`components`] - Component models (resistors, capacitors, sources, ...)
//! - [`solver`] - MNA matrix assembly and numerical solving
//! - [`error`] - Error type shared by all of the above
//!
//! ## Usage
//!
//! ```
//! use circuit_lab::components::{Resistor, VoltageSourceDc};
//! use circuit_lab::{Circuit, DcSolver};
//!
//! let mut circuit = Circuit::new();
//! let gnd = circuit.create_node((0.0, 0.0), true);
//! let top = circuit.create_node((0.0, 100.0), false);
//! circuit.add_dipole(VoltageSourceDc::new(10.0), Some(top), Some(gnd))?;
//! let r = circuit.add_dipole(Resistor::new(5.0)?, Some(top), Some(gnd))?;
//!
//! DcSolver::new().solve(&mut circuit)?;
//! assert!((circuit.node(top).unwrap().potential() - 10.0).abs() < 1e-12);
//! assert!((circuit.dipole(r).unwrap().current() - 2.0).abs() < 1e-12);
//! # Ok::<(), circuit_lab::CircuitError>(())
//! ```
//!
//! ## Sign Conventions
//!
//! A dipole's current is positive when conventional current flows from its
//! `node_a` terminal to its `node_b` terminal through the component. A source
//! delivering power therefore reports a negative current.
//!
//! Solving a circuit without a ground node flags one node as ground, which
//! is a visible change to the circuit.

pub mod circuit;
pub mod components;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{Circuit, ComponentRegistry};
pub use error::{CircuitError, Result};
pub use solver::{DcSolver, SolverConfig};
