//! MNA (Modified Nodal Analysis) DC solver.
//!
//! This module computes the steady-state operating point of a [`Circuit`].
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node potentials and voltage source branch currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (one row per non-reference wire class)
//! - B, C = Bᵀ connect voltage sources to nodes
//! - v is the vector of node potentials
//! - j is the vector of voltage source branch currents
//! - e is the vector of source voltages
//!
//! Nodes joined by wires are merged beforehand, so they share one unknown.
//!
//! [`Circuit`]: crate::circuit::Circuit

mod dc;
mod groups;
mod mna;

pub use dc::{DcSolver, DcSummary, SolverConfig};
pub use mna::MnaMatrix;

/// Default relative LU pivot tolerance; a pivot at or below this fraction of
/// its column's largest entry counts as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-13;
