//! Error types for the circuit model and DC solver.
//!
//! This module provides a unified error type [`CircuitError`] that covers
//! rejected graph edits, invalid component parameters, unsolvable networks
//! and malformed persisted circuits.

use thiserror::Error;

use crate::circuit::{DipoleId, NodeId, WireId};

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Unified error type for all circuit operations.
#[derive(Error, Debug)]
pub enum CircuitError {
    // ============ Graph Edit Errors ============
    /// Node not found in circuit
    #[error("Node '{node}' not found in circuit")]
    NodeNotFound { node: NodeId },

    /// Wire not found in circuit
    #[error("Wire '{wire}' not found in circuit")]
    WireNotFound { wire: WireId },

    /// Dipole not found in circuit
    #[error("Dipole '{dipole}' not found in circuit")]
    DipoleNotFound { dipole: DipoleId },

    /// Invalid parameter value
    #[error("Invalid parameter '{param}' for component '{component}': {message}")]
    InvalidParameter {
        component: String,
        param: String,
        message: String,
    },

    // ============ Solver Errors ============
    /// Missing ground node with automatic grounding disabled
    #[error("Circuit has no ground node and automatic grounding is disabled")]
    MissingGround,

    /// Matrix is singular and cannot be solved
    #[error("Singular matrix - circuit may have a voltage source loop or floating node")]
    SingularMatrix,

    /// Numerical overflow detected
    #[error("Numerical overflow detected at {node} (value: {value:.2e})")]
    NumericalOverflow { node: String, value: f64 },

    // ============ Persistence Errors ============
    /// Malformed circuit document
    #[error("Failed to (de)serialize circuit: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CircuitError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        component: impl Into<String>,
        param: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            component: component.into(),
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a numerical overflow error
    pub fn numerical_overflow(node: impl Into<String>, value: f64) -> Self {
        Self::NumericalOverflow {
            node: node.into(),
            value,
        }
    }
}
