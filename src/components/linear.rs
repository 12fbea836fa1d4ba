//! Linear passive components: Resistor, Capacitor, Inductor.

use super::{param_or, Params};
use crate::error::{CircuitError, Result};

/// An ideal resistor.
///
/// The resistance is kept strictly positive and finite so the conductance
/// stamp is always well defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: f64,
}

impl Resistor {
    /// Default resistance in ohms.
    pub const DEFAULT_RESISTANCE: f64 = 1000.0;

    /// Create a new resistor.
    pub fn new(resistance: f64) -> Result<Self> {
        Self::check(resistance)?;
        Ok(Self { resistance })
    }

    fn check(resistance: f64) -> Result<()> {
        if resistance.is_finite() && resistance > 0.0 {
            Ok(())
        } else {
            Err(CircuitError::invalid_parameter(
                "Resistor",
                "resistance",
                format!("must be finite and positive, got {resistance}"),
            ))
        }
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Change the resistance. The old value is kept if the new one is invalid.
    pub fn set_resistance(&mut self, resistance: f64) -> Result<()> {
        Self::check(resistance)?;
        self.resistance = resistance;
        Ok(())
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    pub(crate) fn params(&self) -> Params {
        Params::from([("resistance".to_string(), self.resistance)])
    }

    pub(crate) fn from_params(params: &Params) -> Result<Self> {
        Self::new(param_or(params, "resistance", Self::DEFAULT_RESISTANCE))
    }
}

impl Default for Resistor {
    fn default() -> Self {
        Self {
            resistance: Self::DEFAULT_RESISTANCE,
        }
    }
}

/// An ideal capacitor. Open circuit at DC; not stamped by the DC solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    pub capacitance: f64,
}

impl Capacitor {
    /// Default capacitance in farads.
    pub const DEFAULT_CAPACITANCE: f64 = 1e-6;

    pub fn new(capacitance: f64) -> Self {
        Self { capacitance }
    }

    pub(crate) fn params(&self) -> Params {
        Params::from([("capacitance".to_string(), self.capacitance)])
    }

    pub(crate) fn from_params(params: &Params) -> Self {
        Self::new(param_or(params, "capacitance", Self::DEFAULT_CAPACITANCE))
    }
}

impl Default for Capacitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITANCE)
    }
}

/// An ideal inductor. Not stamped by the DC solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    pub inductance: f64,
}

impl Inductor {
    /// Default inductance in henries.
    pub const DEFAULT_INDUCTANCE: f64 = 1e-3;

    pub fn new(inductance: f64) -> Self {
        Self { inductance }
    }

    pub(crate) fn params(&self) -> Params {
        Params::from([("inductance".to_string(), self.inductance)])
    }

    pub(crate) fn from_params(params: &Params) -> Self {
        Self::new(param_or(params, "inductance", Self::DEFAULT_INDUCTANCE))
    }
}

impl Default for Inductor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INDUCTANCE)
    }
}
