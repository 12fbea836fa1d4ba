//! Independent voltage sources.

use std::f64::consts::PI;

use super::{param_or, Params};

/// An ideal DC voltage source.
///
/// The source enforces V(node_a) - V(node_b) = dc_voltage and needs an extra
/// branch-current row/column in the MNA matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSourceDc {
    pub dc_voltage: f64,
}

impl VoltageSourceDc {
    /// Default source voltage in volts.
    pub const DEFAULT_VOLTAGE: f64 = 5.0;

    pub fn new(dc_voltage: f64) -> Self {
        Self { dc_voltage }
    }

    pub(crate) fn params(&self) -> Params {
        Params::from([("dc_voltage".to_string(), self.dc_voltage)])
    }

    pub(crate) fn from_params(params: &Params) -> Self {
        Self::new(param_or(params, "dc_voltage", Self::DEFAULT_VOLTAGE))
    }
}

impl Default for VoltageSourceDc {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VOLTAGE)
    }
}

/// A sinusoidal voltage source.
///
/// v(t) = offset + amplitude * sin(2*pi*frequency*t + phase), with `phase`
/// stored in degrees. Ignored by the DC solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoltageSourceAc {
    /// Peak amplitude in volts
    pub amplitude: f64,
    /// Frequency in Hz
    pub frequency: f64,
    /// Phase in degrees
    pub phase: f64,
    /// DC offset in volts
    pub offset: f64,
}

impl VoltageSourceAc {
    pub const DEFAULT_AMPLITUDE: f64 = 10.0;
    pub const DEFAULT_FREQUENCY: f64 = 50.0;

    pub fn new(amplitude: f64, frequency: f64, phase: f64, offset: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
            offset,
        }
    }

    /// Evaluate the waveform at time `t` (seconds).
    pub fn value_at(&self, t: f64) -> f64 {
        let omega = 2.0 * PI * self.frequency;
        self.offset + self.amplitude * (omega * t + self.phase.to_radians()).sin()
    }

    pub(crate) fn params(&self) -> Params {
        Params::from([
            ("amplitude".to_string(), self.amplitude),
            ("frequency".to_string(), self.frequency),
            ("phase".to_string(), self.phase),
            ("offset".to_string(), self.offset),
        ])
    }

    pub(crate) fn from_params(params: &Params) -> Self {
        Self::new(
            param_or(params, "amplitude", Self::DEFAULT_AMPLITUDE),
            param_or(params, "frequency", Self::DEFAULT_FREQUENCY),
            param_or(params, "phase", 0.0),
            param_or(params, "offset", 0.0),
        )
    }
}

impl Default for VoltageSourceAc {
    fn default() -> Self {
        Self::new(Self::DEFAULT_AMPLITUDE, Self::DEFAULT_FREQUENCY, 0.0, 0.0)
    }
}
