use thiserror::Error;

use crate::quantity::{
    electric::{AmpereHours, Volts},
    energy::WattHours,
    power::Watts,
    time::Hours,
};

/// Structural defect in a battery bank, a profile or a sizing request.
///
/// This is the only failure the core reports, and it is always reported before any simulation
/// step runs. Curtailment, deficit or a state of charge sitting at a bound are results, not errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("capacity must be positive and finite, got {0}")]
    NonPositiveCapacity(WattHours),

    #[error("{name} efficiency must be within (0, 1], got {value}")]
    InvalidEfficiency { name: &'static str, value: f64 },

    #[error("state-of-charge window must satisfy 0 ≤ min < max ≤ 1, got {min}..={max}")]
    InvalidStateOfChargeWindow { min: f64, max: f64 },

    #[error("initial state of charge {initial} is outside {min}..={max}")]
    InitialStateOfChargeOutOfRange { initial: f64, min: f64, max: f64 },

    #[error("the profile has no samples")]
    EmptyProfile,

    #[error("time axis is not increasing at sample #{index}: {previous} → {current}")]
    NonMonotonicTimeAxis { index: usize, previous: Hours, current: Hours },

    #[error("time step at sample #{index} is {actual}, expected {expected}")]
    NonUniformTimeStep { index: usize, expected: Hours, actual: Hours },

    #[error("sample #{index} has invalid {name} power: {value}")]
    InvalidPower { index: usize, name: &'static str, value: Watts },

    #[error("resampling step {target} is not a whole multiple of {step}")]
    IncompatibleTimeStep { step: Hours, target: Hours },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },

    #[error("usable fraction must be within (0, 1], got {0}")]
    InvalidUsableFraction(f64),

    #[error("system voltage {system} is not a whole multiple of battery voltage {battery}")]
    IncompatibleVoltages { system: Volts, battery: Volts },

    #[error("battery charge must be positive, got {0}")]
    NonPositiveBatteryCharge(AmpereHours),
}

pub type Result<T, E = ConfigurationError> = std::result::Result<T, E>;
