mod simulator;

use bon::bon;

pub use self::simulator::{Simulator, simulate};
use crate::{
    core::error::{ConfigurationError, Result},
    quantity::{Zero, energy::WattHours},
};

/// Static battery bank configuration.
///
/// Construct it with [`BatteryBank::builder`], which rejects degenerate banks, so that a bank
/// which exists is always a valid one.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BatteryBank {
    capacity: WattHours,
    min_state_of_charge: f64,
    max_state_of_charge: f64,
    initial_state_of_charge: f64,
    charging_efficiency: f64,
    discharging_efficiency: f64,
}

#[bon]
impl BatteryBank {
    #[builder]
    pub fn new(
        capacity: WattHours,
        #[builder(default = 0.2)] min_state_of_charge: f64,
        #[builder(default = 1.0)] max_state_of_charge: f64,
        #[builder(default = 1.0)] initial_state_of_charge: f64,
        #[builder(default = 0.9)] charging_efficiency: f64,
        #[builder(default = 0.9)] discharging_efficiency: f64,
    ) -> Result<Self> {
        if !capacity.is_finite() || capacity <= WattHours::ZERO {
            return Err(ConfigurationError::NonPositiveCapacity(capacity));
        }
        Self::validate_efficiency("charging", charging_efficiency)?;
        Self::validate_efficiency("discharging", discharging_efficiency)?;
        if !(0.0..=1.0).contains(&min_state_of_charge)
            || !(0.0..=1.0).contains(&max_state_of_charge)
            || min_state_of_charge >= max_state_of_charge
        {
            return Err(ConfigurationError::InvalidStateOfChargeWindow {
                min: min_state_of_charge,
                max: max_state_of_charge,
            });
        }
        if !(min_state_of_charge..=max_state_of_charge).contains(&initial_state_of_charge) {
            return Err(ConfigurationError::InitialStateOfChargeOutOfRange {
                initial: initial_state_of_charge,
                min: min_state_of_charge,
                max: max_state_of_charge,
            });
        }
        Ok(Self {
            capacity,
            min_state_of_charge,
            max_state_of_charge,
            initial_state_of_charge,
            charging_efficiency,
            discharging_efficiency,
        })
    }

    fn validate_efficiency(name: &'static str, value: f64) -> Result<()> {
        if value > 0.0 && value <= 1.0 {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidEfficiency { name, value })
        }
    }
}

impl BatteryBank {
    /// Same bank with another nominal capacity.
    pub fn with_capacity(&self, capacity: WattHours) -> Result<Self> {
        Self::builder()
            .capacity(capacity)
            .min_state_of_charge(self.min_state_of_charge)
            .max_state_of_charge(self.max_state_of_charge)
            .initial_state_of_charge(self.initial_state_of_charge)
            .charging_efficiency(self.charging_efficiency)
            .discharging_efficiency(self.discharging_efficiency)
            .build()
    }

    /// Nominal capacity.
    pub const fn capacity(&self) -> WattHours {
        self.capacity
    }

    /// State-of-charge floor, `0..=1`.
    #[must_use]
    pub const fn min_state_of_charge(&self) -> f64 {
        self.min_state_of_charge
    }

    /// State-of-charge ceiling, `0..=1`, normally `1.0`.
    #[must_use]
    pub const fn max_state_of_charge(&self) -> f64 {
        self.max_state_of_charge
    }

    #[must_use]
    pub const fn initial_state_of_charge(&self) -> f64 {
        self.initial_state_of_charge
    }

    /// Conversion coefficient of external energy to stored energy while charging, `(0, 1]`.
    #[must_use]
    pub const fn charging_efficiency(&self) -> f64 {
        self.charging_efficiency
    }

    /// Conversion coefficient of stored energy to delivered energy while discharging, `(0, 1]`.
    #[must_use]
    pub const fn discharging_efficiency(&self) -> f64 {
        self.discharging_efficiency
    }

    /// Fraction of the capacity that may be cycled.
    #[must_use]
    pub fn usable_fraction(&self) -> f64 {
        self.max_state_of_charge - self.min_state_of_charge
    }

    /// Complement of the usable fraction: the share of capacity that is never cycled.
    #[must_use]
    pub fn depth_of_discharge(&self) -> f64 {
        1.0 - self.usable_fraction()
    }

    #[must_use]
    pub fn usable_capacity(&self) -> WattHours {
        self.capacity * self.usable_fraction()
    }

    #[must_use]
    pub const fn round_trip_efficiency(&self) -> f64 {
        self.charging_efficiency * self.discharging_efficiency
    }

    /// Minimally allowed residual energy.
    #[must_use]
    pub fn min_residual_energy(&self) -> WattHours {
        self.capacity * self.min_state_of_charge
    }

    /// Maximally allowed residual energy.
    #[must_use]
    pub fn max_residual_energy(&self) -> WattHours {
        self.capacity * self.max_state_of_charge
    }

    #[must_use]
    pub fn initial_residual_energy(&self) -> WattHours {
        self.capacity * self.initial_state_of_charge
    }
}
