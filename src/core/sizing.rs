use bon::bon;
use serde::Serialize;

use crate::{
    core::error::{ConfigurationError, Result},
    quantity::{
        Zero,
        electric::{AmpereHours, Volts},
        energy::WattHours,
    },
};

/// Battery bank sizing request: how much to store and what batteries to store it in.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BankSizing {
    daily_energy: WattHours,
    autonomy_days: u32,
    system_voltage: Volts,
    usable_fraction: f64,
    battery_voltage: Volts,
    battery_charge: AmpereHours,
}

#[bon]
impl BankSizing {
    #[builder]
    pub fn new(
        daily_energy: WattHours,
        #[builder(default = 2)] autonomy_days: u32,
        #[builder(default = Volts(48.0))] system_voltage: Volts,
        #[builder(default = 0.8)] usable_fraction: f64,
        #[builder(default = Volts(12.0))] battery_voltage: Volts,
        #[builder(default = AmpereHours(200.0))] battery_charge: AmpereHours,
    ) -> Result<Self> {
        if !daily_energy.is_finite() || daily_energy < WattHours::ZERO {
            return Err(ConfigurationError::NonPositiveParameter {
                name: "daily energy",
                value: daily_energy.0,
            });
        }
        if autonomy_days == 0 {
            return Err(ConfigurationError::NonPositiveParameter {
                name: "autonomy days",
                value: f64::from(autonomy_days),
            });
        }
        if !(usable_fraction > 0.0 && usable_fraction <= 1.0) {
            return Err(ConfigurationError::InvalidUsableFraction(usable_fraction));
        }
        if !battery_charge.is_finite() || battery_charge <= AmpereHours::ZERO {
            return Err(ConfigurationError::NonPositiveBatteryCharge(battery_charge));
        }
        Self::validate_voltages(system_voltage, battery_voltage)?;
        Ok(Self {
            daily_energy,
            autonomy_days,
            system_voltage,
            usable_fraction,
            battery_voltage,
            battery_charge,
        })
    }

    fn validate_voltages(system: Volts, battery: Volts) -> Result<()> {
        let is_positive = |volts: Volts| volts.is_finite() && volts > Volts::ZERO;
        if !is_positive(system) || !is_positive(battery) {
            return Err(ConfigurationError::IncompatibleVoltages { system, battery });
        }
        let ratio = system / battery;
        if ratio < 1.0 || (ratio - ratio.round()).abs() > 1e-9 {
            return Err(ConfigurationError::IncompatibleVoltages { system, battery });
        }
        Ok(())
    }
}

impl BankSizing {
    pub const fn daily_energy(&self) -> WattHours {
        self.daily_energy
    }

    #[must_use]
    pub const fn usable_fraction(&self) -> f64 {
        self.usable_fraction
    }

    /// Same batteries and system voltage, another demand.
    pub fn with_demand(&self, daily_energy: WattHours, autonomy_days: u32) -> Result<Self> {
        Self::builder()
            .daily_energy(daily_energy)
            .autonomy_days(autonomy_days)
            .system_voltage(self.system_voltage)
            .usable_fraction(self.usable_fraction)
            .battery_voltage(self.battery_voltage)
            .battery_charge(self.battery_charge)
            .build()
    }

    /// Energy the bank must deliver without any recharge.
    pub fn autonomy_energy(&self) -> WattHours {
        self.daily_energy * f64::from(self.autonomy_days)
    }

    /// Lay out the bank out of identical batteries.
    pub fn layout(&self) -> BankLayout {
        let required_charge = self.autonomy_energy() / self.system_voltage / self.usable_fraction;

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_series = (self.system_voltage / self.battery_voltage).round() as usize;

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n_parallel = ((required_charge / self.battery_charge).ceil() as usize).max(1);

        let n_batteries = n_series * n_parallel;

        #[expect(clippy::cast_precision_loss)]
        let installed_capacity =
            self.battery_charge * self.battery_voltage * (n_batteries as f64);

        BankLayout {
            required_charge,
            n_series,
            n_parallel,
            n_batteries,
            battery_voltage: self.battery_voltage,
            battery_charge: self.battery_charge,
            installed_capacity,
        }
    }
}

/// Series-parallel arrangement of identical batteries.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BankLayout {
    /// Charge needed at the system voltage.
    pub required_charge: AmpereHours,

    /// Batteries in each string.
    pub n_series: usize,

    /// Parallel strings.
    pub n_parallel: usize,

    pub n_batteries: usize,
    pub battery_voltage: Volts,
    pub battery_charge: AmpereHours,

    /// Nominal capacity of the whole bank.
    pub installed_capacity: WattHours,
}

/// Capacity that would cover the total deficit, given the usable fraction and round-trip
/// efficiency of the storage.
pub fn estimate_capacity(
    deficit: WattHours,
    usable_fraction: f64,
    round_trip_efficiency: f64,
) -> Result<WattHours> {
    if !(usable_fraction > 0.0 && usable_fraction <= 1.0) {
        return Err(ConfigurationError::InvalidUsableFraction(usable_fraction));
    }
    if !(round_trip_efficiency > 0.0 && round_trip_efficiency <= 1.0) {
        return Err(ConfigurationError::InvalidEfficiency {
            name: "round-trip",
            value: round_trip_efficiency,
        });
    }
    Ok(deficit.abs() / (usable_fraction * round_trip_efficiency))
}
