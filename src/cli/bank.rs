//! Battery-related CLI arguments.

use clap::Parser;

use crate::{
    core::{BatteryBank, autonomy::Thresholds, sizing::BankSizing},
    prelude::*,
    quantity::{
        electric::{AmpereHours, Volts},
        energy::WattHours,
    },
};

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct BankArgs {
    /// State-of-charge floor, `0..1`.
    #[clap(long, default_value = "0.2", env = "MIN_STATE_OF_CHARGE")]
    pub min_state_of_charge: f64,

    /// State-of-charge ceiling, `0..1`.
    #[clap(long, default_value = "1.0", env = "MAX_STATE_OF_CHARGE")]
    pub max_state_of_charge: f64,

    #[clap(long, default_value = "1.0", env = "INITIAL_STATE_OF_CHARGE")]
    pub initial_state_of_charge: f64,

    #[clap(
        long = "battery-charging-efficiency",
        default_value = "0.9",
        env = "BATTERY_CHARGING_EFFICIENCY"
    )]
    pub charging_efficiency: f64,

    #[clap(
        long = "battery-discharging-efficiency",
        default_value = "0.9",
        env = "BATTERY_DISCHARGING_EFFICIENCY"
    )]
    pub discharging_efficiency: f64,
}

impl BankArgs {
    pub fn try_build(&self, capacity: WattHours) -> Result<BatteryBank> {
        Ok(BatteryBank::builder()
            .capacity(capacity)
            .min_state_of_charge(self.min_state_of_charge)
            .max_state_of_charge(self.max_state_of_charge)
            .initial_state_of_charge(self.initial_state_of_charge)
            .charging_efficiency(self.charging_efficiency)
            .discharging_efficiency(self.discharging_efficiency)
            .build()?)
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct SizingArgs {
    /// Nominal system voltage.
    #[clap(long = "system-voltage", default_value = "48", env = "SYSTEM_VOLTAGE")]
    pub system_voltage: Volts,

    /// Fraction of the bank capacity which may be cycled.
    #[clap(long, default_value = "0.8", env = "USABLE_FRACTION")]
    pub usable_fraction: f64,

    /// Nominal voltage of a single battery.
    #[clap(long = "battery-voltage", default_value = "12", env = "BATTERY_VOLTAGE")]
    pub battery_voltage: Volts,

    /// Nominal charge of a single battery in ampere-hours.
    #[clap(long = "battery-charge-ah", default_value = "200", env = "BATTERY_CHARGE_AH")]
    pub battery_charge: AmpereHours,
}

impl SizingArgs {
    pub fn try_build(&self, daily_energy: WattHours, autonomy_days: u32) -> Result<BankSizing> {
        Ok(BankSizing::builder()
            .daily_energy(daily_energy)
            .autonomy_days(autonomy_days)
            .system_voltage(self.system_voltage)
            .usable_fraction(self.usable_fraction)
            .battery_voltage(self.battery_voltage)
            .battery_charge(self.battery_charge)
            .build()?)
    }
}

#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct ThresholdArgs {
    /// Steps below this state of charge are counted as critical.
    #[clap(long, default_value = "0.3", env = "CRITICAL_STATE_OF_CHARGE")]
    pub critical_state_of_charge: f64,

    /// Maximum number of critical steps for a bank to still be acceptable.
    #[clap(long, default_value = "6", env = "MAX_CRITICAL_STEPS")]
    pub max_critical_steps: usize,
}

impl From<ThresholdArgs> for Thresholds {
    fn from(args: ThresholdArgs) -> Self {
        Self {
            critical_state_of_charge: args.critical_state_of_charge,
            max_critical_steps: args.max_critical_steps,
        }
    }
}
