use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{error::Result, profile::Profile, sample::Sample},
    quantity::{Zero, energy::WattHours, power::Watts, time::Hours},
};

/// Energy balance of a grid-tied system without storage.
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct EnergyBalance {
    pub generation: WattHours,
    pub consumption: WattHours,

    /// Generation above the consumption, exported or lost.
    pub surplus: WattHours,

    /// Consumption above the generation, imported.
    pub deficit: WattHours,

    /// Share of the consumption covered directly by the generation.
    pub self_sufficiency: f64,
}

impl EnergyBalance {
    /// Integrate the profile with the trapezoidal rule over its time axis.
    pub fn try_from_profile(profile: &Profile) -> Result<Self> {
        profile.try_time_step()?;
        let generation = trapezoid(profile, |sample| sample.generation);
        let consumption = trapezoid(profile, |sample| sample.consumption);
        let surplus = trapezoid(profile, |sample| sample.net_power().max(Watts::ZERO));
        let deficit = trapezoid(profile, |sample| (-sample.net_power()).max(Watts::ZERO));
        let self_sufficiency = if consumption > WattHours::ZERO {
            ((consumption - deficit) / consumption).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Ok(Self { generation, consumption, surplus, deficit, self_sufficiency })
    }

    pub fn net(&self) -> WattHours {
        self.generation - self.consumption
    }

    pub fn verdict(&self) -> Verdict {
        match self.generation.cmp(&self.consumption) {
            Ordering::Greater => Verdict::Oversized,
            Ordering::Less => Verdict::Undersized,
            Ordering::Equal => Verdict::Balanced,
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Verdict {
    #[display("oversized: generation exceeds consumption")]
    Oversized,

    #[display("undersized: consumption exceeds generation")]
    Undersized,

    #[display("balanced")]
    Balanced,
}

fn trapezoid(profile: &Profile, power: impl Fn(&Sample) -> Watts) -> WattHours {
    profile
        .iter()
        .tuple_windows()
        .map(|(left, right)| (power(left) + power(right)) * (right.time - left.time) / 2.0)
        .sum()
}

/// Per-step energy row.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct EnergyRow {
    pub time: Hours,
    pub consumption: Watts,
    pub generation: Watts,
    pub consumed: WattHours,
    pub generated: WattHours,

    /// Generated minus consumed.
    pub balance: WattHours,

    pub cumulative_consumed: WattHours,
    pub cumulative_generated: WattHours,
    pub cumulative_balance: WattHours,
}

/// Per-step energy table, assuming the power holds over each step.
#[must_use]
pub struct EnergyTable {
    pub rows: Vec<EnergyRow>,
    pub total_consumed: WattHours,
    pub total_generated: WattHours,
}

impl EnergyTable {
    pub fn try_from_profile(profile: &Profile) -> Result<Self> {
        let time_step = profile.try_time_step()?;
        let mut cumulative_consumed = WattHours::ZERO;
        let mut cumulative_generated = WattHours::ZERO;
        let rows: Vec<EnergyRow> = profile
            .iter()
            .map(|sample| {
                let consumed = sample.consumption * time_step;
                let generated = sample.generation * time_step;
                cumulative_consumed += consumed;
                cumulative_generated += generated;
                EnergyRow {
                    time: sample.time,
                    consumption: sample.consumption,
                    generation: sample.generation,
                    consumed,
                    generated,
                    balance: generated - consumed,
                    cumulative_consumed,
                    cumulative_generated,
                    cumulative_balance: cumulative_generated - cumulative_consumed,
                }
            })
            .collect();
        Ok(Self {
            rows,
            total_consumed: cumulative_consumed,
            total_generated: cumulative_generated,
        })
    }

    pub fn total_balance(&self) -> WattHours {
        self.total_generated - self.total_consumed
    }

    /// Sum of the negative per-step balances.
    pub fn total_deficit(&self) -> WattHours {
        self.rows.iter().map(|row| (-row.balance).max(WattHours::ZERO)).sum()
    }
}
