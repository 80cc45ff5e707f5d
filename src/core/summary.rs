use average::{Max, Mean, Min};
use serde::Serialize;

use crate::{
    core::trace::Trace,
    quantity::{Zero, energy::WattHours},
};

/// Aggregate statistics of a [`Trace`].
#[must_use]
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Summary {
    pub min_state_of_charge: f64,
    pub max_state_of_charge: f64,
    pub mean_state_of_charge: f64,

    pub critical_state_of_charge: f64,

    /// Number of steps that ended below the critical state of charge.
    pub n_critical_steps: usize,

    pub charged: WattHours,
    pub discharged: WattHours,
    pub curtailed: WattHours,
    pub deficit: WattHours,

    /// Deficit as seen by the load, that is after the discharging efficiency.
    pub unmet_load: WattHours,

    /// Discharged over charged energy, zero when nothing has been charged.
    pub system_efficiency: f64,
}

impl Summary {
    pub(super) fn new(trace: &Trace, critical_state_of_charge: f64) -> Self {
        let min: Min = trace.states_of_charge().collect();
        let max: Max = trace.states_of_charge().collect();
        let mean: Mean = trace.states_of_charge().collect();
        let n_critical_steps = trace
            .states_of_charge()
            .filter(|state_of_charge| *state_of_charge < critical_state_of_charge)
            .count();

        let outcomes = || trace.steps().iter().map(|step| step.outcome);
        let charged: WattHours = outcomes().map(|outcome| outcome.charged()).sum();
        let discharged: WattHours = outcomes().map(|outcome| outcome.discharged()).sum();
        let curtailed: WattHours = outcomes().map(|outcome| outcome.curtailed()).sum();
        let deficit: WattHours = outcomes().map(|outcome| outcome.deficit()).sum();

        Self {
            min_state_of_charge: min.min(),
            max_state_of_charge: max.max(),
            mean_state_of_charge: mean.mean(),
            critical_state_of_charge,
            n_critical_steps,
            charged,
            discharged,
            curtailed,
            deficit,
            unmet_load: deficit * trace.bank().discharging_efficiency(),
            system_efficiency: if charged > WattHours::ZERO { discharged / charged } else { 0.0 },
        }
    }
}
