use crate::{
    core::{battery::BatteryBank, step::Step, summary::Summary},
    quantity::time::Hours,
};

/// Result of a single simulation run.
///
/// Only the simulator creates traces, and they are immutable afterwards. A trace has a step per
/// profile sample, and profiles are never empty, so neither are traces.
#[must_use]
pub struct Trace {
    bank: BatteryBank,
    time_step: Hours,
    steps: Vec<Step>,
}

impl Trace {
    pub(super) const fn new(bank: BatteryBank, time_step: Hours, steps: Vec<Step>) -> Self {
        Self { bank, time_step, steps }
    }

    pub const fn bank(&self) -> &BatteryBank {
        &self.bank
    }

    pub const fn time_step(&self) -> Hours {
        self.time_step
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn states_of_charge(&self) -> impl Iterator<Item = f64> {
        self.steps.iter().map(|step| step.state_of_charge_after)
    }

    /// Aggregate the trace, counting the steps below the `critical` state of charge.
    pub fn summarize(&self, critical_state_of_charge: f64) -> Summary {
        Summary::new(self, critical_state_of_charge)
    }
}
