use std::io::Write;

use serde::Serialize;

use crate::{
    core::{Trace, step::Step},
    prelude::*,
    quantity::{energy::WattHours, power::Watts, time::Hours},
};

#[derive(Serialize)]
struct Record {
    hour: Hours,
    generation: Watts,
    consumption: Watts,
    outcome: &'static str,
    state_of_charge: f64,
    charged: WattHours,
    discharged: WattHours,
    curtailed: WattHours,
    deficit: WattHours,
}

impl From<&Step> for Record {
    fn from(step: &Step) -> Self {
        Self {
            hour: step.sample.time,
            generation: step.sample.generation,
            consumption: step.sample.consumption,
            outcome: step.outcome.as_str(),
            state_of_charge: step.state_of_charge_after,
            charged: step.outcome.charged(),
            discharged: step.outcome.discharged(),
            curtailed: step.outcome.curtailed(),
            deficit: step.outcome.deficit(),
        }
    }
}

/// Write one CSV row per step.
pub fn write(trace: &Trace, writer: impl Write) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for step in trace.steps() {
        writer.serialize(Record::from(step))?;
    }
    writer.flush().context("failed to flush the trace")?;
    Ok(())
}
