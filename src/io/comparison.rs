use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    core::autonomy::{AutonomyComparison, AutonomyRow, Rating, ScenarioOutcome},
    prelude::*,
    quantity::energy::WattHours,
};

/// One option checked against one scenario.
#[derive(Serialize)]
struct Record<'a> {
    autonomy_days: u32,
    n_batteries: usize,
    installed_capacity: WattHours,
    rating: Rating,
    scenario: &'a str,
    min_state_of_charge: f64,
    mean_state_of_charge: f64,
    n_critical_steps: usize,
    charged: WattHours,
    discharged: WattHours,
    system_efficiency: f64,
}

impl<'a> Record<'a> {
    fn new(row: &AutonomyRow, outcome: &'a ScenarioOutcome) -> Self {
        Self {
            autonomy_days: row.autonomy_days,
            n_batteries: row.layout.n_batteries,
            installed_capacity: row.layout.installed_capacity,
            rating: row.rating,
            scenario: &outcome.name,
            min_state_of_charge: outcome.summary.min_state_of_charge,
            mean_state_of_charge: outcome.summary.mean_state_of_charge,
            n_critical_steps: outcome.summary.n_critical_steps,
            charged: outcome.summary.charged,
            discharged: outcome.summary.discharged,
            system_efficiency: outcome.summary.system_efficiency,
        }
    }
}

/// Write one CSV row per autonomy option and scenario.
pub fn write(comparison: &AutonomyComparison, writer: impl Write) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    for row in &comparison.rows {
        for outcome in &row.outcomes {
            writer.serialize(Record::new(row, outcome))?;
        }
    }
    writer.flush().context("failed to flush the comparison")?;
    Ok(())
}

pub fn write_path(comparison: &AutonomyComparison, path: &Path) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    write(comparison, BufWriter::new(file))?;
    info!(path = %path.display(), "saved the comparison");
    Ok(())
}
