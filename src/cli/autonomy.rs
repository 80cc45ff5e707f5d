use std::{path::PathBuf, str::FromStr};

use clap::Parser;

use crate::{
    cli::{
        bank::{BankArgs, SizingArgs, ThresholdArgs},
        profile::ProfileTransformArgs,
    },
    chart,
    core::{
        Trace,
        autonomy::{AutonomyComparison, AutonomyRow, Scenario, Thresholds},
    },
    io,
    prelude::*,
    quantity::{Zero, energy::WattHours},
    tables::build_autonomy_table,
};

#[derive(Parser)]
pub struct AutonomyArgs {
    /// Named profiles as `name=path.csv`, for example `winter=data/winter.csv`.
    #[clap(
        long = "scenarios",
        env = "SCENARIOS",
        value_delimiter = ',',
        num_args = 1..,
        required = true,
    )]
    scenarios: Vec<ScenarioPath>,

    #[clap(
        long = "autonomy-days",
        env = "AUTONOMY_DAYS_OPTIONS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "1,2,3,5,7",
    )]
    autonomy_days: Vec<u32>,

    #[clap(flatten)]
    transform: ProfileTransformArgs,

    #[clap(flatten)]
    bank: BankArgs,

    #[clap(flatten)]
    sizing: SizingArgs,

    #[clap(flatten)]
    thresholds: ThresholdArgs,

    /// Save one row per option and scenario as CSV.
    #[clap(long = "comparison-csv", env = "COMPARISON_CSV_PATH")]
    comparison: Option<PathBuf>,

    /// Save the scenarios' state of charge under the recommended option, or the largest one
    /// when none is recommended, as SVG.
    #[clap(long = "chart-svg", env = "CHART_SVG_PATH")]
    chart: Option<PathBuf>,

    #[clap(long = "chart-width", default_value = "1200", env = "CHART_WIDTH")]
    chart_width: u32,

    #[clap(long = "chart-height", default_value = "600", env = "CHART_HEIGHT")]
    chart_height: u32,
}

#[derive(Clone)]
struct ScenarioPath {
    name: String,
    path: PathBuf,
}

impl FromStr for ScenarioPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((name, path)) = s.split_once('=') else {
            bail!("expected `name=path`, got `{s}`");
        };
        ensure!(!name.trim().is_empty(), "scenario name must not be empty");
        Ok(Self { name: name.trim().to_string(), path: PathBuf::from(path.trim()) })
    }
}

impl AutonomyArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let scenarios = self
            .scenarios
            .iter()
            .map(|scenario| {
                Ok(Scenario {
                    name: scenario.name.clone(),
                    profile: self.transform.apply(io::profile::read_path(&scenario.path)?)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        // Placeholders, the comparison overrides the energy and the capacity:
        let sizing = self.sizing.try_build(WattHours::ZERO, 1)?;
        let bank = self.bank.try_build(WattHours(1.0))?;

        let thresholds: Thresholds = self.thresholds.into();
        let comparison = AutonomyComparison::try_new(
            &scenarios,
            &self.autonomy_days,
            &sizing,
            &bank,
            thresholds,
        )?;
        println!("{}", build_autonomy_table(&comparison));

        match comparison.recommendation() {
            Some(row) => info!(
                autonomy_days = row.autonomy_days,
                n_batteries = row.layout.n_batteries,
                capacity = %row.layout.installed_capacity,
                "recommended",
            ),
            None => warn!("none of the options avoids critical steps, consider more autonomy days"),
        }

        if let Some(path) = &self.comparison {
            io::comparison::write_path(&comparison, path)?;
        }
        if let Some(path) = &self.chart {
            let row = comparison
                .recommendation()
                .or_else(|| comparison.rows.iter().max_by_key(|row| row.autonomy_days))
                .context("no autonomy options to plot")?;
            let svg = render_chart(
                row,
                thresholds.critical_state_of_charge,
                (self.chart_width, self.chart_height),
            )?;
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            info!(path = %path.display(), autonomy_days = row.autonomy_days, "saved the chart");
        }
        Ok(())
    }
}

/// Overlay every scenario simulated with the option's bank.
fn render_chart(
    row: &AutonomyRow,
    critical_state_of_charge: f64,
    size: (u32, u32),
) -> Result<String> {
    let traces: Vec<(&str, &Trace)> =
        row.outcomes.iter().map(|outcome| (outcome.name.as_str(), &outcome.trace)).collect();
    chart::render_overlay_svg(
        &traces,
        &format!("{} days of autonomy", row.autonomy_days),
        critical_state_of_charge,
        size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{BatteryBank, Profile, Sample, sizing::BankSizing},
        quantity::{power::Watts, time::Hours},
    };

    #[test]
    fn test_parse_scenario() {
        let scenario: ScenarioPath = "winter = data/winter.csv".parse().unwrap();
        assert_eq!(scenario.name, "winter");
        assert_eq!(scenario.path, PathBuf::from("data/winter.csv"));
    }

    #[test]
    fn test_parse_scenario_without_name() {
        assert!("data/winter.csv".parse::<ScenarioPath>().is_err());
        assert!("=data/winter.csv".parse::<ScenarioPath>().is_err());
    }

    #[test]
    fn test_render_chart() {
        let profile: Profile = (0..24)
            .map(|hour| Sample::new(Hours(f64::from(hour)), Watts::ZERO, Watts(100.0)))
            .collect();
        let scenarios = [Scenario { name: "winter".to_string(), profile }];
        let sizing = BankSizing::builder().daily_energy(WattHours(1.0)).build().unwrap();
        let bank = BatteryBank::builder().capacity(WattHours(1.0)).build().unwrap();
        let thresholds = Thresholds { critical_state_of_charge: 0.3, max_critical_steps: 6 };
        let comparison =
            AutonomyComparison::try_new(&scenarios, &[2], &sizing, &bank, thresholds).unwrap();

        let svg = render_chart(&comparison.rows[0], 0.3, (800, 400)).unwrap();
        assert!(svg.contains("winter"));
        assert!(svg.contains("2 days of autonomy"));
    }
}
