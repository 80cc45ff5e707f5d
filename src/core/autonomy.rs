use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    core::{
        battery::{BatteryBank, simulate},
        error::Result,
        profile::Profile,
        sizing::{BankLayout, BankSizing},
        summary::Summary,
        trace::Trace,
    },
    quantity::energy::WattHours,
};

/// Named profile, for example a season.
pub struct Scenario {
    pub name: String,
    pub profile: Profile,
}

/// How well a bank copes with the scenarios, judged by the number of critical steps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Rating {
    #[display("excellent")]
    Excellent,

    #[display("good")]
    Good,

    #[display("acceptable")]
    Acceptable,

    #[display("insufficient")]
    Insufficient,
}

impl Rating {
    pub const fn from_critical_steps(n_critical_steps: usize, max_acceptable: usize) -> Self {
        match n_critical_steps {
            0 => Self::Excellent,
            _ if n_critical_steps > max_acceptable => Self::Insufficient,
            1..=2 => Self::Good,
            _ => Self::Acceptable,
        }
    }
}

/// Thresholds the autonomy options are judged by.
#[derive(Copy, Clone, Debug)]
pub struct Thresholds {
    pub critical_state_of_charge: f64,
    pub max_critical_steps: usize,
}

pub struct ScenarioOutcome {
    pub name: String,
    pub summary: Summary,
    pub trace: Trace,
}

/// Single autonomy option checked against all the scenarios.
pub struct AutonomyRow {
    pub autonomy_days: u32,
    pub layout: BankLayout,
    pub outcomes: Vec<ScenarioOutcome>,
    pub rating: Rating,
}

impl AutonomyRow {
    /// Critical step count of the worst scenario.
    #[must_use]
    pub fn worst_critical_steps(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.summary.n_critical_steps).max().unwrap_or(0)
    }
}

pub struct AutonomyComparison {
    /// Daily energy the banks are sized for.
    pub design_energy: WattHours,

    pub rows: Vec<AutonomyRow>,
}

impl AutonomyComparison {
    /// Size the bank for each autonomy option and simulate every scenario with it.
    ///
    /// The design energy is the highest daily consumption among the scenarios. The bank
    /// prototype supplies everything but the capacity.
    #[instrument(skip_all, fields(n_scenarios = scenarios.len(), n_options = autonomy_days.len()))]
    pub fn try_new(
        scenarios: &[Scenario],
        autonomy_days: &[u32],
        sizing: &BankSizing,
        bank: &BatteryBank,
        thresholds: Thresholds,
    ) -> Result<Self> {
        let design_energy = scenarios
            .iter()
            .map(|scenario| scenario.profile.try_daily_consumption())
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .max()
            .unwrap_or(sizing.daily_energy());
        info!(%design_energy, "sizing");

        let rows = autonomy_days
            .iter()
            .map(|days| {
                let layout = sizing.with_demand(design_energy, *days)?.layout();
                let bank = bank.with_capacity(layout.installed_capacity)?;
                let outcomes = scenarios
                    .iter()
                    .map(|scenario| {
                        let trace = simulate(&bank, &scenario.profile)?;
                        let summary = trace.summarize(thresholds.critical_state_of_charge);
                        Ok(ScenarioOutcome { name: scenario.name.clone(), summary, trace })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let mut row = AutonomyRow {
                    autonomy_days: *days,
                    layout,
                    outcomes,
                    rating: Rating::Excellent,
                };
                row.rating = Rating::from_critical_steps(
                    row.worst_critical_steps(),
                    thresholds.max_critical_steps,
                );
                info!(days, n_batteries = layout.n_batteries, rating = %row.rating, "simulated");
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { design_energy, rows })
    }

    /// The smallest option with no critical steps in any scenario.
    #[must_use]
    pub fn recommendation(&self) -> Option<&AutonomyRow> {
        self.rows
            .iter()
            .filter(|row| row.worst_critical_steps() == 0)
            .min_by_key(|row| row.autonomy_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::sample::Sample,
        quantity::{power::Watts, time::Hours},
    };

    #[test]
    fn test_rating() {
        assert_eq!(Rating::from_critical_steps(0, 6), Rating::Excellent);
        assert_eq!(Rating::from_critical_steps(2, 6), Rating::Good);
        assert_eq!(Rating::from_critical_steps(6, 6), Rating::Acceptable);
        assert_eq!(Rating::from_critical_steps(7, 6), Rating::Insufficient);
    }

    #[test]
    fn test_rating_with_strict_maximum() {
        assert_eq!(Rating::from_critical_steps(0, 0), Rating::Excellent);
        assert_eq!(Rating::from_critical_steps(1, 0), Rating::Insufficient);
        assert_eq!(Rating::from_critical_steps(1, 1), Rating::Good);
        assert_eq!(Rating::from_critical_steps(2, 1), Rating::Insufficient);
    }

    fn night(consumption: f64) -> Profile {
        (0..24)
            .map(|hour| {
                let generation = if (8..16).contains(&hour) { 2_000.0 } else { 0.0 };
                Sample::new(Hours(f64::from(hour)), Watts(generation), Watts(consumption))
            })
            .collect()
    }

    #[test]
    fn test_comparison_recommends_smallest_safe_option() {
        let scenarios = [
            Scenario { name: "winter".to_string(), profile: night(400.0) },
            Scenario { name: "summer".to_string(), profile: night(200.0) },
        ];
        let sizing = BankSizing::builder().daily_energy(WattHours(1.0)).build().unwrap();
        let bank = BatteryBank::builder().capacity(WattHours(1.0)).build().unwrap();
        let thresholds = Thresholds { critical_state_of_charge: 0.3, max_critical_steps: 6 };

        let comparison =
            AutonomyComparison::try_new(&scenarios, &[1, 2, 3], &sizing, &bank, thresholds)
                .unwrap();
        assert_eq!(comparison.design_energy, WattHours(9_600.0));
        assert_eq!(comparison.rows.len(), 3);
        for row in &comparison.rows {
            assert_eq!(row.outcomes.len(), 2);
            assert!(row.outcomes.iter().all(|outcome| outcome.trace.len() == 24));
        }

        // More autonomy never makes it worse:
        let worst: Vec<usize> =
            comparison.rows.iter().map(AutonomyRow::worst_critical_steps).collect();
        assert!(worst.windows(2).all(|pair| pair[1] <= pair[0]));

        let recommendation = comparison.recommendation().unwrap();
        assert_eq!(recommendation.worst_critical_steps(), 0);
        assert_eq!(recommendation.rating, Rating::Excellent);
    }

    #[test]
    fn test_no_recommendation() {
        let scenarios = [Scenario { name: "dark".to_string(), profile: night(400.0) }];
        let sizing = BankSizing::builder().daily_energy(WattHours(1.0)).build().unwrap();
        let bank = BatteryBank::builder().capacity(WattHours(1.0)).build().unwrap();
        let thresholds = Thresholds { critical_state_of_charge: 0.99, max_critical_steps: 0 };
        let comparison =
            AutonomyComparison::try_new(&scenarios, &[1], &sizing, &bank, thresholds).unwrap();
        assert!(comparison.recommendation().is_none());
        assert_eq!(comparison.rows[0].rating, Rating::Insufficient);
    }
}
