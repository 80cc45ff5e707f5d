use tracing::{debug, instrument};

use crate::{
    core::{
        battery::BatteryBank,
        error::Result,
        profile::Profile,
        step::{Outcome, Step},
        trace::Trace,
    },
    quantity::{Zero, energy::WattHours, power::Watts, time::Hours},
};

/// Battery state machine which tracks the residual energy.
///
/// Efficiencies are applied at the boundary, so that everything inside is modelled in terms of
/// stored energy.
#[derive(Copy, Clone, Debug)]
pub struct Simulator {
    bank: BatteryBank,
    residual_energy: WattHours,
}

impl Simulator {
    pub fn new(bank: BatteryBank) -> Self {
        Self { residual_energy: bank.initial_residual_energy(), bank }
    }

    pub const fn residual_energy(&self) -> WattHours {
        self.residual_energy
    }

    /// Current state of charge, always within the bank's window.
    #[must_use]
    pub fn state_of_charge(&self) -> f64 {
        (self.residual_energy / self.bank.capacity())
            .clamp(self.bank.min_state_of_charge(), self.bank.max_state_of_charge())
    }

    /// Apply the net external power over the time step and update the residual energy.
    pub fn apply(&mut self, net_power: Watts, for_: Hours) -> Outcome {
        let min_residual_energy = self.bank.min_residual_energy();
        let max_residual_energy = self.bank.max_residual_energy();

        if net_power >= Watts::ZERO {
            let candidate = net_power * for_ * self.bank.charging_efficiency();
            let headroom = (max_residual_energy - self.residual_energy).max(WattHours::ZERO);
            if candidate > headroom {
                self.residual_energy = max_residual_energy;
                Outcome::CurtailedAtCeiling { stored: headroom, curtailed: candidate - headroom }
            } else {
                self.residual_energy = (self.residual_energy + candidate).min(max_residual_energy);
                Outcome::Charged { stored: candidate }
            }
        } else {
            let required = -net_power * for_ / self.bank.discharging_efficiency();
            let available = (self.residual_energy - min_residual_energy).max(WattHours::ZERO);
            if required > available {
                self.residual_energy = min_residual_energy;
                Outcome::DeficitAtFloor { drawn: available, deficit: required - available }
            } else {
                self.residual_energy = (self.residual_energy - required).max(min_residual_energy);
                Outcome::Discharged { drawn: required }
            }
        }
    }
}

/// Run the bank through the profile.
///
/// The whole input is validated before the first step, so the call either fails with a
/// configuration error or produces a trace as long as the profile.
#[instrument(skip_all, fields(n_samples = profile.len()))]
pub fn simulate(bank: &BatteryBank, profile: &Profile) -> Result<Trace> {
    let time_step = profile.try_time_step()?;
    let mut simulator = Simulator::new(*bank);
    let steps: Vec<Step> = profile
        .iter()
        .map(|sample| {
            let outcome = simulator.apply(sample.net_power(), time_step);
            Step {
                sample: *sample,
                outcome,
                residual_energy_after: simulator.residual_energy(),
                state_of_charge_after: simulator.state_of_charge(),
            }
        })
        .collect();
    debug!(%time_step, final_state_of_charge = simulator.state_of_charge(), "simulated");
    Ok(Trace::new(*bank, time_step, steps))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::core::{error::ConfigurationError, sample::Sample};

    fn bank(initial_state_of_charge: f64) -> BatteryBank {
        BatteryBank::builder()
            .capacity(WattHours(200.0))
            .min_state_of_charge(0.2)
            .max_state_of_charge(1.0)
            .initial_state_of_charge(initial_state_of_charge)
            .charging_efficiency(0.9)
            .discharging_efficiency(0.9)
            .build()
            .unwrap()
    }

    fn hourly(powers: &[(f64, f64)]) -> Profile {
        powers
            .iter()
            .enumerate()
            .map(|(hour, (generation, consumption))| {
                #[expect(clippy::cast_precision_loss)]
                let time = Hours(hour as f64);
                Sample::new(time, Watts(*generation), Watts(*consumption))
            })
            .collect()
    }

    #[test]
    fn test_discharge_without_clamp() {
        let trace = simulate(&bank(0.5), &hourly(&[(0.0, 50.0)])).unwrap();
        let step = trace.steps()[0];
        assert_abs_diff_eq!(step.state_of_charge_after, 0.2222, epsilon = 1e-4);
        assert_abs_diff_eq!(step.outcome.discharged().0, 55.5556, epsilon = 1e-4);
        assert_eq!(step.outcome.deficit(), WattHours::ZERO);
        assert!(matches!(step.outcome, Outcome::Discharged { .. }));
    }

    #[test]
    fn test_curtailed_at_ceiling() {
        let trace = simulate(&bank(0.95), &hourly(&[(400.0, 0.0)])).unwrap();
        let step = trace.steps()[0];
        assert_abs_diff_eq!(step.state_of_charge_after, 1.0);
        assert_abs_diff_eq!(step.outcome.curtailed().0, 350.0, epsilon = 1e-9);
        assert_abs_diff_eq!(step.outcome.charged().0, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_deficit_at_floor() {
        let trace = simulate(&bank(0.3), &hourly(&[(0.0, 90.0)])).unwrap();
        let step = trace.steps()[0];
        assert_abs_diff_eq!(step.state_of_charge_after, 0.2);
        assert_abs_diff_eq!(step.outcome.discharged().0, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(step.outcome.deficit().0, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_net_power_is_charged_nothing() {
        let mut simulator = Simulator::new(bank(0.5));
        let outcome = simulator.apply(Watts::ZERO, Hours::ONE);
        assert_eq!(outcome, Outcome::Charged { stored: WattHours::ZERO });
        assert_abs_diff_eq!(simulator.state_of_charge(), 0.5);
    }

    #[test]
    fn test_half_hour_step() {
        let profile: Profile = [0.0, 0.5]
            .into_iter()
            .map(|time| Sample::new(Hours(time), Watts(100.0), Watts::ZERO))
            .collect();
        let trace = simulate(&bank(0.5), &profile).unwrap();
        assert_eq!(trace.time_step(), Hours(0.5));
        assert_abs_diff_eq!(trace.steps()[1].residual_energy_after.0, 190.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_profile_fails_early() {
        let result = simulate(&bank(0.5), &hourly(&[(0.0, 10.0), (f64::NAN, 10.0)]));
        assert!(matches!(result, Err(ConfigurationError::InvalidPower { index: 1, .. })));
    }

    #[test]
    fn test_no_generation_drains_to_floor() {
        let trace = simulate(&bank(1.0), &hourly(&[(0.0, 30.0); 12])).unwrap();
        for (previous, next) in trace.steps().iter().zip(&trace.steps()[1..]) {
            assert!(next.state_of_charge_after <= previous.state_of_charge_after);
        }
        let last = trace.steps()[trace.len() - 1];
        assert_abs_diff_eq!(last.state_of_charge_after, 0.2);
        assert!(last.outcome.deficit() > WattHours::ZERO);

        let summary = trace.summarize(0.3);
        assert_abs_diff_eq!(summary.charged.0, 0.0);
        assert_abs_diff_eq!(summary.system_efficiency, 0.0);
        assert_abs_diff_eq!(summary.unmet_load.0, summary.deficit.0 * 0.9, epsilon = 1e-9);
    }

    #[test]
    fn test_no_consumption_fills_to_ceiling() {
        let trace = simulate(&bank(0.2), &hourly(&[(30.0, 0.0); 12])).unwrap();
        for (previous, next) in trace.steps().iter().zip(&trace.steps()[1..]) {
            assert!(next.state_of_charge_after >= previous.state_of_charge_after);
        }
        let last = trace.steps()[trace.len() - 1];
        assert_abs_diff_eq!(last.state_of_charge_after, 1.0);
        assert!(last.outcome.curtailed() > WattHours::ZERO);
        assert_eq!(trace.summarize(0.3).discharged, WattHours::ZERO);
    }

    #[test]
    fn test_summary() {
        let trace =
            simulate(&bank(0.5), &hourly(&[(0.0, 50.0), (100.0, 0.0), (0.0, 9.0)])).unwrap();
        let summary = trace.summarize(0.3);
        assert_eq!(summary.n_critical_steps, 1);
        assert_abs_diff_eq!(summary.min_state_of_charge, 0.2222, epsilon = 1e-4);
        assert_abs_diff_eq!(summary.max_state_of_charge, 0.6722, epsilon = 1e-4);
        assert_abs_diff_eq!(summary.charged.0, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.discharged.0, 65.5556, epsilon = 1e-4);
        assert_abs_diff_eq!(summary.system_efficiency, 65.5556 / 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_single_sample_summary() {
        let trace = simulate(&bank(0.5), &hourly(&[(0.0, 18.0)])).unwrap();
        assert_eq!(trace.len(), 1);
        let summary = trace.summarize(0.3);
        assert!(summary.mean_state_of_charge.is_finite());
        assert_abs_diff_eq!(summary.mean_state_of_charge, 0.4, epsilon = 1e-9);
        assert_abs_diff_eq!(summary.min_state_of_charge, summary.max_state_of_charge);
    }

    proptest! {
        #[test]
        fn prop_state_of_charge_stays_within_window(
            initial_state_of_charge in 0.2..=1.0_f64,
            powers in prop::collection::vec((0.0..500.0_f64, 0.0..500.0_f64), 1..64),
        ) {
            let bank = bank(initial_state_of_charge);
            let trace = simulate(&bank, &hourly(&powers)).unwrap();
            prop_assert_eq!(trace.len(), powers.len());
            for step in trace.steps() {
                prop_assert!(step.state_of_charge_after >= bank.min_state_of_charge());
                prop_assert!(step.state_of_charge_after <= bank.max_state_of_charge());
            }
        }

        #[test]
        fn prop_energy_is_conserved_per_step(
            initial_state_of_charge in 0.2..=1.0_f64,
            powers in prop::collection::vec((0.0..500.0_f64, 0.0..500.0_f64), 1..64),
        ) {
            let bank = bank(initial_state_of_charge);
            let trace = simulate(&bank, &hourly(&powers)).unwrap();
            let mut residual_energy = bank.initial_residual_energy();
            for step in trace.steps() {
                let delta = step.residual_energy_after - residual_energy;
                let flow = step.outcome.charged() - step.outcome.discharged();
                prop_assert!((delta - flow).abs().0 < 1e-6);
                residual_energy = step.residual_energy_after;
            }
        }

        #[test]
        fn prop_no_generation_drains_then_accumulates_deficit(
            initial_state_of_charge in 0.2..=1.0_f64,
            consumption in prop::collection::vec(1.0..500.0_f64, 1..64),
        ) {
            let bank = bank(initial_state_of_charge);
            let powers: Vec<(f64, f64)> = consumption.iter().map(|power| (0.0, *power)).collect();
            let trace = simulate(&bank, &hourly(&powers)).unwrap();

            let mut state_of_charge = bank.initial_state_of_charge();
            let mut deficit = WattHours::ZERO;
            let mut at_floor = false;
            for step in trace.steps() {
                prop_assert!(step.state_of_charge_after <= state_of_charge + 1e-12);
                state_of_charge = step.state_of_charge_after;

                let is_deficit = matches!(step.outcome, Outcome::DeficitAtFloor { .. });
                prop_assert!(!at_floor || is_deficit);
                at_floor |= is_deficit;
                if at_floor {
                    prop_assert!(step.outcome.deficit() > WattHours::ZERO);
                    prop_assert_eq!(step.residual_energy_after, bank.min_residual_energy());
                }
                deficit += step.outcome.deficit();
            }
            prop_assert!((trace.summarize(0.3).deficit - deficit).abs().0 < 1e-6);

            // Asking for more than the window holds must end at the floor:
            let required = WattHours(consumption.iter().sum::<f64>() / 0.9);
            let available = bank.initial_residual_energy() - bank.min_residual_energy();
            if required.0 > available.0 + 1e-6 {
                prop_assert!(at_floor);
            }
        }

        #[test]
        fn prop_no_consumption_fills_then_accumulates_curtailment(
            initial_state_of_charge in 0.2..=1.0_f64,
            generation in prop::collection::vec(1.0..500.0_f64, 1..64),
        ) {
            let bank = bank(initial_state_of_charge);
            let powers: Vec<(f64, f64)> = generation.iter().map(|power| (*power, 0.0)).collect();
            let trace = simulate(&bank, &hourly(&powers)).unwrap();

            let mut state_of_charge = bank.initial_state_of_charge();
            let mut curtailed = WattHours::ZERO;
            let mut at_ceiling = false;
            for step in trace.steps() {
                prop_assert!(step.state_of_charge_after >= state_of_charge - 1e-12);
                state_of_charge = step.state_of_charge_after;

                let is_curtailed = matches!(step.outcome, Outcome::CurtailedAtCeiling { .. });
                prop_assert!(!at_ceiling || is_curtailed);
                at_ceiling |= is_curtailed;
                if at_ceiling {
                    prop_assert!(step.outcome.curtailed() > WattHours::ZERO);
                    prop_assert_eq!(step.residual_energy_after, bank.max_residual_energy());
                }
                curtailed += step.outcome.curtailed();
            }
            prop_assert!((trace.summarize(0.3).curtailed - curtailed).abs().0 < 1e-6);

            let candidate = WattHours(generation.iter().sum::<f64>() * 0.9);
            let headroom = bank.max_residual_energy() - bank.initial_residual_energy();
            if candidate.0 > headroom.0 + 1e-6 {
                prop_assert!(at_ceiling);
            }
        }
    }
}
