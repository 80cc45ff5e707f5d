use itertools::Itertools;

use crate::{
    core::{
        error::{ConfigurationError, Result},
        sample::Sample,
    },
    quantity::{Zero, energy::WattHours, power::Watts, time::Hours},
};

/// Relative tolerance when comparing time steps parsed from decimal hours.
const TIME_STEP_TOLERANCE: f64 = 1e-6;

const HOURS_PER_DAY: Hours = Hours(24.0);

/// Time-ordered generation and consumption samples with a uniform time step.
///
/// The profile is not validated on construction: the loaders are agnostic of the simulation
/// constraints, and [`Profile::try_time_step`] is the single gatekeeper.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile(Vec<Sample>);

impl From<Vec<Sample>> for Profile {
    fn from(samples: Vec<Sample>) -> Self {
        Self(samples)
    }
}

impl FromIterator<Sample> for Profile {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Profile {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[Sample]> for Profile {
    fn as_ref(&self) -> &[Sample] {
        &self.0
    }
}

impl Profile {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.0.iter()
    }

    /// Validate the profile and return its time step.
    ///
    /// The step is implied by the spacing of the first two samples, and all the other spacings
    /// must match it. A single-sample profile spans one hour.
    pub fn try_time_step(&self) -> Result<Hours> {
        let first = self.0.first().ok_or(ConfigurationError::EmptyProfile)?;

        for (index, sample) in self.0.iter().enumerate() {
            Self::validate_power(index, "generation", sample.generation)?;
            Self::validate_power(index, "consumption", sample.consumption)?;
        }

        let Some(second) = self.0.get(1) else {
            return if first.time.is_finite() {
                Ok(Hours::ONE)
            } else {
                Err(ConfigurationError::NonMonotonicTimeAxis {
                    index: 0,
                    previous: first.time,
                    current: first.time,
                })
            };
        };
        let time_step = second.time - first.time;

        for (index, (previous, current)) in self.0.iter().tuple_windows().enumerate() {
            let index = index + 1;
            let actual = current.time - previous.time;
            if !actual.is_finite() || actual <= Hours::ZERO {
                return Err(ConfigurationError::NonMonotonicTimeAxis {
                    index,
                    previous: previous.time,
                    current: current.time,
                });
            }
            if (actual - time_step).abs().0 > time_step.0 * TIME_STEP_TOLERANCE {
                return Err(ConfigurationError::NonUniformTimeStep {
                    index,
                    expected: time_step,
                    actual,
                });
            }
        }

        Ok(time_step)
    }

    fn validate_power(index: usize, name: &'static str, value: Watts) -> Result<()> {
        if value.is_finite() && value >= Watts::ZERO {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidPower { index, name, value })
        }
    }

    /// Total span covered by the samples.
    pub fn try_duration(&self) -> Result<Hours> {
        #[expect(clippy::cast_precision_loss)]
        let n_samples = self.len() as f64;
        Ok(self.try_time_step()? * n_samples)
    }

    /// Consumed energy assuming the power holds over each step.
    pub fn try_consumption_energy(&self) -> Result<WattHours> {
        let time_step = self.try_time_step()?;
        Ok(self.iter().map(|sample| sample.consumption * time_step).sum())
    }

    /// Consumed energy normalised to a single day.
    pub fn try_daily_consumption(&self) -> Result<WattHours> {
        Ok(self.try_consumption_energy()? * (HOURS_PER_DAY / self.try_duration()?))
    }

    /// Repeat the profile back-to-back, for example to run a one-day profile over several days.
    pub fn try_repeat(&self, n_times: usize) -> Result<Self> {
        let period = self.try_duration()?;
        Ok((0..n_times)
            .flat_map(|n| {
                #[expect(clippy::cast_precision_loss)]
                let shift = period * n as f64;
                self.iter().map(move |sample| Sample { time: sample.time + shift, ..*sample })
            })
            .collect())
    }

    /// Re-bin the profile into a coarser step by averaging the power over complete windows.
    ///
    /// Averaging preserves energy. An incomplete trailing window is dropped.
    pub fn try_resample(&self, target: Hours) -> Result<Self> {
        let time_step = self.try_time_step()?;
        let ratio = target / time_step;
        let window = ratio.round();
        if !ratio.is_finite() || window < 1.0 || (ratio - window).abs() > TIME_STEP_TOLERANCE {
            return Err(ConfigurationError::IncompatibleTimeStep { step: time_step, target });
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let window = window as usize;

        Ok(self
            .0
            .chunks_exact(window)
            .map(|chunk| {
                #[expect(clippy::cast_precision_loss)]
                let n = chunk.len() as f64;
                Sample {
                    time: chunk[0].time,
                    generation: chunk.iter().map(|sample| sample.generation).sum::<Watts>() / n,
                    consumption: chunk.iter().map(|sample| sample.consumption).sum::<Watts>() / n,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

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
    fn test_time_step_from_spacing() {
        let profile: Profile = [0.0, 0.5, 1.0]
            .into_iter()
            .map(|time| Sample::new(Hours(time), Watts::ZERO, Watts::ZERO))
            .collect();
        assert_eq!(profile.try_time_step(), Ok(Hours(0.5)));
    }

    #[test]
    fn test_single_sample_spans_one_hour() {
        let profile = hourly(&[(0.0, 50.0)]);
        assert_eq!(profile.try_time_step(), Ok(Hours::ONE));
    }

    #[test]
    fn test_empty_profile() {
        assert_eq!(Profile::default().try_time_step(), Err(ConfigurationError::EmptyProfile));
    }

    #[test]
    fn test_non_monotonic_time_axis() {
        let profile: Profile = [0.0, 1.0, 1.0]
            .into_iter()
            .map(|time| Sample::new(Hours(time), Watts::ZERO, Watts::ZERO))
            .collect();
        assert!(matches!(
            profile.try_time_step(),
            Err(ConfigurationError::NonMonotonicTimeAxis { index: 2, .. })
        ));
    }

    #[test]
    fn test_non_uniform_time_step() {
        let profile: Profile = [0.0, 1.0, 3.0]
            .into_iter()
            .map(|time| Sample::new(Hours(time), Watts::ZERO, Watts::ZERO))
            .collect();
        assert!(matches!(
            profile.try_time_step(),
            Err(ConfigurationError::NonUniformTimeStep { index: 2, .. })
        ));
    }

    #[test]
    fn test_negative_power() {
        let profile = hourly(&[(0.0, 10.0), (-1.0, 10.0)]);
        assert_eq!(
            profile.try_time_step(),
            Err(ConfigurationError::InvalidPower {
                index: 1,
                name: "generation",
                value: Watts(-1.0),
            })
        );
    }

    #[test]
    fn test_daily_consumption_of_two_days() {
        let profile = hourly(&[(0.0, 100.0); 48]);
        assert_abs_diff_eq!(profile.try_daily_consumption().unwrap().0, 2400.0);
    }

    #[test]
    fn test_repeat_shifts_time() {
        let profile = hourly(&[(1.0, 2.0), (3.0, 4.0)]).try_repeat(3).unwrap();
        assert_eq!(profile.len(), 6);
        assert_eq!(profile.try_time_step(), Ok(Hours::ONE));
        let last = profile.as_ref().last().unwrap();
        assert_eq!(last.time, Hours(5.0));
        assert_eq!(last.generation, Watts(3.0));
    }

    #[test]
    fn test_resample_half_hourly_to_hourly() {
        let profile: Profile = [(0.0, 100.0), (0.5, 300.0), (1.0, 50.0), (1.5, 150.0), (2.0, 7.0)]
            .into_iter()
            .map(|(time, power)| Sample::new(Hours(time), Watts(power), Watts(power / 2.0)))
            .collect();
        let resampled = profile.try_resample(Hours::ONE).unwrap();
        assert_eq!(resampled.len(), 2);
        let samples = resampled.as_ref();
        assert_eq!(samples[0], Sample::new(Hours(0.0), Watts(200.0), Watts(100.0)));
        assert_eq!(samples[1], Sample::new(Hours(1.0), Watts(100.0), Watts(50.0)));
    }

    #[test]
    fn test_resample_incompatible_step() {
        let profile = hourly(&[(0.0, 0.0), (0.0, 0.0)]);
        assert!(matches!(
            profile.try_resample(Hours(1.5)),
            Err(ConfigurationError::IncompatibleTimeStep { .. })
        ));
    }
}
