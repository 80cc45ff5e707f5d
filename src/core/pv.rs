use bon::bon;

use crate::{
    core::{
        error::{ConfigurationError, Result},
        profile::Profile,
        sample::Sample,
    },
    quantity::{
        Zero,
        irradiance::{SquareMetres, WattsPerSquareMetre},
        power::Watts,
        time::Hours,
    },
};

/// Array of identical photovoltaic modules.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PvArray {
    module_peak_power: Watts,
    module_efficiency: f64,
    module_area: SquareMetres,
    peak_power: Watts,

    /// Wiring, inverter and soiling losses, `0..1`.
    losses: f64,
}

#[bon]
impl PvArray {
    #[builder]
    pub fn new(
        #[builder(default = Watts(3000.0))] peak_power: Watts,
        #[builder(default = Watts(300.0))] module_peak_power: Watts,
        #[builder(default = 0.18)] module_efficiency: f64,
        #[builder(default = SquareMetres(1.6))] module_area: SquareMetres,
        #[builder(default = 0.04)] losses: f64,
    ) -> Result<Self> {
        for (name, value) in [
            ("peak power", peak_power.0),
            ("module peak power", module_peak_power.0),
            ("module area", module_area.0),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigurationError::NonPositiveParameter { name, value });
            }
        }
        if !(module_efficiency > 0.0 && module_efficiency <= 1.0) {
            return Err(ConfigurationError::InvalidEfficiency {
                name: "module",
                value: module_efficiency,
            });
        }
        if !(0.0..1.0).contains(&losses) {
            return Err(ConfigurationError::InvalidEfficiency { name: "loss", value: losses });
        }
        Ok(Self { module_peak_power, module_efficiency, module_area, peak_power, losses })
    }
}

impl PvArray {
    /// Number of modules, possibly fractional when the peak power is not a multiple.
    #[must_use]
    pub fn n_modules(&self) -> f64 {
        self.peak_power / self.module_peak_power
    }

    pub fn total_area(&self) -> SquareMetres {
        self.module_area * self.n_modules()
    }

    pub const fn peak_power(&self) -> Watts {
        self.peak_power
    }

    /// Output power at the given plane-of-array irradiance.
    pub fn generation(&self, irradiance: WattsPerSquareMetre) -> Watts {
        (irradiance.max(WattsPerSquareMetre::ZERO) * self.total_area())
            * (self.module_efficiency * (1.0 - self.losses))
    }

    /// Turn the irradiance series into a generation and consumption profile.
    pub fn profile<'a>(&self, samples: impl IntoIterator<Item = &'a IrradianceSample>) -> Profile {
        samples
            .into_iter()
            .map(|sample| {
                Sample::new(sample.time, self.generation(sample.irradiance), sample.consumption)
            })
            .collect()
    }
}

/// Plane-of-array irradiance next to the consumption at the same time.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IrradianceSample {
    pub time: Hours,
    pub irradiance: WattsPerSquareMetre,
    pub consumption: Watts,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_default_array() {
        let array = PvArray::builder().build().unwrap();
        assert_abs_diff_eq!(array.n_modules(), 10.0);
        assert_abs_diff_eq!(array.total_area().0, 16.0);
        // 1000 W/m² × 16 m² × 0.18 × 0.96:
        assert_abs_diff_eq!(
            array.generation(WattsPerSquareMetre(1000.0)).0,
            2764.8,
            epsilon = 1e-9
        );
        assert_eq!(array.generation(WattsPerSquareMetre(-5.0)), Watts::ZERO);
    }

    #[test]
    fn test_profile() {
        let array = PvArray::builder().losses(0.0).build().unwrap();
        let samples = [
            IrradianceSample {
                time: Hours(0.0),
                irradiance: WattsPerSquareMetre::ZERO,
                consumption: Watts(100.0),
            },
            IrradianceSample {
                time: Hours(1.0),
                irradiance: WattsPerSquareMetre(500.0),
                consumption: Watts(100.0),
            },
        ];
        let profile = array.profile(&samples);
        assert_eq!(profile.len(), 2);
        assert_abs_diff_eq!(profile.as_ref()[1].generation.0, 1440.0, epsilon = 1e-9);
        assert_eq!(profile.as_ref()[1].consumption, Watts(100.0));
    }

    #[test]
    fn test_invalid_losses() {
        assert!(matches!(
            PvArray::builder().losses(1.0).build(),
            Err(ConfigurationError::InvalidEfficiency { name: "loss", .. })
        ));
    }
}
