use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;

use crate::{
    core::{balance::EnergyBalance, pv::PvArray},
    io,
    prelude::*,
    quantity::{irradiance::SquareMetres, power::Watts},
    tables::{build_array_table, build_balance_table},
};

#[derive(Parser)]
pub struct PvArgs {
    /// Irradiance CSV with `hour,irradiance,consumption` columns.
    #[clap(long = "irradiance", env = "IRRADIANCE_PATH")]
    irradiance: PathBuf,

    /// Save the resulting profile CSV here.
    #[clap(long = "output", env = "PROFILE_OUTPUT_PATH")]
    output: Option<PathBuf>,

    #[clap(flatten)]
    array: ArrayArgs,
}

#[derive(Copy, Clone, Parser)]
pub struct ArrayArgs {
    #[clap(long = "peak-power-watts", default_value = "3000", env = "PEAK_POWER_WATTS")]
    peak_power: Watts,

    #[clap(
        long = "module-peak-power-watts",
        default_value = "300",
        env = "MODULE_PEAK_POWER_WATTS"
    )]
    module_peak_power: Watts,

    #[clap(long, default_value = "0.18", env = "MODULE_EFFICIENCY")]
    module_efficiency: f64,

    #[clap(
        long = "module-area-square-metres",
        default_value = "1.6",
        env = "MODULE_AREA_SQUARE_METRES"
    )]
    module_area: SquareMetres,

    /// System losses, `0..1`.
    #[clap(long, default_value = "0.04", env = "PV_LOSSES")]
    losses: f64,
}

impl ArrayArgs {
    fn try_build(self) -> Result<PvArray> {
        Ok(PvArray::builder()
            .peak_power(self.peak_power)
            .module_peak_power(self.module_peak_power)
            .module_efficiency(self.module_efficiency)
            .module_area(self.module_area)
            .losses(self.losses)
            .build()?)
    }
}

impl PvArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let array = self.array.try_build()?;
        println!("{}", build_array_table(&array));

        let samples = io::irradiance::read_path(&self.irradiance)?;
        let profile = array.profile(&samples);
        println!("{}", build_balance_table(&EnergyBalance::try_from_profile(&profile)?));

        if let Some(path) = &self.output {
            let file = File::create(path)
                .with_context(|| format!("failed to create `{}`", path.display()))?;
            io::profile::write(&profile, BufWriter::new(file))?;
            info!(path = %path.display(), n_samples = profile.len(), "saved the profile");
        }
        Ok(())
    }
}
