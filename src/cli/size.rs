use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{bank::SizingArgs, profile::ProfileTransformArgs},
    core::{balance::EnergyTable, sizing::estimate_capacity},
    io,
    prelude::*,
    quantity::energy::{KilowattHours, WattHours},
    tables::build_layout_table,
};

#[derive(Parser)]
pub struct SizeArgs {
    /// Daily energy to cover in watt-hours.
    #[clap(
        long = "daily-energy-watt-hours",
        env = "DAILY_ENERGY_WATT_HOURS",
        required_unless_present = "profile"
    )]
    daily_energy: Option<WattHours>,

    /// Profile CSV to take the daily consumption and the deficit from.
    #[clap(long, env = "PROFILE_PATH")]
    profile: Option<PathBuf>,

    #[clap(flatten)]
    transform: ProfileTransformArgs,

    #[clap(long, default_value = "2", env = "AUTONOMY_DAYS")]
    autonomy_days: u32,

    /// Round-trip efficiency used to estimate the capacity from the profile's deficit.
    #[clap(long, default_value = "0.9", env = "ROUND_TRIP_EFFICIENCY")]
    round_trip_efficiency: f64,

    #[clap(flatten)]
    sizing: SizingArgs,
}

impl SizeArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let profile = self
            .profile
            .as_deref()
            .map(|path| self.transform.apply(io::profile::read_path(path)?))
            .transpose()?;

        let daily_energy = match (self.daily_energy, &profile) {
            (Some(daily_energy), _) => daily_energy,
            (None, Some(profile)) => profile.try_daily_consumption()?,
            (None, None) => bail!("either the daily energy or a profile is required"),
        };
        info!(%daily_energy, autonomy_days = self.autonomy_days, "sizing");

        let sizing = self.sizing.try_build(daily_energy, self.autonomy_days)?;
        println!("{}", build_layout_table(&sizing.layout()));

        if let Some(profile) = &profile {
            let deficit = EnergyTable::try_from_profile(profile)?.total_deficit();
            let capacity =
                estimate_capacity(deficit, sizing.usable_fraction(), self.round_trip_efficiency)?;
            info!(
                deficit = %KilowattHours::from(deficit),
                capacity = %KilowattHours::from(capacity),
                "estimated the capacity from the deficit",
            );
        }
        Ok(())
    }
}
