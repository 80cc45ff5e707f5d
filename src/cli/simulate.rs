use clap::Parser;

use crate::{
    cli::{
        bank::{BankArgs, SizingArgs, ThresholdArgs},
        output::OutputArgs,
        profile::ProfileArgs,
    },
    core::simulate,
    prelude::*,
    quantity::{Zero, energy::WattHours},
    tables::{build_layout_table, build_steps_table, build_summary_table},
};

#[derive(Parser)]
pub struct SimulateArgs {
    #[clap(flatten)]
    profile: ProfileArgs,

    /// Nominal bank capacity in watt-hours.
    ///
    /// When omitted, the bank is sized for the profile's daily consumption instead.
    #[clap(long = "capacity-watt-hours", env = "CAPACITY_WATT_HOURS")]
    capacity: Option<WattHours>,

    /// Autonomy days to size the bank for, when the capacity is not given.
    #[clap(long, default_value = "2", env = "AUTONOMY_DAYS")]
    autonomy_days: u32,

    /// Print every step.
    #[clap(long)]
    steps: bool,

    #[clap(flatten)]
    bank: BankArgs,

    #[clap(flatten)]
    sizing: SizingArgs,

    #[clap(flatten)]
    thresholds: ThresholdArgs,

    #[clap(flatten)]
    output: OutputArgs,
}

impl SimulateArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let profile = self.profile.load()?;
        let capacity = if let Some(capacity) = self.capacity {
            capacity
        } else {
            let daily_energy = profile.try_daily_consumption()?;
            let layout = self.sizing.try_build(daily_energy, self.autonomy_days)?.layout();
            info!(%daily_energy, autonomy_days = self.autonomy_days, "sized the bank");
            println!("{}", build_layout_table(&layout));
            layout.installed_capacity
        };
        let bank = self.bank.try_build(capacity)?;

        let trace = simulate(&bank, &profile)?;
        let critical_state_of_charge = self.thresholds.critical_state_of_charge;
        let summary = trace.summarize(critical_state_of_charge);
        info!(
            n_steps = trace.len(),
            n_critical_steps = summary.n_critical_steps,
            min_state_of_charge = summary.min_state_of_charge,
            "simulated",
        );
        if summary.deficit > WattHours::ZERO {
            warn!(unmet_load = %summary.unmet_load, "the bank does not cover the load");
        }

        if self.steps {
            println!("{}", build_steps_table(&trace, critical_state_of_charge));
        }
        println!("{}", build_summary_table(&bank, &summary));

        let title = self.profile.path.file_stem().map_or_else(
            || "State of charge".to_string(),
            |stem| stem.to_string_lossy().into_owned(),
        );
        self.output.save(&title, &trace, critical_state_of_charge)
    }
}
