use clap::Parser;

use crate::{
    cli::profile::ProfileArgs,
    core::balance::{EnergyBalance, EnergyTable},
    prelude::*,
    tables::{build_balance_table, build_energy_table},
};

#[derive(Parser)]
pub struct BalanceArgs {
    #[clap(flatten)]
    profile: ProfileArgs,

    /// Print the per-step energy table.
    #[clap(long)]
    table: bool,
}

impl BalanceArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let profile = self.profile.load()?;
        if self.table {
            println!("{}", build_energy_table(&EnergyTable::try_from_profile(&profile)?));
        }
        let balance = EnergyBalance::try_from_profile(&profile)?;
        info!(verdict = %balance.verdict(), "balanced");
        println!("{}", build_balance_table(&balance));
        Ok(())
    }
}
