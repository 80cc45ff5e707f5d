mod autonomy;
mod balance;
mod bank;
mod output;
mod profile;
mod pv;
mod simulate;
mod size;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        autonomy::AutonomyArgs,
        balance::BalanceArgs,
        pv::PvArgs,
        simulate::SimulateArgs,
        size::SizeArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Simulate the battery state of charge over a generation and consumption profile.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// Size a battery bank for the given daily energy and autonomy.
    #[clap(name = "size")]
    Size(Box<SizeArgs>),

    /// Compare autonomy options over several scenarios and recommend one.
    #[clap(name = "autonomy")]
    Autonomy(Box<AutonomyArgs>),

    /// Energy balance of a system without storage.
    #[clap(name = "balance")]
    Balance(Box<BalanceArgs>),

    /// Model the photovoltaic array output from irradiance.
    #[clap(name = "pv")]
    Pv(Box<PvArgs>),
}

impl Command {
    pub fn run(self) -> Result {
        match self {
            Self::Simulate(args) => args.run(),
            Self::Size(args) => args.run(),
            Self::Autonomy(args) => args.run(),
            Self::Balance(args) => args.run(),
            Self::Pv(args) => args.run(),
        }
    }
}
