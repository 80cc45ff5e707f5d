pub mod autonomy;
pub mod balance;
pub mod battery;
mod error;
pub mod profile;
pub mod pv;
mod sample;
pub mod sizing;
pub mod step;
mod summary;
mod trace;

pub use self::{
    battery::{BatteryBank, simulate},
    error::ConfigurationError,
    profile::Profile,
    sample::Sample,
    summary::Summary,
    trace::Trace,
};
