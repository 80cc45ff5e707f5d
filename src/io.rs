//! CSV and TOML sources and sinks.

pub mod comparison;
pub mod irradiance;
pub mod profile;
pub mod summary;
pub mod trace;
