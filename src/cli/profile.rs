use std::path::PathBuf;

use clap::Parser;

use crate::{core::Profile, io, prelude::*, quantity::time::Hours};

/// Profile transformations applied right after loading.
#[must_use]
#[derive(Copy, Clone, Parser)]
pub struct ProfileTransformArgs {
    /// Re-bin the profile into this time step in hours, for example `1` for half-hourly data.
    #[clap(long = "resample-hours", env = "RESAMPLE_HOURS")]
    pub resample: Option<Hours>,

    /// Repeat the profile back-to-back this many times.
    #[clap(long = "repeat", default_value = "1", env = "REPEAT")]
    pub n_repeats: usize,
}

impl ProfileTransformArgs {
    pub fn apply(&self, mut profile: Profile) -> Result<Profile> {
        if let Some(target) = self.resample {
            profile = profile.try_resample(target)?;
            debug!(n_samples = profile.len(), %target, "resampled");
        }
        if self.n_repeats > 1 {
            profile = profile.try_repeat(self.n_repeats)?;
            debug!(n_samples = profile.len(), n_repeats = self.n_repeats, "repeated");
        }
        Ok(profile)
    }
}

#[must_use]
#[derive(Parser)]
pub struct ProfileArgs {
    /// Profile CSV with `hour,generation,consumption` columns.
    #[clap(long = "profile", env = "PROFILE_PATH")]
    pub path: PathBuf,

    #[clap(flatten)]
    pub transform: ProfileTransformArgs,
}

impl ProfileArgs {
    pub fn load(&self) -> Result<Profile> {
        self.transform.apply(io::profile::read_path(&self.path)?)
    }
}
