use crate::quantity::{power::Watts, time::Hours};

/// Single point of a generation and consumption profile.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Offset from the start of the profile.
    pub time: Hours,

    pub generation: Watts,
    pub consumption: Watts,
}

impl Sample {
    pub const fn new(time: Hours, generation: Watts, consumption: Watts) -> Self {
        Self { time, generation, consumption }
    }

    /// Positive is surplus, negative is deficit.
    #[must_use]
    pub fn net_power(&self) -> Watts {
        self.generation - self.consumption
    }
}
