use std::fmt::{Display, Formatter};

use crate::{
    core::sample::Sample,
    quantity::{Zero, energy::WattHours},
};

/// What happened to the battery within a single step.
///
/// All the energies are expressed in stored-energy terms, that is after the charging efficiency
/// and before the discharging efficiency.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The whole surplus fitted under the ceiling (zero surplus included).
    Charged { stored: WattHours },

    /// The whole demand was supplied without touching the floor.
    Discharged { drawn: WattHours },

    /// The bank hit the ceiling and the excess was thrown away.
    CurtailedAtCeiling { stored: WattHours, curtailed: WattHours },

    /// The bank hit the floor and part of the demand was left unserved.
    DeficitAtFloor { drawn: WattHours, deficit: WattHours },
}

impl Outcome {
    pub const fn charged(self) -> WattHours {
        match self {
            Self::Charged { stored } | Self::CurtailedAtCeiling { stored, .. } => stored,
            Self::Discharged { .. } | Self::DeficitAtFloor { .. } => WattHours::ZERO,
        }
    }

    pub const fn discharged(self) -> WattHours {
        match self {
            Self::Discharged { drawn } | Self::DeficitAtFloor { drawn, .. } => drawn,
            Self::Charged { .. } | Self::CurtailedAtCeiling { .. } => WattHours::ZERO,
        }
    }

    pub const fn curtailed(self) -> WattHours {
        match self {
            Self::CurtailedAtCeiling { curtailed, .. } => curtailed,
            _ => WattHours::ZERO,
        }
    }

    pub const fn deficit(self) -> WattHours {
        match self {
            Self::DeficitAtFloor { deficit, .. } => deficit,
            _ => WattHours::ZERO,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charged { .. } => "charged",
            Self::Discharged { .. } => "discharged",
            Self::CurtailedAtCeiling { .. } => "curtailed",
            Self::DeficitAtFloor { .. } => "deficit",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single simulated step.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Step {
    pub sample: Sample,
    pub outcome: Outcome,
    pub residual_energy_after: WattHours,

    /// Always within the bank's state-of-charge window.
    pub state_of_charge_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curtailed_counts_as_charged() {
        let outcome =
            Outcome::CurtailedAtCeiling { stored: WattHours(10.0), curtailed: WattHours(350.0) };
        assert_eq!(outcome.charged(), WattHours(10.0));
        assert_eq!(outcome.discharged(), WattHours::ZERO);
        assert_eq!(outcome.curtailed(), WattHours(350.0));
        assert_eq!(outcome.deficit(), WattHours::ZERO);
    }

    #[test]
    fn test_deficit_counts_as_discharged() {
        let outcome = Outcome::DeficitAtFloor { drawn: WattHours(4.0), deficit: WattHours(6.0) };
        assert_eq!(outcome.charged(), WattHours::ZERO);
        assert_eq!(outcome.discharged(), WattHours(4.0));
        assert_eq!(outcome.deficit(), WattHours(6.0));
        assert_eq!(outcome.to_string(), "deficit");
    }
}
