use std::ops::Mul;

use crate::quantity::{
    energy::{KilowattHours, WattHours},
    time::Hours,
};

quantity!(Watts, suffix: "W", precision: 0);
quantity!(Kilowatts, suffix: "kW", precision: 3);

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}

impl Mul<Hours> for Watts {
    type Output = WattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        WattHours(self.0 * hours.0)
    }
}

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watts_times_hours() {
        assert_eq!(Watts(500.0) * Hours(0.5), WattHours(250.0));
    }

    #[test]
    fn test_kilowatts_to_watts() {
        assert_eq!(Watts::from(Kilowatts(1.2)), Watts(1200.0));
    }
}
