use std::ops::Div;

use crate::quantity::{
    electric::{AmpereHours, Volts},
    power::Watts,
    time::Hours,
};

quantity!(WattHours, suffix: "Wh", precision: 0);
quantity!(KilowattHours, suffix: "kWh", precision: 2);

impl From<KilowattHours> for WattHours {
    fn from(kilowatt_hours: KilowattHours) -> Self {
        Self(kilowatt_hours.0 * 1000.0)
    }
}

impl From<WattHours> for KilowattHours {
    fn from(watt_hours: WattHours) -> Self {
        Self(watt_hours.0 * 0.001)
    }
}

impl Div<Hours> for WattHours {
    type Output = Watts;

    fn div(self, hours: Hours) -> Self::Output {
        Watts(self.0 / hours.0)
    }
}

/// Charge needed to store the energy at the given voltage.
impl Div<Volts> for WattHours {
    type Output = AmpereHours;

    fn div(self, volts: Volts) -> Self::Output {
        AmpereHours(self.0 / volts.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilowatt_hours_round_trip() {
        assert_eq!(WattHours::from(KilowattHours(2.5)), WattHours(2500.0));
        assert_eq!(KilowattHours::from(WattHours(2500.0)), KilowattHours(2.5));
    }

    #[test]
    fn test_energy_over_voltage() {
        assert_eq!(WattHours(4800.0) / Volts(48.0), AmpereHours(100.0));
    }
}
