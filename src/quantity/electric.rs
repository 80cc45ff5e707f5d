use std::ops::Mul;

use crate::quantity::energy::WattHours;

quantity!(Volts, suffix: "V", precision: 0);
quantity!(AmpereHours, suffix: "Ah", precision: 1);

impl Mul<Volts> for AmpereHours {
    type Output = WattHours;

    fn mul(self, volts: Volts) -> Self::Output {
        WattHours(self.0 * volts.0)
    }
}
