use std::ops::Mul;

use crate::quantity::power::Watts;

quantity!(
    /// [Irradiance][1] on the module plane.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Irradiance
    WattsPerSquareMetre,
    suffix: "W/m²",
    precision: 0
);

quantity!(SquareMetres, suffix: "m²", precision: 2);

impl Mul<SquareMetres> for WattsPerSquareMetre {
    type Output = Watts;

    fn mul(self, area: SquareMetres) -> Self::Output {
        Watts(self.0 * area.0)
    }
}
