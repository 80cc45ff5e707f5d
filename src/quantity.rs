#[macro_use]
mod macros;

pub mod electric;
pub mod energy;
pub mod irradiance;
pub mod power;
pub mod time;
mod zero;

pub use self::zero::Zero;

#[cfg(test)]
mod tests {
    use super::{energy::WattHours, power::Watts, time::Hours};

    #[test]
    fn test_min_max_clamp() {
        assert_eq!(Watts(1.0).min(Watts(2.0)), Watts(1.0));
        assert_eq!(Watts(1.0).max(Watts(2.0)), Watts(2.0));
        assert_eq!(Watts(4.0).clamp(Watts(2.0), Watts(3.0)), Watts(3.0));
        assert_eq!(Watts(1.0).clamp(Watts(2.0), Watts(3.0)), Watts(2.0));
    }

    #[test]
    fn test_display_uses_default_precision() {
        assert_eq!(WattHours(1234.567).to_string(), "1235 Wh");
        assert_eq!(Hours(0.5).to_string(), "0.50 h");
    }

    #[test]
    fn test_display_respects_explicit_precision() {
        assert_eq!(format!("{:.1}", Watts(12.34)), "12.3 W");
    }

    #[test]
    fn test_sum() {
        let total: WattHours = [WattHours(1.0), WattHours(2.5)].into_iter().sum();
        assert_eq!(total, WattHours(3.5));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1200".parse::<Watts>().unwrap(), Watts(1200.0));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(WattHours(50.0) / WattHours(200.0), 0.25);
    }
}
