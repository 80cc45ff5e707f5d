quantity!(Hours, suffix: "h", precision: 2);

impl Hours {
    pub const ONE: Self = Self(1.0);

    /// Offset within a day as `HH:MM`.
    #[must_use]
    pub fn format_time_of_day(self) -> String {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = (self.0.rem_euclid(24.0) * 60.0).round() as u32;
        format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(Hours(0.0).format_time_of_day(), "00:00");
        assert_eq!(Hours(13.5).format_time_of_day(), "13:30");
        assert_eq!(Hours(25.25).format_time_of_day(), "01:15");
    }
}
