//! Conversion between fractional hours and the `"Xh YYm"` strings stored on tours.

/// Splits fractional hours into whole hours and rounded minutes.
///
/// A value that rounds up to 60 minutes carries into the next hour.
pub fn split_hours(hours: f64) -> (u32, u32) {
    if !hours.is_finite() || hours <= 0.0 {
        return (0, 0);
    }

    let total_minutes = (hours * 60.0).round() as u64;
    ((total_minutes / 60) as u32, (total_minutes % 60) as u32)
}

pub fn format_hours(hours: f64) -> String {
    let (h, m) = split_hours(hours);
    format!("{}h {:02}m", h, m)
}

pub fn parse_travel_time(text: &str) -> Option<(u32, u32)> {
    let (hours, rest) = text.trim().split_once('h')?;
    let minutes = rest.trim().strip_suffix('m')?.trim();

    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    if minutes >= 60 {
        return None;
    }

    Some((hours, minutes))
}

pub fn travel_time_to_hours(text: &str) -> Option<f64> {
    parse_travel_time(text).map(|(h, m)| h as f64 + m as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_padded_minutes() {
        assert_eq!(format_hours(0.5), "0h 30m");
        assert_eq!(format_hours(2.0), "2h 00m");
        assert_eq!(format_hours(1.0 + 5.0 / 60.0), "1h 05m");
    }

    #[test]
    fn rounding_to_sixty_minutes_carries() {
        assert_eq!(split_hours(1.999), (2, 0));
        assert_eq!(format_hours(1.999), "2h 00m");
    }

    #[test]
    fn degenerate_input_formats_as_zero() {
        assert_eq!(format_hours(0.0), "0h 00m");
        assert_eq!(format_hours(-3.0), "0h 00m");
        assert_eq!(format_hours(f64::NAN), "0h 00m");
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!(parse_travel_time("2h 05m"), Some((2, 5)));
        assert_eq!(parse_travel_time("2h5m"), Some((2, 5)));
        assert_eq!(parse_travel_time(" 12h 45m "), Some((12, 45)));
        assert_eq!(parse_travel_time("2h 75m"), None);
        assert_eq!(parse_travel_time("two hours"), None);
        assert_eq!(parse_travel_time(""), None);
    }

    #[test]
    fn formatting_round_trips_the_hour_minute_pair() {
        for hours in [0.0, 0.25, 0.5, 1.0 / 3.0, 2.0, 6.6667, 16.7499, 20.0, 99.99] {
            let formatted = format_hours(hours);
            assert_eq!(parse_travel_time(&formatted), Some(split_hours(hours)));
        }
    }

    #[test]
    fn converts_back_to_hours() {
        assert_eq!(travel_time_to_hours("0h 30m"), Some(0.5));
        assert_eq!(travel_time_to_hours("bogus"), None);
    }
}
