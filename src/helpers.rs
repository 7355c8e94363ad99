use std::time::Duration;

/// Round to one decimal place, ties to even on the exact binary value.
///
/// The float formatter is correctly rounded, so `-1.25` becomes `-1.2` and `0.15`
/// (stored as 0.1499...) becomes `0.1`. Multiplying by ten first would get both wrong.
pub fn round_to_tenths(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = format!("{:.1}", value).parse::<f64>().unwrap_or(value);
    // keep "-0.0" out of scores and summaries
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `MM:SS` under an hour, `HH:MM:SS` from an hour on.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total / 60) % 60, total % 60);
    if hours == 0 {
        format!("{:02}:{:02}", minutes, seconds)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenths_ties_to_even() {
        assert_eq!(round_to_tenths(-1.25), -1.2);
        assert_eq!(round_to_tenths(1.25), 1.2);
        assert_eq!(round_to_tenths(1.35), 1.4); // 1.35000000000000008882
        assert_eq!(round_to_tenths(0.15), 0.1); // 0.14999999999999999445
    }

    #[test]
    fn test_round_to_tenths_cleans_float_noise() {
        assert_eq!(round_to_tenths(50.0 - 3.0 - 12.0 * 0.2), 44.6);
        assert_eq!(round_to_tenths(3.0 * 0.2), 0.6);
        assert_eq!(round_to_tenths(-0.04), 0.0);
        assert!(round_to_tenths(-0.04).is_sign_positive());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(75_900)), "01:15");
        assert_eq!(format_elapsed(Duration::from_secs(3599)), "59:59");
        assert_eq!(format_elapsed(Duration::from_secs(3600)), "01:00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3600 * 2 + 61)), "02:01:01");
    }
}
