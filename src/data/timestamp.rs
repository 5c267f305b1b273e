use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Accepted time-of-day layouts, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%H:%M:%S%.f"];

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a time of day like "07:45", "07:45:10" or "07:45:10.250".
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS.iter().find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Hours between two instants as a fraction, negative if `later` is earlier.
pub fn hours_between(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    let delta = later - earlier;
    delta.num_milliseconds() as f64 / 3_600_000.0
}

/// `now` minus `h` whole hours, `None` if that is not representable.
pub fn hours_before(now: NaiveDateTime, h: i64) -> Option<NaiveDateTime> {
    TimeDelta::try_hours(h).and_then(|delta| now.checked_sub_signed(delta))
}

/// Format a number of hours for display: "45m", "1.5h", "3d 4h".
pub fn format_hours(h: f64) -> String {
    let minutes = (h * 60.0).round() as i64;
    if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 48 * 60 {
        format!("{:.1}h", minutes as f64 / 60.0)
    } else {
        let whole_hours = (minutes + 30) / 60;
        format!("{}d {}h", whole_hours / 24, whole_hours % 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-05-01"), NaiveDate::from_ymd_opt(2024, 5, 1));
        assert!(parse_date("01/05/2024").is_none());
        assert!(parse_date("2024-02-30").is_none());
    }

    #[test]
    fn test_parse_time_variants() {
        assert_eq!(parse_time("07:45"), NaiveTime::from_hms_opt(7, 45, 0));
        assert_eq!(parse_time(" 07:45:10 "), NaiveTime::from_hms_opt(7, 45, 10));
        assert_eq!(parse_time("07:45:10.250"), NaiveTime::from_hms_milli_opt(7, 45, 10, 250));
        assert!(parse_time("25:00").is_none());
        assert!(parse_time("noon").is_none());
    }

    #[test]
    fn test_hours_between_is_signed() {
        let a = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(11, 30, 0).unwrap();
        assert!((hours_between(a, b) - 1.5).abs() < 1e-9);
        assert!((hours_between(b, a) + 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(0.5), "30m");
        assert_eq!(format_hours(1.0), "1.0h");
        assert_eq!(format_hours(50.0), "2d 2h");
    }

    #[test]
    fn test_format_hours_carries_into_next_unit() {
        assert_eq!(format_hours(0.9999), "1.0h");
        assert_eq!(format_hours(71.99), "3d 0h");
        assert_eq!(format_hours(47.5), "47.5h");
        assert_eq!(format_hours(0.0), "0m");
    }

    #[test]
    fn test_hours_before_does_not_overflow() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();
        assert_eq!(
            hours_before(now, 8),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(7, 0, 0)
        );
        assert_eq!(hours_before(now, i64::MAX), None);
        assert_eq!(hours_before(now, i64::MAX / 3_600_000), None);
    }
}
