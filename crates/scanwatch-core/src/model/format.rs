/// Display formatting for scan counters and backend timestamps.
///
/// Counters stay `u64` everywhere; strings are produced only at the
/// display boundary.
use chrono::{DateTime, NaiveDateTime};

/// Output layout for [`format_timestamp`], e.g. "Aug 8, 2025 07:18".
const TIMESTAMP_DISPLAY: &str = "%b %-d, %Y %H:%M";

/// Format a count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Parse a backend timestamp.
///
/// The service emits naive ISO-8601 without an offset
/// (`2025-08-08T07:18:02.223`); RFC 3339 is accepted too and converted
/// to its naive UTC value.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Format a backend timestamp for display.
///
/// Unparsable input is returned unchanged rather than hidden.
pub fn format_timestamp(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format(TIMESTAMP_DISPLAY).to_string(),
        None => raw.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn naive_backend_timestamp() {
        assert_eq!(
            format_timestamp("2025-08-08T07:18:02.223"),
            "Aug 8, 2025 07:18"
        );
        assert_eq!(format_timestamp("2025-08-08T07:18:02"), "Aug 8, 2025 07:18");
    }

    #[test]
    fn rfc3339_timestamp_is_normalised_to_utc() {
        assert_eq!(
            format_timestamp("2025-08-08T09:18:02+02:00"),
            "Aug 8, 2025 07:18"
        );
    }

    #[test]
    fn garbage_is_passed_through() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert!(parse_timestamp("").is_none());
    }
}
