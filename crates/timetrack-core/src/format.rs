//! Duration and wall-clock formatting.

use chrono::{Local, NaiveDateTime, TimeZone};

/// Layout for editable local-time fields, sortable and minute-precise.
pub const LOCAL_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format a millisecond duration as zero-padded `HH:MM:SS`.
///
/// Negative input clamps to zero; sub-second remainders are floored;
/// hours grow without bound. Total function, never fails.
pub fn format_hms(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Render an absolute instant in the observer's local timezone at minute
/// precision (`YYYY-MM-DDTHH:MM`), suitable for an editable time field.
pub fn to_local_minute(epoch_ms: u64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms as i64)
        .single()
        .map(|dt| dt.format(LOCAL_MINUTE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Parse a local-minute string back into epoch milliseconds.
///
/// Inverse of [`to_local_minute`]: the round trip recovers the instant to
/// minute precision. Returns `None` on any parse failure.
pub fn parse_local_minute(input: &str) -> Option<u64> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), LOCAL_MINUTE_FORMAT).ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    let ms = local.timestamp_millis();
    (ms >= 0).then_some(ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamps_negative_to_zero() {
        assert_eq!(format_hms(-5), "00:00:00");
        assert_eq!(format_hms(0), "00:00:00");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(3_661_000), "01:01:01");
        assert_eq!(format_hms(59_999), "00:00:59");
        assert_eq!(format_hms(60_000), "00:01:00");
    }

    #[test]
    fn hours_are_unbounded() {
        // 100 hours straight.
        assert_eq!(format_hms(100 * 3_600_000), "100:00:00");
    }

    proptest! {
        #[test]
        fn total_over_all_integers(ms in any::<i64>()) {
            let formatted = format_hms(ms);
            let parts: Vec<&str> = formatted.split(':').collect();
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[0].len() >= 2);
            prop_assert_eq!(parts[1].len(), 2);
            prop_assert_eq!(parts[2].len(), 2);
            let hours: i64 = parts[0].parse().unwrap();
            let minutes: i64 = parts[1].parse().unwrap();
            let seconds: i64 = parts[2].parse().unwrap();
            prop_assert!(minutes < 60);
            prop_assert!(seconds < 60);
            prop_assert_eq!(hours * 3600 + minutes * 60 + seconds, ms.max(0) / 1000);
        }
    }

    #[test]
    fn local_minute_layout() {
        // 2025-06-15T06:13:20Z, well clear of any DST boundary.
        let rendered = to_local_minute(1_750_000_400_000);
        assert_eq!(rendered.len(), 16);
        assert_eq!(&rendered[10..11], "T");
    }

    #[test]
    fn local_minute_round_trip_truncates_to_minute() {
        let minute_ms = 1_750_000_000_000 / 60_000 * 60_000;
        let ms = minute_ms + 31_000;
        let parsed = parse_local_minute(&to_local_minute(ms)).unwrap();
        assert_eq!(parsed, minute_ms);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        assert_eq!(parse_local_minute("not a time"), None);
        assert_eq!(parse_local_minute("2026-13-01T00:00"), None);
        assert_eq!(parse_local_minute(""), None);
    }
}
