//! Timestamp helpers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Format as ISO 8601 with millisecond precision and a `Z` suffix,
/// e.g. `2025-11-13T06:00:00.000Z`.
pub fn iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time as ISO 8601.
pub fn now_iso8601() -> String {
    iso8601(&Utc::now())
}

/// Parse an ISO 8601 timestamp, assuming UTC when no offset is given.
pub fn parse_iso8601(s: &str) -> Option<DateTime<Utc>> {
    // Try full datetime with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try without timezone (assume UTC)
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso8601_format() {
        let dt = Utc.with_ymd_and_hms(2025, 11, 13, 6, 0, 0).unwrap();
        assert_eq!(iso8601(&dt), "2025-11-13T06:00:00.000Z");
    }

    #[test]
    fn test_parse_round_trip() {
        let dt = Utc.with_ymd_and_hms(2025, 11, 13, 6, 30, 0).unwrap();
        assert_eq!(parse_iso8601(&iso8601(&dt)), Some(dt));
    }

    #[test]
    fn test_parse_naive() {
        let parsed = parse_iso8601("2025-11-13T06:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 13, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_iso8601("yesterday").is_none());
    }
}
