//! ISO-8601 timestamp formatting
//!
//! Seed exports render instants with millisecond precision and a `Z`
//! suffix (`2024-03-01T09:30:00.000Z`).

use chrono::{DateTime, SecondsFormat, Utc};

/// Render a timestamp as ISO-8601 with millisecond precision.
pub fn to_iso_millis(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_iso(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Serde adapter for `DateTime<Utc>` fields rendered with [`to_iso_millis`].
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as an ISO-8601 string with millisecond precision.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso_millis(ts))
    }

    /// Deserialize from any RFC 3339 string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millis_format() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(to_iso_millis(&ts), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn test_parse_offset_timestamp() {
        let ts = parse_iso("2023-11-14T23:13:20.123+01:00").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_iso("yesterday").is_none());
    }
}
