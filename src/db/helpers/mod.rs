use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::db::models::SessionState;

pub fn to_i64(value: usize) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u32(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow!("{field} contains out-of-range value {value}"))
}

/// Timestamps are written with full nanosecond precision so a stored value
/// parses back to the exact instant that was written.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_optional_datetime(
    value: Option<String>,
    field: &str,
) -> Result<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => parse_datetime(&raw, field).map(Some),
        None => Ok(None),
    }
}

pub fn parse_state(value: &str) -> Result<SessionState> {
    match value {
        "InProgress" => Ok(SessionState::InProgress),
        "Completed" => Ok(SessionState::Completed),
        other => Err(anyhow!("unknown session state {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn datetime_text_round_trips_exactly() {
        let instant = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let parsed = parse_datetime(&format_datetime(&instant), "started_at").unwrap();
        assert_eq!(parsed, instant);
    }

    #[test]
    fn unknown_state_is_an_error() {
        assert_eq!(parse_state("Completed").unwrap(), SessionState::Completed);
        assert!(parse_state("1").is_err());
    }

    #[test]
    fn negative_dimensions_are_rejected() {
        assert!(to_u32(-1, "width").is_err());
        assert_eq!(to_u32(1920, "width").unwrap(), 1920);
    }
}
