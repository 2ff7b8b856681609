//! Helpers for moving calendar dates across the API boundary.
//! Requests may carry a bare `YYYY-MM-DD` or a full RFC 3339 date-time; stored
//! reservations keep their dates as UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a request date into a calendar day.
///
/// * `2024-01-03`                 → that day
/// * `2024-01-03T15:00:00Z`       → the UTC date of that instant
/// * `2024-01-03T01:00:00+02:00`  → converted to UTC first (here 2024-01-02)
/// * `2024-01-03T15:00:00`        → no zone, taken as UTC
pub fn parse_day(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.date());
    }
    anyhow::bail!("'{}' is neither YYYY-MM-DD nor an RFC 3339 date-time", raw)
}

pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}
