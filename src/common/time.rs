use chrono::{DateTime, TimeZone, Utc};

use super::types::Timestamp;

pub fn timestamp_from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Timestamp {
    dt.timestamp_millis()
}

/// Converts a millisecond timestamp back to a UTC datetime. Out of range values yield `None`.
pub fn datetime_from_timestamp(ts: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts)
}

pub fn timestamps_from_datetimes<Tz: TimeZone>(dts: &[DateTime<Tz>]) -> Vec<Timestamp> {
    dts.iter().map(timestamp_from_datetime).collect()
}
