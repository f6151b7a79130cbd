// A simple module to define the time types used in the project
//
// IMPORTANT NOTE:
// The fixed gas price window is derived from the wall clock of the node
// (the quota resets every UTC day), so two nodes may take a different
// decision around midnight. Never use it for block validation.
//
// Block timestamps are stored in seconds since the UNIX epoch (UTC).

use chrono::{DateTime, NaiveTime, Utc};

// Seconds timestamps used to determine it using its type
pub type TimestampSeconds = u64;

// Midnight UTC of the calendar day containing `now`
pub fn get_start_of_utc_day(now: &DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

// Midnight UTC of the day containing `now`, as a seconds timestamp
// Dates before the epoch are clamped to 0
pub fn get_start_of_utc_day_in_seconds(now: &DateTime<Utc>) -> TimestampSeconds {
    let start = get_start_of_utc_day(now).timestamp();
    u64::try_from(start).unwrap_or(0)
}

// Convert a seconds timestamp into a UTC date time
pub fn timestamp_to_utc(timestamp: TimestampSeconds) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(timestamp).ok()?;
    DateTime::from_timestamp(secs, 0)
}
