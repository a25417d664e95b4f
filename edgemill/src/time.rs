//! UTC timestamp handling shared by the generator, sinks, and CLIs.
//!
//! Every timestamp in the system is a [`DateTime<Utc>`]. The two sinks
//! disagree only on string formatting: CSV uses ISO-8601 with a `Z` suffix,
//! the line-delimited JSON sink uses naive UTC with no suffix (the format
//! columnar ingestion engines expect for their DateTime columns).

use chrono::{DateTime, DurationRound, NaiveDateTime, TimeDelta, Utc};

use crate::error::{TelemetryError, TelemetryResult};

/// Floor a timestamp to the whole minute.
///
/// Generation always starts on a minute boundary; seconds and sub-second
/// precision in a caller-supplied start are discarded, never rounded up.
pub fn floor_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.duration_trunc(TimeDelta::minutes(1))
        .expect("one minute is a valid truncation unit")
}

/// Parse a caller-supplied start timestamp into UTC.
///
/// Accepts ISO-8601 with a `Z` or numeric offset suffix, or a naive
/// timestamp (`2026-02-20T00:00:00`, `T` or space separator) which is
/// treated as already being UTC.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidTimestamp`] when no accepted form
/// matches. This is a usage error belonging to the CLI layer, not the
/// generation core.
pub fn parse_utc_timestamp(raw: &str) -> TelemetryResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(TelemetryError::InvalidTimestamp(raw.to_owned()))
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SSZ` for the CSV sink.
pub fn format_iso_utc(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Format a timestamp as naive UTC `YYYY-MM-DD HH:MM:SS` for the
/// line-delimited JSON sink.
pub fn format_naive_utc(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
