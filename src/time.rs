//! Local-time rendering of stored timestamps.
//!
//! Rows store `preferred_time` as RFC 3339 instants; staff-facing views show
//! them in the shop's wall-clock time. Kathmandu has no daylight saving, so
//! a fixed offset is exact.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;

/// The shop's UTC offset (Asia/Kathmandu, UTC+5:45).
pub static KATHMANDU_OFFSET: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(5 * 3600 + 45 * 60).expect("valid offset"));

/// Render format used by staff-facing views.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a stored timestamp in the shop's wall-clock time.
///
/// Returns the raw string unchanged when it does not parse as RFC 3339.
pub fn format_to_local_time(raw: &str) -> String {
    format_with(raw, *KATHMANDU_OFFSET, LOCAL_TIME_FORMAT)
}

/// Render a stored timestamp with a caller-chosen offset and format.
pub fn format_with(raw: &str, offset: FixedOffset, format: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => instant.with_timezone(&offset).format(format).to_string(),
        Err(_) => raw.to_string(),
    }
}
