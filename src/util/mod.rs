//! Small utility helpers for time formatting and filesystem paths.

pub mod paths;

/// What: Format a Unix timestamp (seconds) as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// Inputs:
/// - `ts`: Optional seconds since the Unix epoch.
///
/// Output:
/// - Formatted date string; empty string for `None`; the raw number for
///   timestamps `chrono` cannot represent.
#[must_use]
pub fn ts_to_date(ts: Option<i64>) -> String {
    let Some(t) = ts else {
        return String::new();
    };
    chrono::DateTime::from_timestamp(t, 0).map_or_else(
        || t.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}
