use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};

use crate::core::{AppError, Result};

/// Text layout of `purchases.created_at`. Fixed-width fractional seconds keep
/// lexicographic order equal to chronological order.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Layout of the timestamp embedded in report filenames
pub const FILE_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a UTC naive timestamp for storage and for window comparisons
pub fn to_storage(timestamp: NaiveDateTime) -> String {
    timestamp.format(STORAGE_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// Accepts either a space or `T` between date and time and any number of
/// fractional digits (including none).
pub fn parse_stored(raw: &str) -> Result<NaiveDateTime> {
    let normalized = raw.trim().replacen('T', " ", 1);
    NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| AppError::internal(format!("Invalid stored timestamp '{}': {}", raw, e)))
}

/// Start of the trailing window ending at `now`. The start itself is part of the window.
///
/// Fails when the window reaches past the earliest representable date.
pub fn window_start(now: NaiveDateTime, window_days: u32) -> Result<NaiveDateTime> {
    now.checked_sub_signed(Duration::days(i64::from(window_days)))
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "Loyalty window of {} days reaches before the earliest supported date",
                window_days
            ))
        })
}

/// Filename stamp for a wall-clock instant
pub fn file_stamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(FILE_STAMP_FORMAT).to_string()
}
