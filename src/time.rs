use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::errors::LedgerError;

/// Fixed human-readable timestamp layout used everywhere a time is shown
/// or entered: `2024-01-31 18:30:00`, local timezone, zero-padded.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses the fixed `YYYY-MM-DD HH:MM:SS` layout in the local timezone.
///
/// Text that does not match the layout, or that names an invalid calendar
/// date or time of day, is rejected. A local time that does not exist
/// because of a DST gap is rejected as well; an ambiguous one (DST fold)
/// resolves to the earlier instant.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Local>, LedgerError> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        LedgerError::MalformedTimestamp {
            input: text.to_string(),
        }
    })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| LedgerError::MalformedTimestamp {
            input: text.to_string(),
        })
}

/// Renders the inverse of [`parse_timestamp`]. Each call returns a freshly
/// owned string.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
