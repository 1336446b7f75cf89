//! Row normalization: raw cells into [`Release`] records.
//!
//! The date column is the messy part. Legacy exports mix ISO strings,
//! US-style dates, and bare spreadsheet serial numbers in one column,
//! so parsing tries each encoding in a fixed order and treats every
//! failure as "undated" rather than an error.

use crate::dataset::columns::ColumnMap;
use crate::models::Release;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Day offset between the spreadsheet serial epoch (1899-12-30) and the
/// Unix epoch. Serial day `25569` is exactly 1970-01-01.
const SERIAL_EPOCH_OFFSET_DAYS: f64 = 25569.0;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Build a [`Release`] from one raw row, or `None` when the row has no
/// artist or release title after trimming.
pub fn normalize_row(row: &[String], cols: &ColumnMap) -> Option<Release> {
    let artist = cell(row, Some(cols.artist));
    let release = cell(row, Some(cols.release));

    if artist.is_empty() || release.is_empty() {
        return None;
    }

    let date = cols
        .date
        .and_then(|idx| row.get(idx))
        .and_then(|raw| parse_date(raw));

    Some(Release {
        artist: artist.to_string(),
        release: release.to_string(),
        country: cell(row, cols.country).to_string(),
        date,
        label: optional(cell(row, cols.label)),
        gender: optional(cell(row, cols.gender)),
    })
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a raw date cell into a UTC instant.
///
/// Tried in order:
/// 1. finite number: spreadsheet serial day count
/// 2. RFC 3339 (`2023-01-01T00:00:00Z`, with offset)
/// 3. naive datetime (`2023-01-01T00:00:00`), read as UTC
/// 4. `2023-01-01`, midnight UTC
/// 5. `01/15/2023` (US order), midnight UTC
///
/// Anything else is `None`: an unreadable date makes the record
/// undated, never invalid.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return if n.is_finite() { from_serial(n) } else { None };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Convert a spreadsheet serial day count to a UTC instant.
///
/// Fractional days carry the time of day; the result is rounded to
/// whole seconds. Out-of-range serials yield `None`.
pub fn from_serial(serial: f64) -> Option<DateTime<Utc>> {
    let seconds = (serial - SERIAL_EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY;
    if !seconds.is_finite() {
        return None;
    }

    Utc.timestamp_opt(seconds.round() as i64, 0).single()
}
