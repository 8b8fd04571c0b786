//! Timestamp parsing and iCalendar UTC formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// `YYYYMMDDTHHMMSSZ`, the UTC form used for DTSTART, DTEND and DTSTAMP.
pub const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];

pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(ICS_UTC_FORMAT).to_string()
}

/// Parse a loosely formatted timestamp.
///
/// Offsets in the input (RFC 3339, trailing `Z`) are honoured. Naive values are
/// read as wall-clock time in `tz`. Returns `None` for blank or unparseable
/// input, and for local times that do not exist in `tz`.
pub fn parse_timestamp(input: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(utc) = input.strip_suffix('Z') {
        if let Some(naive) = NAIVE_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(utc, fmt).ok())
        {
            return Some(naive.and_utc());
        }
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .or_else(|| fuzzydate::parse(input).ok())?;

    localize(naive, tz)
}

/// True for a bare `YYYY-MM-DD`, which names a whole day rather than an instant.
pub fn is_date_only(input: &str) -> bool {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok()
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
