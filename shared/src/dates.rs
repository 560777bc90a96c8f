//! Date normalization and relative-time labels
//!
//! The backend is inconsistent about dates: `yyyy-MM-dd` for records,
//! `dd-MM-yyyy` for goal deadlines and birth dates, ISO datetimes for advice
//! timestamps. Everything is normalized to a [`NaiveDate`] before it is
//! compared; raw strings are never compared directly.

use crate::errors::ParseError;
use chrono::NaiveDate;
use std::fmt;

/// Shown wherever a date could not be understood
pub const DATE_PLACEHOLDER: &str = "—";

const ISO_DASHES: [usize; 2] = [4, 7];
const DAY_FIRST_DASHES: [usize; 2] = [2, 5];

/// A record carrying a wire date
pub trait Dated {
    /// The date exactly as received
    fn raw_date(&self) -> &str;

    /// Normalized calendar date, `None` when unparsable
    fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(self.raw_date()).ok()
    }
}

fn has_shape(s: &str, dashes: [usize; 2]) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| {
            if dashes.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Parse any of the accepted encodings into a calendar date
///
/// Accepted: `yyyy-MM-dd`, `yyyy-MM-ddTHH:mm:ss...` (time ignored) and
/// `dd-MM-yyyy`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let (candidate, format) = if has_shape(trimmed, ISO_DASHES) {
        (trimmed, "%Y-%m-%d")
    } else if has_shape(trimmed, DAY_FIRST_DASHES) {
        (trimmed, "%d-%m-%Y")
    } else {
        match (trimmed.get(..10), trimmed.as_bytes().get(10)) {
            (Some(date_part), Some(b'T')) if has_shape(date_part, ISO_DASHES) => {
                (date_part, "%Y-%m-%d")
            }
            _ => return Err(ParseError::UnrecognizedFormat(trimmed.to_string())),
        }
    };

    NaiveDate::parse_from_str(candidate, format)
        .map_err(|_| ParseError::OutOfRange(trimmed.to_string()))
}

/// `yyyy-MM-dd`, as used in request paths
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `dd-MM-yyyy`, as the backend expects for deadlines and birth dates
pub fn to_backend_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// `yyyy-MM-dd` → `dd-MM-yyyy` by swapping the dash-separated parts
///
/// Input that is not exactly three parts is returned unchanged. The parts
/// are not checked against the calendar.
pub fn format_date_for_display(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}-{}-{}", day, month, year),
        _ => raw.to_string(),
    }
}

/// `HH:mm:ss` → `HH:mm`
pub fn format_time_for_display(raw: &str) -> &str {
    raw.get(..5).unwrap_or(raw)
}

// ============================================================================
// Relative time
// ============================================================================

/// Coarse elapsed time since a date
///
/// Months are 30-day blocks, not calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAgo {
    Today,
    Days(i64),
    Weeks(i64),
    Months(i64),
}

impl fmt::Display for TimeAgo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n, unit) = match *self {
            TimeAgo::Today => return write!(f, "Today"),
            TimeAgo::Days(n) => (n, "day"),
            TimeAgo::Weeks(n) => (n, "week"),
            TimeAgo::Months(n) => (n, "month"),
        };
        if n == 1 {
            write!(f, "1 {} ago", unit)
        } else {
            write!(f, "{} {}s ago", n, unit)
        }
    }
}

/// Elapsed time between `date` and `today`
///
/// Future dates count as today.
pub fn time_ago(date: NaiveDate, today: NaiveDate) -> TimeAgo {
    let days = today.signed_duration_since(date).num_days();
    if days <= 0 {
        TimeAgo::Today
    } else if days < 7 {
        TimeAgo::Days(days)
    } else if days < 35 {
        TimeAgo::Weeks(days / 7)
    } else {
        TimeAgo::Months(days / 30)
    }
}

/// Label for a raw wire date, or [`DATE_PLACEHOLDER`] when it cannot be parsed
pub fn time_ago_label(raw: &str, today: NaiveDate) -> String {
    match parse_date(raw) {
        Ok(date) => time_ago(date, today).to_string(),
        Err(_) => DATE_PLACEHOLDER.to_string(),
    }
}
