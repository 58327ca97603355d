//! Lenient calendar-date parsing for spreadsheet cells and request bounds.
//!
//! Spreadsheet cells rendered with `FORMATTED_STRING` arrive as display text
//! whose shape depends on the sheet locale and number format, so parsing
//! tries a fixed list of formats in order. Time of day and offsets are
//! discarded: every comparison is between calendar dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::CoreError;

/// Date-time shapes, tried after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only shapes.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// Parse a textual date or date-time into its calendar date.
///
/// Returns `None` for blank input or any shape not listed above.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Inclusive calendar-date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBound {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateBound {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse both ends of a bound from caller-supplied strings.
    ///
    /// A bound whose start lies after its end is accepted; it simply
    /// contains no dates.
    pub fn parse(start: &str, end: &str) -> Result<Self, CoreError> {
        let start = parse_date(start)
            .ok_or_else(|| CoreError::Validation(format!("Invalid startDate: '{start}'")))?;
        let end = parse_date(end)
            .ok_or_else(|| CoreError::Validation(format!("Invalid endDate: '{end}'")))?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
