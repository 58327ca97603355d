//! Date-column row filter.
//!
//! A row is kept iff the cell at the date column is present, parses as a
//! date, and lies inside the [`DateBound`]. Order is preserved. Rows that
//! fail for either of the first two reasons are counted separately so the
//! caller can log them, but they are otherwise treated exactly like
//! out-of-range rows.

use chrono::NaiveDate;

use crate::cell::{Cell, Row};
use crate::dates::{parse_date, DateBound};

/// Zero-based index of the date column (column `I`).
pub const DEFAULT_DATE_COLUMN: usize = 8;

/// Classification of a row's date cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCell {
    /// The row is too short or the cell is null/empty.
    Missing,
    /// The cell holds something that is not a recognisable date.
    Unparseable,
    Date(NaiveDate),
}

/// Outcome of a filter pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Rows kept, in source order.
    pub rows: Vec<Row>,
    pub scanned: usize,
    pub missing_date: usize,
    pub out_of_range: usize,
    /// Zero-based indices (within the fetched block) of rows whose date
    /// cell could not be parsed.
    pub unparseable_rows: Vec<usize>,
}

impl FilterReport {
    pub fn kept(&self) -> usize {
        self.rows.len()
    }
}

/// Classify the date cell of `row` at `column`.
///
/// Numbers are not interpreted as spreadsheet serial dates; the store is
/// always asked to render dates as formatted strings.
pub fn row_date(row: &[Cell], column: usize) -> DateCell {
    match row.get(column) {
        None => DateCell::Missing,
        Some(cell) if cell.is_blank() => DateCell::Missing,
        Some(Cell::Text(s)) => parse_date(s).map_or(DateCell::Unparseable, DateCell::Date),
        Some(_) => DateCell::Unparseable,
    }
}

/// Keep the rows whose date column falls inside `bound`.
pub fn filter_rows(rows: Vec<Row>, column: usize, bound: &DateBound) -> FilterReport {
    let mut report = FilterReport {
        scanned: rows.len(),
        ..FilterReport::default()
    };

    for (idx, row) in rows.into_iter().enumerate() {
        match row_date(&row, column) {
            DateCell::Missing => report.missing_date += 1,
            DateCell::Unparseable => report.unparseable_rows.push(idx),
            DateCell::Date(date) if bound.contains(date) => report.rows.push(row),
            DateCell::Date(_) => report.out_of_range += 1,
        }
    }

    report
}
