//! Cell and row model shared by the filter, the normalizer and the store.
//!
//! Cells serialize as the bare JSON scalars the Sheets values API uses, so a
//! row travels as `["abc", 42, true, null]` in both directions.

use serde::{Deserialize, Serialize};

/// Leading character that tells the spreadsheet to keep a value as text.
pub const TEXT_MARKER: char = '\'';

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

/// One spreadsheet row. Trailing absent cells are simply missing.
pub type Row = Vec<Cell>;

impl Cell {
    /// True for null cells and empty strings.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Build a row of text cells from string slices.
#[cfg(test)]
pub(crate) fn text_row(values: &[&str]) -> Row {
    values.iter().map(|v| Cell::from(*v)).collect()
}
