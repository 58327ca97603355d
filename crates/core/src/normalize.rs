//! Post-filter cell normalization.
//!
//! Exactly one [`NormalizeStrategy`] is active per deployment. Strategies
//! are not meant to compose.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Row, TEXT_MARKER};
use crate::error::CoreError;

static ALL_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// How cells are rewritten between filter and write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizeStrategy {
    /// Write values exactly as read.
    #[default]
    Passthrough,
    /// Prefix numbers and all-digit strings with the text marker so the
    /// store keeps leading zeros and long IDs as text.
    ForceText,
    /// Remove a leading text marker from string cells.
    StripMarker,
}

impl NormalizeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::ForceText => "force-text",
            Self::StripMarker => "strip-marker",
        }
    }

    /// Apply the strategy to a single cell.
    pub fn apply_cell(&self, cell: Cell) -> Cell {
        match self {
            Self::Passthrough => cell,
            Self::ForceText => force_text(cell),
            Self::StripMarker => strip_marker(cell),
        }
    }

    /// Apply the strategy to every cell of every row.
    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        if *self == Self::Passthrough {
            return rows;
        }
        rows.into_iter()
            .map(|row| row.into_iter().map(|c| self.apply_cell(c)).collect())
            .collect()
    }
}

impl std::fmt::Display for NormalizeStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NormalizeStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "none" => Ok(Self::Passthrough),
            "force-text" | "force_text" => Ok(Self::ForceText),
            "strip-marker" | "strip_marker" => Ok(Self::StripMarker),
            other => Err(CoreError::Config(format!(
                "Unknown normalize strategy '{other}' (expected passthrough, force-text or strip-marker)"
            ))),
        }
    }
}

fn force_text(cell: Cell) -> Cell {
    match cell {
        Cell::Number(n) => Cell::Text(format!("{TEXT_MARKER}{n}")),
        Cell::Text(s) if ALL_DIGITS_RE.is_match(&s) => Cell::Text(format!("{TEXT_MARKER}{s}")),
        other => other,
    }
}

fn strip_marker(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) => match s.strip_prefix(TEXT_MARKER) {
            Some(rest) => Cell::Text(rest.to_string()),
            None => Cell::Text(s),
        },
        other => other,
    }
}
