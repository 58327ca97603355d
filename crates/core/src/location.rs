//! Sheet addressing and the read/write modes of the values API.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A sheet inside a spreadsheet file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    pub sheet: String,
}

impl SheetRef {
    pub fn new(spreadsheet_id: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            sheet: sheet.into(),
        }
    }

    /// A1 notation for `cells` on this sheet, e.g. `Orders!A2:Z`.
    ///
    /// Sheet names containing anything but ASCII letters, digits and `_`
    /// are single-quoted, with embedded quotes doubled.
    pub fn a1(&self, cells: &str) -> String {
        format!("{}!{cells}", quote_sheet_name(&self.sheet))
    }

    /// Key identifying this sheet across requests (`{file}!{sheet}`).
    pub fn key(&self) -> String {
        format!("{}!{}", self.spreadsheet_id, self.sheet)
    }
}

impl std::fmt::Display for SheetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.spreadsheet_id, self.sheet)
    }
}

fn quote_sheet_name(name: &str) -> String {
    let plain = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let quoted = name.len() >= 2 && name.starts_with('\'') && name.ends_with('\'');
    if plain || quoted {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

/// How the store renders values on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRenderMode {
    /// Display strings, as the sheet shows them.
    #[default]
    Formatted,
    /// Underlying stored values (numbers stay numbers).
    Unformatted,
}

impl ValueRenderMode {
    /// Wire name used by the values API.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Formatted => "FORMATTED_VALUE",
            Self::Unformatted => "UNFORMATTED_VALUE",
        }
    }
}

impl std::str::FromStr for ValueRenderMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "formatted" | "formatted_value" => Ok(Self::Formatted),
            "unformatted" | "unformatted_value" | "raw" => Ok(Self::Unformatted),
            other => Err(CoreError::Config(format!(
                "Unknown value render mode '{other}' (expected formatted or unformatted)"
            ))),
        }
    }
}

/// How the store interprets values on write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueInputMode {
    /// Store values exactly as sent.
    #[default]
    Raw,
    /// Parse values as if typed into the UI (numbers, dates, `'` text marker).
    UserEntered,
}

impl ValueInputMode {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

impl std::str::FromStr for ValueInputMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "user_entered" | "user-entered" => Ok(Self::UserEntered),
            other => Err(CoreError::Config(format!(
                "Unknown value input mode '{other}' (expected raw or user_entered)"
            ))),
        }
    }
}
