//! Request and result types of a single range import.

use serde::{Deserialize, Serialize};

use crate::dates::DateBound;
use crate::error::CoreError;
use crate::location::SheetRef;

/// Message returned when rows were written.
pub const MSG_IMPORTED: &str = "Import thành công";

/// Message returned when no row matched the date bound.
pub const MSG_NO_MATCH: &str = "Không tìm thấy dòng phù hợp";

/// Body of `POST /import-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub source_file_id: String,
    pub source_sheet: String,
    /// Cell range on the source sheet, e.g. `A1:Z`.
    pub source_range: String,
    pub dest_file_id: String,
    pub dest_sheet: String,
    pub start_date: String,
    pub end_date: String,
}

impl ImportRequest {
    pub fn source(&self) -> SheetRef {
        SheetRef::new(&self.source_file_id, &self.source_sheet)
    }

    pub fn destination(&self) -> SheetRef {
        SheetRef::new(&self.dest_file_id, &self.dest_sheet)
    }

    /// Parse the inclusive date bound.
    pub fn bound(&self) -> Result<DateBound, CoreError> {
        DateBound::parse(&self.start_date, &self.end_date)
    }

    /// Reject requests with blank addressing fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("sourceFileId", &self.source_file_id),
            ("sourceSheet", &self.source_sheet),
            ("sourceRange", &self.source_range),
            ("destFileId", &self.dest_file_id),
            ("destSheet", &self.dest_sheet),
        ];
        match fields.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(CoreError::Validation(format!("{name} must not be empty"))),
            None => Ok(()),
        }
    }
}

/// Response body of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub message: String,
    pub imported: usize,
}

impl ImportResult {
    pub fn imported(count: usize) -> Self {
        Self {
            message: MSG_IMPORTED.to_string(),
            imported: count,
        }
    }

    pub fn no_match() -> Self {
        Self {
            message: MSG_NO_MATCH.to_string(),
            imported: 0,
        }
    }
}
