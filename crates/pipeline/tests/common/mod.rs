#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rangesync_core::cell::{Cell, Row, TEXT_MARKER};
use rangesync_core::import::ImportRequest;
use rangesync_core::location::{SheetRef, ValueInputMode, ValueRenderMode};
use rangesync_core::store::{StoreError, ValueStore};

/// A store call, as recorded by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Read { key: String, cells: String, render: ValueRenderMode },
    Clear { key: String, cells: String },
    Write { key: String, cells: String, rows: Vec<Row>, input: ValueInputMode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Clear,
    Write,
}

/// In-memory sheets with a call log.
///
/// Reads return the whole sheet regardless of the requested cells. Clears
/// drop every row from the range's start row down. `USER_ENTERED` writes
/// honour the leading text marker the way the real store does.
#[derive(Default)]
pub struct MemoryStore {
    sheets: Mutex<HashMap<String, Vec<Row>>>,
    calls: Mutex<Vec<Call>>,
    fail_on: Mutex<Option<Stage>>,
    clear_delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause inside every clear, to widen the clear/write window.
    pub fn with_clear_delay(delay: Duration) -> Self {
        Self {
            clear_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn put(&self, sheet: &SheetRef, rows: Vec<Row>) {
        self.sheets.lock().unwrap().insert(sheet.key(), rows);
    }

    pub fn rows(&self, sheet: &SheetRef) -> Vec<Row> {
        self.sheets
            .lock()
            .unwrap()
            .get(&sheet.key())
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_on(&self, stage: Stage) {
        *self.fail_on.lock().unwrap() = Some(stage);
    }

    fn check(&self, stage: Stage) -> Result<(), StoreError> {
        if *self.fail_on.lock().unwrap() == Some(stage) {
            return Err(StoreError::Api {
                status: 403,
                payload: serde_json::json!({
                    "error": {
                        "code": 403,
                        "message": "The caller does not have permission",
                        "status": "PERMISSION_DENIED"
                    }
                }),
            });
        }
        Ok(())
    }
}

/// One-based start row of an A1 range such as `A2:Z` (defaults to 1).
fn start_row(cells: &str) -> usize {
    let start = cells.split(':').next().unwrap_or_default();
    start
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .unwrap_or(1)
}

fn user_entered(cell: Cell) -> Cell {
    match cell {
        Cell::Text(s) if s.starts_with(TEXT_MARKER) => Cell::Text(s[1..].to_string()),
        other => other,
    }
}

#[async_trait]
impl ValueStore for MemoryStore {
    async fn read_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        render: ValueRenderMode,
    ) -> Result<Vec<Row>, StoreError> {
        self.calls.lock().unwrap().push(Call::Read {
            key: sheet.key(),
            cells: cells.to_string(),
            render,
        });
        self.check(Stage::Read)?;
        Ok(self.rows(sheet))
    }

    async fn clear_range(&self, sheet: &SheetRef, cells: &str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(Call::Clear {
            key: sheet.key(),
            cells: cells.to_string(),
        });
        if let Some(delay) = self.clear_delay {
            tokio::time::sleep(delay).await;
        }
        self.check(Stage::Clear)?;

        let keep = start_row(cells) - 1;
        let mut sheets = self.sheets.lock().unwrap();
        if let Some(rows) = sheets.get_mut(&sheet.key()) {
            rows.truncate(keep);
        }
        Ok(())
    }

    async fn write_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        rows: &[Row],
        input: ValueInputMode,
    ) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(Call::Write {
            key: sheet.key(),
            cells: cells.to_string(),
            rows: rows.to_vec(),
            input,
        });
        self.check(Stage::Write)?;

        let offset = start_row(cells) - 1;
        let mut sheets = self.sheets.lock().unwrap();
        let target = sheets.entry(sheet.key()).or_default();
        if target.len() < offset + rows.len() {
            target.resize(offset + rows.len(), Vec::new());
        }
        for (i, row) in rows.iter().enumerate() {
            target[offset + i] = match input {
                ValueInputMode::Raw => row.clone(),
                ValueInputMode::UserEntered => row.iter().cloned().map(user_entered).collect(),
            };
        }
        Ok(())
    }
}

/// Build a row of text cells from string slices.
pub fn text_row(values: &[&str]) -> Row {
    values.iter().map(|v| Cell::from(*v)).collect()
}

pub fn source() -> SheetRef {
    SheetRef::new("src-file", "Raw")
}

pub fn destination() -> SheetRef {
    SheetRef::new("dst-file", "Import")
}

/// A source row with `date` in column I.
pub fn order_row(id: &str, code: &str, date: &str) -> Row {
    text_row(&[id, code, "Nguyen Van A", "0901234567", "HCM", "", "", "", date, "done"])
}

pub fn header_row() -> Row {
    text_row(&["Mã", "Code", "Tên", "SĐT", "Tỉnh", "", "", "", "Ngày", "Trạng thái"])
}

pub fn request(start: &str, end: &str) -> ImportRequest {
    ImportRequest {
        source_file_id: "src-file".into(),
        source_sheet: "Raw".into(),
        source_range: "A1:Z".into(),
        dest_file_id: "dst-file".into(),
        dest_sheet: "Import".into(),
        start_date: start.into(),
        end_date: end.into(),
    }
}
