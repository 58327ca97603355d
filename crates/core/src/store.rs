//! The tabular store contract used by the import pipeline.
//!
//! The production implementation talks to the Google Sheets values API;
//! tests substitute in-memory stores.

use async_trait::async_trait;

use crate::cell::Row;
use crate::location::{SheetRef, ValueInputMode, ValueRenderMode};

/// Errors surfaced by a [`ValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store credential is missing or malformed.
    #[error("Store credential error: {0}")]
    Credential(String),

    /// The request never produced a usable response (network, TLS, decode).
    #[error("Store transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Store API error ({status}): {payload}")]
    Api {
        status: u16,
        /// Response body, parsed as JSON when possible, otherwise a string.
        payload: serde_json::Value,
    },
}

impl StoreError {
    /// Diagnostic payload handed back to callers unmodified.
    pub fn details(&self) -> serde_json::Value {
        match self {
            Self::Api { payload, .. } => payload.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

/// Range-level access to a spreadsheet store.
#[async_trait]
pub trait ValueStore: Send + Sync {
    /// Read the rectangular block `cells` of `sheet` as rows.
    async fn read_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        render: ValueRenderMode,
    ) -> Result<Vec<Row>, StoreError>;

    /// Clear every value in `cells` of `sheet`, keeping formatting.
    async fn clear_range(&self, sheet: &SheetRef, cells: &str) -> Result<(), StoreError>;

    /// Write `rows` starting at the top-left cell of `cells`.
    async fn write_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        rows: &[Row],
        input: ValueInputMode,
    ) -> Result<(), StoreError>;
}
