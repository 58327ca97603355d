//! The range import pipeline.
//!
//! One run reads the source range, keeps rows whose date column falls in
//! the requested bound, applies the configured [`NormalizeStrategy`], then
//! replaces the destination: clear the wide destination range, write the
//! rows at the anchor cell. No retries. A failure after the clear leaves
//! the destination empty.
//!
//! The clear and write run on their own task. Dropping the caller's future
//! (client disconnect, shutdown of the connection) does not stop a replace
//! that has started.
//!
//! [`NormalizeStrategy`]: rangesync_core::normalize::NormalizeStrategy

use std::sync::Arc;

use rangesync_core::cell::Row;
use rangesync_core::filter::filter_rows;
use rangesync_core::import::{ImportRequest, ImportResult};
use rangesync_core::location::SheetRef;
use rangesync_core::store::ValueStore;

use crate::error::PipelineError;
use crate::locks::DestinationLocks;
use crate::options::PipelineOptions;

/// Date-filtered range copy between two sheets.
pub struct RangeSyncPipeline {
    store: Arc<dyn ValueStore>,
    options: PipelineOptions,
    locks: DestinationLocks,
}

impl RangeSyncPipeline {
    pub fn new(store: Arc<dyn ValueStore>, options: PipelineOptions) -> Self {
        Self {
            store,
            options,
            locks: DestinationLocks::new(),
        }
    }

    /// Run one import.
    ///
    /// Returns `imported: 0` without touching the destination when no row
    /// matches.
    pub async fn run(&self, request: &ImportRequest) -> Result<ImportResult, PipelineError> {
        request.validate()?;
        let bound = request.bound()?;
        let source = request.source();
        let destination = request.destination();

        let rows = self
            .store
            .read_range(&source, &request.source_range, self.options.render)
            .await
            .map_err(PipelineError::Fetch)?;

        let report = filter_rows(rows, self.options.date_column, &bound);
        if !report.unparseable_rows.is_empty() {
            tracing::debug!(
                source = %source,
                rows = ?report.unparseable_rows,
                "Skipped rows with unparseable dates"
            );
        }
        tracing::info!(
            source = %source,
            start = %bound.start,
            end = %bound.end,
            scanned = report.scanned,
            kept = report.kept(),
            missing_date = report.missing_date,
            unparseable_date = report.unparseable_rows.len(),
            out_of_range = report.out_of_range,
            "Filtered source rows"
        );

        if report.rows.is_empty() {
            return Ok(ImportResult::no_match());
        }

        let rows = self.options.normalize.apply(report.rows);
        let count = rows.len();
        self.replace(destination.clone(), rows).await?;

        tracing::info!(
            destination = %destination,
            imported = count,
            normalize = %self.options.normalize,
            "Import complete"
        );
        Ok(ImportResult::imported(count))
    }

    /// Clear the destination range, then write `rows` at the anchor cell,
    /// holding the destination's lock across both calls.
    async fn replace(&self, destination: SheetRef, rows: Vec<Row>) -> Result<(), PipelineError> {
        let guard = self.locks.acquire(&destination.key()).await;
        let store = Arc::clone(&self.store);
        let clear_range = self.options.clear_range.clone();
        let anchor_cell = self.options.anchor_cell.clone();
        let input = self.options.input_mode();

        let task = tokio::spawn(async move {
            let _guard = guard;

            store
                .clear_range(&destination, &clear_range)
                .await
                .map_err(PipelineError::Clear)?;

            store
                .write_range(&destination, &anchor_cell, &rows, input)
                .await
                .map_err(|e| {
                    tracing::error!(
                        destination = %destination,
                        error = %e,
                        "Write failed after clear; destination range is empty"
                    );
                    PipelineError::Write(e)
                })
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(PipelineError::Interrupted(e.to_string())),
        }
    }
}
