//! Handler for the date-filtered range import.

use axum::extract::State;
use axum::Json;
use rangesync_core::import::{ImportRequest, ImportResult};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /import-data
///
/// Copy the rows of `sourceSheet!sourceRange` whose date column lies in
/// `[startDate, endDate]` into `destSheet`, replacing its previous content.
/// Responds `{ message, imported }`; `imported` is 0 when nothing matched,
/// in which case the destination is left untouched.
pub async fn import_data(
    State(state): State<AppState>,
    Json(request): Json<ImportRequest>,
) -> AppResult<Json<ImportResult>> {
    // Bad input is a 400 even when the store is not configured.
    request.validate()?;
    request.bound()?;

    tracing::info!(
        source = %request.source(),
        source_range = %request.source_range,
        destination = %request.destination(),
        start_date = %request.start_date,
        end_date = %request.end_date,
        "Import requested"
    );

    let pipeline = state.pipeline().await?;
    let result = pipeline.run(&request).await?;

    Ok(Json(result))
}
