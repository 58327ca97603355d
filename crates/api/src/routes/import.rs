use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Mount the import route (root-level, like the health routes).
pub fn router() -> Router<AppState> {
    Router::new().route("/import-data", post(handlers::import::import_data))
}
