pub mod health;
pub mod import;

use axum::Router;

use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// GET  /              plaintext liveness message
/// GET  /health        JSON health status
/// POST /import-data   date-filtered range import
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(import::router())
}
