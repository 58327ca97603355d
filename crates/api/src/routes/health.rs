use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Plaintext body served at `GET /`.
pub const ROOT_MESSAGE: &str = "GHN Importer Enterprise API is running.";

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether a service-account key is configured.
    pub credential_configured: bool,
    /// Active normalization strategy.
    pub normalize: &'static str,
}

/// GET / -- static liveness message.
async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /health -- service health and import settings.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let credential_configured =
        state.config.service_account_key.is_some() || state.pipeline.initialized();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        credential_configured,
        normalize: state.config.pipeline.normalize.as_str(),
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}
