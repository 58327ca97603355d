use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rangesync_core::error::CoreError;
use rangesync_pipeline::PipelineError;
use serde_json::{json, Value};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for request problems and [`PipelineError`] for
/// store failures. Implements [`IntoResponse`] to produce consistent JSON
/// error responses of the form `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `rangesync_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed pipeline run.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The service-account credential is missing or malformed.
    #[error("Credential error: {0}")]
    Credential(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Pipeline(PipelineError::Invalid(core)) => classify_core_error(core),
            AppError::Pipeline(err @ PipelineError::Interrupted(_)) => {
                tracing::error!(error = %err, "Import interrupted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    Value::String(err.to_string()),
                )
            }
            AppError::Pipeline(err) => {
                // Store diagnostics are passed through verbatim.
                let details = err
                    .store_error()
                    .map(|e| e.details())
                    .unwrap_or_else(|| Value::String(err.to_string()));
                tracing::error!(stage = err.stage(), error = %err, "Import failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", details)
            }

            AppError::Credential(msg) => {
                tracing::error!(error = %msg, "Service account credential error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CREDENTIAL_ERROR",
                    Value::String(msg.clone()),
                )
            }
        };

        let body = json!({
            "error": error,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, Value) {
    match err {
        CoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            Value::String(msg.clone()),
        ),
        CoreError::Config(msg) => {
            tracing::error!(error = %msg, "Configuration error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                Value::String(msg.clone()),
            )
        }
    }
}
