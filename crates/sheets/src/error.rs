use rangesync_core::store::StoreError;

/// Errors from the Sheets client layer.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The service-account key is missing, not JSON, or lacks fields.
    #[error("Invalid service account key: {0}")]
    Credential(String),

    /// Signing the token assertion failed.
    #[error("Failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// A URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(String),

    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Google returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible.
        body: serde_json::Value,
    },
}

impl From<SheetsError> for StoreError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::Credential(_) | SheetsError::Jwt(_) => {
                StoreError::Credential(err.to_string())
            }
            SheetsError::Url(_) | SheetsError::Request(_) => StoreError::Transport(err.to_string()),
            SheetsError::ApiError { status, body } => StoreError::Api {
                status,
                payload: body,
            },
        }
    }
}
