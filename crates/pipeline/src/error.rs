use rangesync_core::error::CoreError;
use rangesync_core::store::StoreError;

/// Errors from a pipeline run, tagged with the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request itself is unusable (blank fields, bad dates).
    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Reading source range failed: {0}")]
    Fetch(#[source] StoreError),

    #[error("Clearing destination range failed: {0}")]
    Clear(#[source] StoreError),

    /// The destination was already cleared when this happened.
    #[error("Writing destination range failed: {0}")]
    Write(#[source] StoreError),

    /// The replace task was cancelled by runtime shutdown.
    #[error("Replacing destination range was interrupted: {0}")]
    Interrupted(String),
}

impl PipelineError {
    /// The underlying store error, for the store-side stages.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Invalid(_) | Self::Interrupted(_) => None,
            Self::Fetch(e) | Self::Clear(e) | Self::Write(e) => Some(e),
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "validate",
            Self::Fetch(_) => "fetch",
            Self::Clear(_) => "clear",
            Self::Write(_) => "write",
            Self::Interrupted(_) => "replace",
        }
    }
}
