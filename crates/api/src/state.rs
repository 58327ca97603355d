use std::sync::Arc;

use rangesync_core::store::ValueStore;
use rangesync_pipeline::RangeSyncPipeline;
use rangesync_sheets::SheetsApi;
use tokio::sync::OnceCell;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Import pipeline, built on first use from the service-account key.
    pub pipeline: Arc<OnceCell<Arc<RangeSyncPipeline>>>,
}

impl AppState {
    /// State whose Sheets client is created lazily by the first import.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(OnceCell::new()),
        }
    }

    /// The shared pipeline, initialising the Sheets client exactly once.
    ///
    /// A missing or malformed key fails the request and leaves the cell
    /// empty, so a later request tries again.
    pub async fn pipeline(&self) -> AppResult<Arc<RangeSyncPipeline>> {
        let pipeline = self
            .pipeline
            .get_or_try_init(|| async {
                let key = self.config.service_account_key.as_deref().ok_or_else(|| {
                    AppError::Credential("GOOGLE_SERVICE_ACCOUNT_KEY is not set".into())
                })?;

                let api = SheetsApi::from_service_account_json(key, &self.config.sheets_api_base_url)
                    .map_err(|e| AppError::Credential(e.to_string()))?;
                tracing::info!(
                    client_email = %api.client_email(),
                    normalize = %self.config.pipeline.normalize,
                    "Sheets client initialised"
                );

                let store: Arc<dyn ValueStore> = Arc::new(api);
                Ok::<_, AppError>(Arc::new(RangeSyncPipeline::new(
                    store,
                    self.config.pipeline.clone(),
                )))
            })
            .await?;

        Ok(Arc::clone(pipeline))
    }
}
