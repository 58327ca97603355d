#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::OnceCell;
use tower::ServiceExt;

use rangesync_api::config::ServerConfig;
use rangesync_api::router::build_app_router;
use rangesync_api::state::AppState;
use rangesync_core::cell::{Cell, Row};
use rangesync_core::location::{SheetRef, ValueInputMode, ValueRenderMode};
use rangesync_core::normalize::NormalizeStrategy;
use rangesync_core::store::{StoreError, ValueStore};
use rangesync_pipeline::{PipelineOptions, RangeSyncPipeline};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin. No service-account key is
/// configured.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        service_account_key: None,
        sheets_api_base_url: "http://127.0.0.1:9".to_string(),
        pipeline: PipelineOptions::default(),
    }
}

/// A fixed source sheet with counters for the destination calls.
#[derive(Default)]
pub struct StubStore {
    source_rows: Vec<Row>,
    fail_reads: bool,
    write_delay: Option<Duration>,
    pub clears: AtomicUsize,
    written: Mutex<Vec<(String, Vec<Row>, ValueInputMode)>>,
}

impl StubStore {
    pub fn with_rows(source_rows: Vec<Row>) -> Self {
        Self {
            source_rows,
            ..Self::default()
        }
    }

    /// Every write sleeps for `delay` before it is recorded.
    pub fn with_write_delay(source_rows: Vec<Row>, delay: Duration) -> Self {
        Self {
            source_rows,
            write_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Every read answers 403 PERMISSION_DENIED.
    pub fn forbidden() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    /// `(cells, rows, input)` of every write, in order.
    pub fn writes(&self) -> Vec<(String, Vec<Row>, ValueInputMode)> {
        self.written.lock().unwrap().clone()
    }
}

pub fn permission_denied() -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": 403,
            "message": "The caller does not have permission",
            "status": "PERMISSION_DENIED"
        }
    })
}

#[async_trait]
impl ValueStore for StubStore {
    async fn read_range(
        &self,
        _sheet: &SheetRef,
        _cells: &str,
        _render: ValueRenderMode,
    ) -> Result<Vec<Row>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Api {
                status: 403,
                payload: permission_denied(),
            });
        }
        Ok(self.source_rows.clone())
    }

    async fn clear_range(&self, _sheet: &SheetRef, _cells: &str) -> Result<(), StoreError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn write_range(
        &self,
        _sheet: &SheetRef,
        cells: &str,
        rows: &[Row],
        input: ValueInputMode,
    ) -> Result<(), StoreError> {
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        self.written
            .lock()
            .unwrap()
            .push((cells.to_string(), rows.to_vec(), input));
        Ok(())
    }
}

/// Build a row of text cells from string slices.
pub fn text_row(values: &[&str]) -> Row {
    values.iter().map(|v| Cell::from(*v)).collect()
}

/// Source sheet used by the import tests: a header plus three orders.
pub fn sample_rows() -> Vec<Row> {
    vec![
        text_row(&["Mã", "Code", "Tên", "SĐT", "Tỉnh", "", "", "", "Ngày", "Trạng thái"]),
        text_row(&["1", "5009618", "Nguyen Van A", "0901234567", "HCM", "", "", "", "2024-03-01", "done"]),
        text_row(&["2", "5009619", "Tran Thi B", "0912345678", "HN", "", "", "", "2024-03-02", "done"]),
        text_row(&["3", "5009620", "Le Van C", "0987654321", "DN", "", "", "", "2024-04-15", "done"]),
    ]
}

/// Build the full application router over `store`, using the same
/// middleware stack as production.
pub fn build_test_app(store: Arc<StubStore>) -> Router {
    build_test_app_with(store, NormalizeStrategy::Passthrough)
}

pub fn build_test_app_with(store: Arc<StubStore>, normalize: NormalizeStrategy) -> Router {
    let mut config = test_config();
    config.pipeline.normalize = normalize;
    let store: Arc<dyn ValueStore> = store;
    let pipeline = Arc::new(RangeSyncPipeline::new(store, config.pipeline.clone()));

    let state = AppState {
        config: Arc::new(config.clone()),
        pipeline: Arc::new(OnceCell::new_with(Some(pipeline))),
    };
    build_app_router(state, &config)
}

/// Router whose Sheets client has to be built from a (missing) key.
pub fn build_app_without_credentials() -> Router {
    let config = test_config();
    build_app_router(AppState::new(config.clone()), &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// A valid import body covering March 2024.
pub fn import_body() -> serde_json::Value {
    serde_json::json!({
        "sourceFileId": "src-file",
        "sourceSheet": "Raw",
        "sourceRange": "A1:Z",
        "destFileId": "dst-file",
        "destSheet": "Import",
        "startDate": "2024-03-01",
        "endDate": "2024-03-31"
    })
}
