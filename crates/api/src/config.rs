use rangesync_core::filter::DEFAULT_DATE_COLUMN;
use rangesync_pipeline::options::{DEFAULT_ANCHOR_CELL, DEFAULT_CLEAR_RANGE};
use rangesync_pipeline::PipelineOptions;
use rangesync_sheets::api::DEFAULT_BASE_URL;

/// Server configuration loaded from environment variables.
///
/// All fields except the service-account key have defaults suitable for
/// local development. The key is only needed once the first import runs,
/// so the server starts without it.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Service-account key JSON for the Sheets API.
    pub service_account_key: Option<String>,
    /// Sheets API root (default: the public Google endpoint).
    pub sheets_api_base_url: String,
    /// Normalization, render/input modes and destination layout.
    pub pipeline: PipelineOptions,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                             |
    /// |-------------------------------|-------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                           |
    /// | `PORT`                        | `3000`                              |
    /// | `CORS_ORIGINS`                | (none)                              |
    /// | `GOOGLE_SERVICE_ACCOUNT_KEY`  | (none)                              |
    /// | `SHEETS_API_BASE_URL`         | `https://sheets.googleapis.com/v4`  |
    /// | `NORMALIZE_STRATEGY`          | `passthrough`                       |
    /// | `VALUE_RENDER_MODE`           | `formatted`                         |
    /// | `WRITE_INPUT_MODE`            | `raw`                               |
    /// | `DATE_COLUMN_INDEX`           | `8`                                 |
    /// | `DEST_CLEAR_RANGE`            | `A2:Z`                              |
    /// | `DEST_ANCHOR_CELL`            | `A2`                                |
    ///
    /// # Panics
    ///
    /// Panics if a numeric or enumerated variable has an invalid value.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host = get("HOST", "0.0.0.0");

        let port: u16 = get("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = get("CORS_ORIGINS", "")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let service_account_key = var("GOOGLE_SERVICE_ACCOUNT_KEY").filter(|k| !k.trim().is_empty());

        let sheets_api_base_url = get("SHEETS_API_BASE_URL", DEFAULT_BASE_URL);

        let pipeline = PipelineOptions {
            normalize: get("NORMALIZE_STRATEGY", "passthrough")
                .parse()
                .unwrap_or_else(|e| panic!("NORMALIZE_STRATEGY: {e}")),
            render: get("VALUE_RENDER_MODE", "formatted")
                .parse()
                .unwrap_or_else(|e| panic!("VALUE_RENDER_MODE: {e}")),
            write_input: get("WRITE_INPUT_MODE", "raw")
                .parse()
                .unwrap_or_else(|e| panic!("WRITE_INPUT_MODE: {e}")),
            date_column: get("DATE_COLUMN_INDEX", &DEFAULT_DATE_COLUMN.to_string())
                .parse()
                .expect("DATE_COLUMN_INDEX must be a valid usize"),
            clear_range: get("DEST_CLEAR_RANGE", DEFAULT_CLEAR_RANGE),
            anchor_cell: get("DEST_ANCHOR_CELL", DEFAULT_ANCHOR_CELL),
        };

        Self {
            host,
            port,
            cors_origins,
            service_account_key,
            sheets_api_base_url,
            pipeline,
        }
    }
}

// Hand-written so the service-account key never reaches logs.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field(
                "service_account_key",
                &self.service_account_key.as_ref().map(|_| "<redacted>"),
            )
            .field("sheets_api_base_url", &self.sheets_api_base_url)
            .field("pipeline", &self.pipeline)
            .finish()
    }
}
