//! REST client for the Sheets v4 `spreadsheets.values` endpoints.
//!
//! Wraps range read (`values.get`), range clear (`values.clear`) and range
//! write (`values.update`) using [`reqwest`], authenticating every call
//! with a bearer token from [`TokenProvider`].

use async_trait::async_trait;
use rangesync_core::cell::Row;
use rangesync_core::location::{SheetRef, ValueInputMode, ValueRenderMode};
use rangesync_core::store::{StoreError, ValueStore};
use serde::{Deserialize, Serialize};

use crate::auth::TokenProvider;
use crate::credentials::ServiceAccountKey;
use crate::error::SheetsError;

/// Production base URL of the Sheets API.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// A block of values as exchanged with the values endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Omitted by the API when the range holds no values.
    #[serde(default)]
    pub values: Vec<Row>,
}

/// Response of `values.update`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u64>,
    #[serde(default)]
    pub updated_cells: Option<u64>,
}

/// HTTP client for the Sheets values API.
pub struct SheetsApi {
    client: reqwest::Client,
    base_url: String,
    auth: TokenProvider,
}

impl SheetsApi {
    /// Create a client from service-account key JSON.
    ///
    /// * `base_url` - API root, e.g. [`DEFAULT_BASE_URL`].
    pub fn from_service_account_json(raw: &str, base_url: &str) -> Result<Self, SheetsError> {
        let key = ServiceAccountKey::from_json(raw)?;
        Self::new(reqwest::Client::new(), key, base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn new(
        client: reqwest::Client,
        key: ServiceAccountKey,
        base_url: &str,
    ) -> Result<Self, SheetsError> {
        let auth = TokenProvider::new(client.clone(), key)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn client_email(&self) -> &str {
        self.auth.client_email()
    }

    /// `GET /spreadsheets/{id}/values/{range}`.
    pub async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        render: ValueRenderMode,
    ) -> Result<ValueRange, SheetsError> {
        let url = values_url(&self.base_url, spreadsheet_id, range, None)?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("majorDimension", "ROWS"),
                ("valueRenderOption", render.as_api_str()),
                ("dateTimeRenderOption", "FORMATTED_STRING"),
            ])
            .send()
            .await?;

        self.parse_response(response).await
    }

    /// `POST /spreadsheets/{id}/values/{range}:clear`.
    pub async fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<(), SheetsError> {
        let url = values_url(&self.base_url, spreadsheet_id, range, Some("clear"))?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        self.check_status(response).await
    }

    /// `PUT /spreadsheets/{id}/values/{range}?valueInputOption=...`.
    pub async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Row],
        input: ValueInputMode,
    ) -> Result<UpdateValuesResponse, SheetsError> {
        let url = values_url(&self.base_url, spreadsheet_id, range, None)?;
        let token = self.auth.access_token().await?;

        let body = serde_json::json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": rows,
        });

        let response = self
            .client
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", input.as_api_str())])
            .json(&body)
            .send()
            .await?;

        self.parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning failures
    /// into [`SheetsError::ApiError`] with the body attached.
    async fn ensure_success(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                self.auth.invalidate().await;
            }
            let body = error_body(response).await;
            return Err(SheetsError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, SheetsError> {
        let response = self.ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<(), SheetsError> {
        self.ensure_success(response).await?;
        Ok(())
    }
}

/// Read an error body, preferring JSON and falling back to text.
pub(crate) async fn error_body(response: reqwest::Response) -> serde_json::Value {
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}

/// Build `{base}/spreadsheets/{id}/values/{range}[:{action}]`, percent-encoding
/// the id and range as path segments.
pub fn values_url(
    base_url: &str,
    spreadsheet_id: &str,
    range: &str,
    action: Option<&str>,
) -> Result<reqwest::Url, SheetsError> {
    let mut url =
        reqwest::Url::parse(base_url).map_err(|e| SheetsError::Url(format!("{base_url}: {e}")))?;

    let last = match action {
        Some(action) => format!("{range}:{action}"),
        None => range.to_string(),
    };

    url.path_segments_mut()
        .map_err(|()| SheetsError::Url(format!("{base_url} cannot be a base URL")))?
        .pop_if_empty()
        .extend(["spreadsheets", spreadsheet_id, "values", last.as_str()]);

    Ok(url)
}

#[async_trait]
impl ValueStore for SheetsApi {
    async fn read_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        render: ValueRenderMode,
    ) -> Result<Vec<Row>, StoreError> {
        let range = sheet.a1(cells);
        tracing::debug!(spreadsheet_id = %sheet.spreadsheet_id, %range, "Reading values");
        let block = self
            .get_values(&sheet.spreadsheet_id, &range, render)
            .await?;
        Ok(block.values)
    }

    async fn clear_range(&self, sheet: &SheetRef, cells: &str) -> Result<(), StoreError> {
        let range = sheet.a1(cells);
        tracing::debug!(spreadsheet_id = %sheet.spreadsheet_id, %range, "Clearing values");
        self.clear_values(&sheet.spreadsheet_id, &range).await?;
        Ok(())
    }

    async fn write_range(
        &self,
        sheet: &SheetRef,
        cells: &str,
        rows: &[Row],
        input: ValueInputMode,
    ) -> Result<(), StoreError> {
        let range = sheet.a1(cells);
        let updated = self
            .update_values(&sheet.spreadsheet_id, &range, rows, input)
            .await?;
        tracing::debug!(
            spreadsheet_id = %sheet.spreadsheet_id,
            %range,
            updated_rows = ?updated.updated_rows,
            updated_cells = ?updated.updated_cells,
            "Wrote values"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn builds_read_url() {
        let url = values_url(DEFAULT_BASE_URL, "abc123", "Data!A1:Z", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Data!A1:Z"
        );
    }

    #[test]
    fn builds_clear_url() {
        let url = values_url(DEFAULT_BASE_URL, "abc123", "Out!A2:Z", Some("clear")).unwrap();
        assert!(url.as_str().ends_with("/values/Out!A2:Z:clear"), "{url}");
    }

    #[test]
    fn encodes_spaces_and_slashes_in_range() {
        let url = values_url("http://127.0.0.1:9/v4/", "id", "'A/B sheet'!A2", None).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/v4/spreadsheets/id/values/'A%2FB%20sheet'!A2"
        );
    }

    #[test]
    fn rejects_unusable_base() {
        assert_matches!(
            values_url("not a url", "id", "A1", None),
            Err(SheetsError::Url(_))
        );
    }

    #[test]
    fn value_range_without_values_is_empty() {
        let block: ValueRange =
            serde_json::from_str(r#"{"range":"Data!A1:Z1000","majorDimension":"ROWS"}"#).unwrap();
        assert!(block.values.is_empty());
    }

    #[test]
    fn value_range_keeps_ragged_rows() {
        let block: ValueRange =
            serde_json::from_str(r#"{"values":[["a","b","c"],["d"]]}"#).unwrap();
        assert_eq!(block.values[0].len(), 3);
        assert_eq!(block.values[1].len(), 1);
    }
}
