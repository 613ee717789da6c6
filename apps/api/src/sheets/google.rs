//! Google Sheets v4 REST backend for [`SheetSource`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::sheets::{SheetError, SheetSource};
use crate::table::Grid;

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct GoogleSheetsSource {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GoogleSheetsSource {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, SHEETS_API_URL.to_string())
    }

    /// Base-url override for tests and self-hosted proxies.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: String) -> Result<T, SheetError> {
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::FORBIDDEN {
            return Err(SheetError::NotFound(
                "spreadsheet does not exist or is not shared with the service".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SheetError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SheetError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsSource {
    async fn sheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>, SheetError> {
        let url = format!(
            "{}/{}?fields=sheets.properties.title",
            self.base_url, spreadsheet_id
        );
        let meta: SpreadsheetMeta = self.get_json(url).await?;
        let titles: Vec<String> = meta.sheets.into_iter().map(|s| s.properties.title).collect();
        debug!(spreadsheet_id, sheets = titles.len(), "listed sheet titles");
        Ok(titles)
    }

    async fn grid(&self, spreadsheet_id: &str, sheet_title: &str) -> Result<Grid, SheetError> {
        let url = format!(
            "{}/{}/values/{}",
            self.base_url,
            spreadsheet_id,
            urlencode(sheet_title)
        );
        let range: ValueRange = self.get_json(url).await?;
        debug!(
            spreadsheet_id,
            sheet_title,
            rows = range.values.len(),
            "fetched grid"
        );
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }
}

/// The API returns cells as JSON values; numbers and booleans are carried as
/// their plain text form, like a raw export would.
fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Sheet titles go into the URL path; escape everything outside the
/// unreserved set.
fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
