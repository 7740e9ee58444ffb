pub mod auth;

use anyhow::Context;
use auth::ServiceAccountKey;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::SheetsConfig;

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("Sheets API error (status {status}): {body}")]
    ApiStatus { status: u16, body: String },
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),
    #[error("Spreadsheet has no worksheets")]
    NoWorksheets,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// An authenticated handle to one worksheet of one spreadsheet.
#[derive(Debug, Clone)]
pub struct Worksheet {
    spreadsheet_id: String,
    title: String,
    base_url: String,
    client: Client,
}

#[derive(Deserialize, Debug)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize, Debug)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize, Debug)]
struct SheetProperties {
    title: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl Worksheet {
    /// Authenticate with the configured service-account key and resolve the
    /// target worksheet: by name when one is configured, otherwise the first
    /// sheet of the spreadsheet.
    pub async fn connect(config: &SheetsConfig) -> Result<Self, SheetsError> {
        let key: ServiceAccountKey = serde_json::from_str(&config.service_account_json)
            .context("Parsing service account JSON")?;
        let token = auth::fetch_access_token(&key).await?;

        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Invalid access token for Authorization header")?;
        headers.insert(AUTHORIZATION, auth_value);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build Sheets HTTP client")?;

        let wanted = config
            .worksheet_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let titles = fetch_sheet_titles(&client, &config.base_url, &config.sheet_id).await?;
        let title = match wanted {
            Some(name) => titles
                .into_iter()
                .find(|t| t.as_str() == name)
                .ok_or_else(|| SheetsError::WorksheetNotFound(name.to_string()))?,
            None => titles.into_iter().next().ok_or(SheetsError::NoWorksheets)?,
        };
        log::info!("connected to worksheet '{}'", title);

        Ok(Self {
            spreadsheet_id: config.sheet_id.clone(),
            title,
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Read a cell range of the worksheet. An empty range yields an empty
    /// grid rather than an error.
    pub async fn read_range(&self, cells: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(&self.range(cells), &[])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Sheets values request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::ApiStatus { status, body });
        }

        let body = response.text().await.context("Sheets values body")?;
        let range: ValueRange = serde_json::from_str(&body).context("Sheets values JSON")?;
        Ok(range.values)
    }

    /// Overwrite a cell range with the given rows, written as RAW values.
    pub async fn update_range(
        &self,
        cells: &str,
        values: Vec<Vec<String>>,
    ) -> Result<(), SheetsError> {
        let url = self.values_url(&self.range(cells), &[("valueInputOption", "RAW")])?;
        let response = self
            .client
            .put(url)
            .json(&ValueRange { values })
            .send()
            .await
            .context("Sheets update request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::ApiStatus { status, body });
        }
        Ok(())
    }

    /// Append rows after the worksheet's current data, as one batch write.
    pub async fn append_rows(&self, values: Vec<Vec<String>>) -> Result<(), SheetsError> {
        let range = format!("{}:append", self.quoted_title());
        let url = self.values_url(&range, &[("valueInputOption", "RAW")])?;
        let response = self
            .client
            .post(url)
            .json(&ValueRange { values })
            .send()
            .await
            .context("Sheets append request failed")?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::ApiStatus { status, body });
        }
        Ok(())
    }

    /// A1 notation scoped to this worksheet, e.g. `'Deals'!A1:H1`.
    fn range(&self, cells: &str) -> String {
        format!("{}!{}", self.quoted_title(), cells)
    }

    fn quoted_title(&self) -> String {
        format!("'{}'", self.title.replace('\'', "''"))
    }

    fn values_url(&self, range: &str, query: &[(&str, &str)]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.base_url).context("Invalid Sheets base URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Sheets base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}

async fn fetch_sheet_titles(
    client: &Client,
    base_url: &str,
    spreadsheet_id: &str,
) -> Result<Vec<String>, SheetsError> {
    let mut url = Url::parse(base_url).context("Invalid Sheets base URL")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Sheets base URL cannot be a base"))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id]);
    url.query_pairs_mut()
        .append_pair("fields", "sheets.properties");

    let response = client
        .get(url)
        .send()
        .await
        .context("Spreadsheet metadata request failed")?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(SheetsError::ApiStatus { status, body });
    }

    let body = response.text().await.context("Spreadsheet metadata body")?;
    let meta: SpreadsheetMeta = serde_json::from_str(&body).context("Spreadsheet metadata JSON")?;
    Ok(meta
        .sheets
        .into_iter()
        .map(|sheet| sheet.properties.title)
        .collect())
}
