use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SheetsConfig {
    #[serde(rename = "sheet_id")]
    pub sheet_id: String,
    #[serde(rename = "worksheet_name", default)]
    pub worksheet_name: Option<String>,
    #[serde(rename = "service_account_json")]
    pub service_account_json: String,
    #[serde(rename = "sheets_base_url", default = "default_sheets_base_url")]
    pub base_url: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    #[serde(default = "default_deals_path")]
    pub deals_path: String,

    #[serde(flatten)]
    pub sheets: SheetsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::prefixed("DEALPOST_").from_env::<AppConfig>()?)
    }
}

fn default_deals_path() -> String {
    "deals.json".to_string()
}

fn default_sheets_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}
