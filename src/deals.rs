use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum DealsError {
    #[error("Deals file not found: {0}")]
    MissingFile(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A single curated deal. All fields are free text; absent fields
/// deserialize to empty strings.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Deal {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub old_price: String,
    #[serde(default)]
    pub discount: String,
    #[serde(default)]
    pub link: String,
}

/// Load the ordered deal list from a JSON file.
pub fn load_deals(path: &str) -> Result<Vec<Deal>, DealsError> {
    let file = Path::new(path);
    if !file.exists() {
        return Err(DealsError::MissingFile(path.to_string()));
    }

    let raw = fs::read_to_string(file).with_context(|| format!("Reading deals file {}", path))?;
    let deals: Vec<Deal> =
        serde_json::from_str(&raw).with_context(|| format!("Parsing deals file {}", path))?;
    log::info!("loaded {} deals from {}", deals.len(), path);
    Ok(deals)
}
