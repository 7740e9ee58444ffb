use chrono::Utc;
use std::collections::HashSet;

use crate::deals::Deal;
use crate::post::build_post;
use crate::sheets::{SheetsError, Worksheet};

/// Ledger column layout. Column E carries the deal link and is the
/// deduplication key; ASIN and Gepostet? stay empty for later manual
/// enrichment.
pub const HEADER: [&str; 8] = [
    "Datum",
    "Produktname",
    "Rabatt",
    "Preis",
    "Link",
    "WhatsApp-Text",
    "ASIN",
    "Gepostet?",
];

/// Rewrite row 1 to the fixed header if it differs. A correct header
/// causes no write.
pub async fn ensure_header(ws: &Worksheet) -> Result<(), SheetsError> {
    let header: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
    let rows = ws.read_range("1:1").await?;
    let first_row = rows.into_iter().next().unwrap_or_default();

    if first_row != header {
        log::info!("rewriting header row");
        ws.update_range("A1:H1", vec![header]).await?;
    }
    Ok(())
}

/// The set of links already recorded in the ledger, trimmed, with the
/// header row and empty cells dropped.
pub async fn existing_links(ws: &Worksheet) -> Result<HashSet<String>, SheetsError> {
    let rows = ws.read_range("E:E").await?;
    Ok(rows
        .into_iter()
        .skip(1)
        .filter_map(|row| row.into_iter().next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect())
}

/// Append every deal whose link is not yet in the ledger, one batch write,
/// all rows stamped with the same `now`. Returns the number of rows written.
pub async fn append_deals(
    ws: &Worksheet,
    deals: &[Deal],
    now: &str,
) -> Result<usize, SheetsError> {
    let existing = existing_links(ws).await?;

    let mut rows = Vec::new();
    for deal in deals {
        let link = deal.link.trim();
        if link.is_empty() {
            log::warn!("skipping deal '{}': no link", deal.title.trim());
            continue;
        }
        if existing.contains(link) {
            log::debug!("skipping deal '{}': link already in sheet", deal.title.trim());
            continue;
        }

        rows.push(vec![
            now.to_string(),
            deal.title.trim().to_string(),
            deal.discount.trim().to_string(),
            deal.price.trim().to_string(),
            link.to_string(),
            build_post(deal),
            String::new(),
            String::new(),
        ]);
    }

    if rows.is_empty() {
        return Ok(0);
    }

    let count = rows.len();
    ws.append_rows(rows).await?;
    Ok(count)
}

/// Batch timestamp: current time in Europe/Berlin, minute precision.
pub fn berlin_timestamp() -> String {
    Utc::now()
        .with_timezone(&chrono_tz::Europe::Berlin)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
