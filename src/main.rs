use anyhow::Context;
use dealpost::config::AppConfig;
use dealpost::deals::load_deals;
use dealpost::sheets::Worksheet;
use dealpost::sync;
use env_logger::Env;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse the specified (or default) .env file
    let dotenv_path = env::var("DEALPOST_DOTENV_PATH").unwrap_or_else(|_| ".env".to_string());
    let dotenv_result = dotenvy::from_path(&dotenv_path);
    match dotenv_result {
        Ok(()) => log::info!("Loaded env from {}", dotenv_path),
        Err(err) => log::debug!("No .env loaded from {}: {}", dotenv_path, err),
    }

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("Reading configuration")?;
    let deals = load_deals(&config.deals_path)?;

    let worksheet = Worksheet::connect(&config.sheets).await?;
    sync::ensure_header(&worksheet).await?;
    let written = sync::append_deals(&worksheet, &deals, &sync::berlin_timestamp()).await?;

    if written > 0 {
        println!("✅ {} neue Deals ins Sheet geschrieben.", written);
    } else {
        println!("ℹ️ Keine neuen Deals (oder alles Duplikate).");
    }
    Ok(())
}
