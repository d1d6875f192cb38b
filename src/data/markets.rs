use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::CLIENT;
use crate::domain::MarketInfo;

/// Blocking fetch of the relay's market list. Run it off the UI thread.
pub fn fetch_markets(url: &str) -> Result<Vec<MarketInfo>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(CLIENT.markets_timeout_ms))
        .build()
        .context("Failed to build HTTP client")?;

    let markets = client
        .get(url)
        .send()
        .with_context(|| format!("Market list request to {} failed", url))?
        .error_for_status()
        .context("Market list request was rejected")?
        .json::<Vec<MarketInfo>>()
        .context("Market list is not in the expected format")?;

    log::info!("Loaded {} markets from {}", markets.len(), url);
    Ok(markets)
}
