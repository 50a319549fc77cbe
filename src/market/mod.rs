//! Market snapshot fetcher
//!
//! Resolves the tracked symbol to a coin id through the search endpoint,
//! then reads price, market cap, volume and 24h change for that id.
//! Absence and failure are reported as distinct outcomes; neither is
//! propagated as an error.

mod types;

pub use types::{CoinEntry, MarketOutcome, PriceResponse, SearchResponse};

use crate::config::MarketConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{MarketSnapshot, MarketSource};
use chrono::Local;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Fetch the current market snapshot of the configured symbol
pub async fn fetch_market_snapshot(client: &HttpClient, config: &MarketConfig) -> MarketOutcome {
    match lookup(client, config).await {
        Ok(Some(snapshot)) => {
            info!(
                "Market data for {}: price {} {}",
                config.symbol, snapshot.price_usd, config.vs_currency
            );
            MarketOutcome::Found(snapshot)
        }
        Ok(None) => not_available(config),
        // A non-success status means the API has nothing for us
        Err(Error::HttpStatus { status, .. }) => {
            debug!("Market API answered {status}");
            not_available(config)
        }
        Err(Error::RateLimited { .. }) => {
            debug!("Market API answered 429");
            not_available(config)
        }
        Err(error) => {
            warn!("Market lookup for {} failed: {error}", config.symbol);
            MarketOutcome::Failed {
                snapshot: MarketSnapshot::failed(error.to_string()),
                error,
            }
        }
    }
}

fn not_available(config: &MarketConfig) -> MarketOutcome {
    info!("{} not found on the market API, using defaults", config.symbol);
    MarketOutcome::NotAvailable(MarketSnapshot::not_available(format!(
        "{} data not available on CoinGecko",
        config.symbol
    )))
}

async fn lookup(client: &HttpClient, config: &MarketConfig) -> Result<Option<MarketSnapshot>> {
    let base = config.base_url.trim_end_matches('/');

    let search: SearchResponse = client
        .get_json_with_config(
            &format!("{base}/search"),
            request(config).query("query", config.search_query.as_str()),
        )
        .await?;
    debug!("Search returned {} coins", search.coins.len());

    let Some(coin) = search
        .coins
        .iter()
        .find(|c| c.matches(&config.symbol, &config.name_hint))
    else {
        return Ok(None);
    };
    info!("Found {} with id {}", config.symbol, coin.id);

    let prices: PriceResponse = client
        .get_json_with_config(
            &format!("{base}/simple/price"),
            request(config)
                .query("ids", coin.id.as_str())
                .query("vs_currencies", config.vs_currency.as_str())
                .query("include_market_cap", "true")
                .query("include_24hr_vol", "true")
                .query("include_24hr_change", "true"),
        )
        .await?;

    Ok(prices
        .get(&coin.id)
        .map(|fields| snapshot_from_prices(fields, &config.vs_currency)))
}

fn request(config: &MarketConfig) -> RequestConfig {
    let mut request = RequestConfig::new();
    if let Some(key) = &config.api_key {
        request = request.header(config.api_key_header.as_str(), key.as_str());
    }
    request
}

/// Build a snapshot from one coin's price fields; missing numbers are 0
pub fn snapshot_from_prices(fields: &HashMap<String, Value>, currency: &str) -> MarketSnapshot {
    let number = |suffix: &str| {
        fields
            .get(&format!("{currency}{suffix}"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };

    MarketSnapshot {
        price_usd: number(""),
        market_cap_usd: number("_market_cap"),
        volume_24h_usd: number("_24h_vol"),
        price_change_24h: number("_24h_change"),
        last_updated: Local::now(),
        source: MarketSource::CoinGecko,
        note: None,
        error: None,
    }
}

#[cfg(test)]
mod tests;
