//! Market fetcher response shapes and outcome

use crate::error::Error;
use crate::types::MarketSnapshot;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Body of the `/search` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching coins, best match first
    #[serde(default)]
    pub coins: Vec<CoinEntry>,
}

/// One coin of a search result
#[derive(Debug, Clone, Deserialize)]
pub struct CoinEntry {
    /// Id used by the price endpoint
    pub id: String,
    /// Ticker symbol
    #[serde(default)]
    pub symbol: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl CoinEntry {
    /// Symbol equal (upper-cased) or name containing the hint (lower-cased)
    pub fn matches(&self, symbol: &str, name_hint: &str) -> bool {
        self.symbol.to_uppercase() == symbol.to_uppercase()
            || (!name_hint.is_empty()
                && self
                    .name
                    .to_lowercase()
                    .contains(&name_hint.to_lowercase()))
    }
}

/// Body of the `/simple/price` endpoint, keyed by coin id
pub type PriceResponse = HashMap<String, HashMap<String, Value>>;

/// Result of a market lookup
#[derive(Debug)]
pub enum MarketOutcome {
    /// Price data was found
    Found(MarketSnapshot),
    /// The asset is not listed or has no price data
    NotAvailable(MarketSnapshot),
    /// The lookup failed; the snapshot carries the error message
    Failed {
        /// Zeroed snapshot with `source: Error`
        snapshot: MarketSnapshot,
        /// What went wrong
        error: Error,
    },
}

impl MarketOutcome {
    /// Snapshot to write, whatever the outcome
    pub fn snapshot(&self) -> &MarketSnapshot {
        match self {
            Self::Found(snapshot) | Self::NotAvailable(snapshot) => snapshot,
            Self::Failed { snapshot, .. } => snapshot,
        }
    }

    /// Take the snapshot out of the outcome
    pub fn into_snapshot(self) -> MarketSnapshot {
        match self {
            Self::Found(snapshot) | Self::NotAvailable(snapshot) => snapshot,
            Self::Failed { snapshot, .. } => snapshot,
        }
    }

    /// Whether price data was found
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Lookup error, if it failed
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
