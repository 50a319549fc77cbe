//! Common types used throughout ledger-snapshot
//!
//! This module contains the snapshot records written to disk plus the
//! small shared enums used by the HTTP and pagination layers.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Asset
// ============================================================================

/// The tracked asset, identified by code and issuing account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFilter {
    /// Asset code (e.g. "CBPAY")
    pub code: String,
    /// Issuer account id
    pub issuer: String,
}

impl AssetFilter {
    /// Create a new asset filter
    pub fn new(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    /// Check whether a code/issuer pair refers to this asset
    pub fn matches(&self, code: Option<&str>, issuer: Option<&str>) -> bool {
        code == Some(self.code.as_str()) && issuer == Some(self.issuer.as_str())
    }
}

/// Canonical `CODE:ISSUER` form used by the accounts endpoint
impl fmt::Display for AssetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.issuer)
    }
}

// ============================================================================
// Snapshot Records
// ============================================================================

/// An account holding a balance of the tracked asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holder {
    /// Account id
    pub address: String,
    /// Balance of the tracked asset
    pub balance: f64,
}

/// A payment at or above the large-transaction threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transferred amount
    pub amount: f64,
    /// Sending account
    pub from: Option<String>,
    /// Receiving account
    pub to: Option<String>,
    /// ISO-8601 creation time as reported by the ledger
    pub date: Option<String>,
    /// Hash of the enclosing transaction
    pub transaction_hash: Option<String>,
}

/// Where a market snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSource {
    /// Price data resolved from CoinGecko
    CoinGecko,
    /// The asset is not listed, or has no price data
    #[serde(rename = "Not Available")]
    NotAvailable,
    /// The lookup failed
    Error,
}

impl fmt::Display for MarketSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CoinGecko => "CoinGecko",
            Self::NotAvailable => "Not Available",
            Self::Error => "Error",
        };
        f.write_str(s)
    }
}

/// Point-in-time price, volume and market cap of the tracked asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Price in USD
    pub price_usd: f64,
    /// Market capitalisation in USD
    pub market_cap_usd: f64,
    /// Trading volume over the last 24 hours in USD
    pub volume_24h_usd: f64,
    /// Price change over the last 24 hours, in percent
    pub price_change_24h: f64,
    /// Local time the snapshot was taken
    pub last_updated: DateTime<Local>,
    /// Where the numbers came from
    pub source: MarketSource,
    /// Why no data is available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Failure message when the lookup errored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MarketSnapshot {
    /// Snapshot with all numeric fields zeroed
    fn zeroed(source: MarketSource) -> Self {
        Self {
            price_usd: 0.0,
            market_cap_usd: 0.0,
            volume_24h_usd: 0.0,
            price_change_24h: 0.0,
            last_updated: Local::now(),
            source,
            note: None,
            error: None,
        }
    }

    /// Sentinel for an asset without price data
    pub fn not_available(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::zeroed(MarketSource::NotAvailable)
        }
    }

    /// Sentinel for a failed lookup
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::zeroed(MarketSource::Error)
        }
    }
}

// ============================================================================
// Sort Order
// ============================================================================

/// Record ordering requested from the ledger API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl SortOrder {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.trim().is_empty())
    }
}
