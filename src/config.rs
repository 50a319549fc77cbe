//! Run configuration
//!
//! Everything the fetchers need is carried in an `AppConfig` that is passed to
//! each operation. Defaults describe the CBPAY asset on the XDB Chain ledger
//! explorer and CoinGecko; any field can be overridden from a YAML file.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{AssetFilter, BackoffType, SortOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest page size the ledger explorer accepts
pub const MAX_PAGE_LIMIT: u32 = 200;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration for a snapshot run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ledger explorer and tracked asset
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Holders walk
    #[serde(default)]
    pub holders: HoldersConfig,

    /// Large transactions walk
    #[serde(default)]
    pub transactions: TransactionsConfig,

    /// Price API
    #[serde(default)]
    pub market: MarketConfig,

    /// Order book report
    #[serde(default)]
    pub report: ReportConfig,

    /// Output files
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl AppConfig {
    /// Load config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check values the fetchers rely on
    pub fn validate(&self) -> Result<()> {
        if self.ledger.base_url.trim().is_empty() {
            return Err(Error::invalid_value("ledger.base_url", "must not be empty"));
        }
        if self.ledger.asset.code.is_empty() || self.ledger.asset.issuer.is_empty() {
            return Err(Error::invalid_value(
                "ledger.asset",
                "code and issuer are required",
            ));
        }
        if self.ledger.page_limit == 0 || self.ledger.page_limit > MAX_PAGE_LIMIT {
            return Err(Error::invalid_value(
                "ledger.page_limit",
                format!("must be between 1 and {MAX_PAGE_LIMIT}"),
            ));
        }
        if !self.transactions.threshold.is_finite() || self.transactions.threshold < 0.0 {
            return Err(Error::invalid_value(
                "transactions.threshold",
                "must be a non-negative number",
            ));
        }
        if self.transactions.top_n == 0 {
            return Err(Error::invalid_value("transactions.top_n", "must be at least 1"));
        }
        let limits = [
            ("holders.max_pages", self.holders.max_pages),
            ("transactions.max_pages", self.transactions.max_pages),
            ("transactions.max_items", self.transactions.max_items),
        ];
        if let Some((field, _)) = limits.iter().find(|(_, limit)| *limit == Some(0)) {
            return Err(Error::invalid_value(
                *field,
                "must be at least 1, or null for no limit",
            ));
        }
        if self.market.base_url.trim().is_empty() {
            return Err(Error::invalid_value("market.base_url", "must not be empty"));
        }
        if !self.report.conversion_rate.is_finite() || self.report.conversion_rate <= 0.0 {
            return Err(Error::invalid_value(
                "report.conversion_rate",
                "must be a positive number",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Ledger Config
// ============================================================================

/// Ledger explorer endpoint and the tracked asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base URL of the explorer (without `/accounts`)
    #[serde(default = "default_ledger_url")]
    pub base_url: String,

    /// Tracked asset
    #[serde(default = "default_asset")]
    pub asset: AssetFilter,

    /// Records requested per page
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: default_ledger_url(),
            asset: default_asset(),
            page_limit: default_page_limit(),
        }
    }
}

fn default_ledger_url() -> String {
    "https://horizon.livenet.xdbchain.com".to_string()
}

fn default_asset() -> AssetFilter {
    AssetFilter::new(
        "CBPAY",
        "GD7PT6VAXH227WBYR5KN3OYKGSNXVETMYZUP3R62DFX3BBC7GGOBDFJ2",
    )
}

fn default_page_limit() -> u32 {
    MAX_PAGE_LIMIT
}

/// Holders walk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldersConfig {
    /// Page order requested from the explorer
    pub order: SortOrder,
    /// Stop after this many pages (None = walk everything)
    pub max_pages: Option<usize>,
    /// Leave out accounts whose balance is exactly zero
    pub skip_zero_balances: bool,
}

impl Default for HoldersConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::Asc,
            max_pages: None,
            skip_zero_balances: false,
        }
    }
}

/// Large transactions walk settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionsConfig {
    /// Page order requested from the explorer
    pub order: SortOrder,
    /// Minimum amount of a large transaction (inclusive)
    pub threshold: f64,
    /// Transactions kept after sorting
    pub top_n: usize,
    /// Pages scanned (None = walk everything)
    pub max_pages: Option<usize>,
    /// Stop once this many large transactions were found
    pub max_items: Option<usize>,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            order: SortOrder::Desc,
            threshold: 100_000.0,
            top_n: 10,
            max_pages: Some(1),
            max_items: None,
        }
    }
}

// ============================================================================
// Market Config
// ============================================================================

/// Price API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Base URL (without `/search`)
    pub base_url: String,
    /// API key sent in `api_key_header`
    pub api_key: Option<String>,
    /// Header carrying the API key
    pub api_key_header: String,
    /// Free-text query for the search endpoint
    pub search_query: String,
    /// Symbol to match (case-insensitive)
    pub symbol: String,
    /// Lower-case fragment of the coin name that also counts as a match
    pub name_hint: String,
    /// Quote currency
    pub vs_currency: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: None,
            api_key_header: "x-cg-demo-api-key".to_string(),
            search_query: "coinbarpay".to_string(),
            symbol: "CBPAY".to_string(),
            name_hint: "coinbar".to_string(),
            vs_currency: "usd".to_string(),
        }
    }
}

// ============================================================================
// Report Config
// ============================================================================

/// Order book report settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Markdown page holding the bid/ask tables
    pub input: Option<PathBuf>,
    /// Fixed quote-to-USDT conversion rate
    pub conversion_rate: f64,
    /// Where the rate comes from, shown in the page
    pub rate_source: String,
    /// Trading pair shown in the page
    pub pair: String,
    /// Client-side reload interval
    pub refresh_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: None,
            conversion_rate: 0.000_691_3,
            rate_source: "CoinMarketCap".to_string(),
            pair: "CBPAY/XDB".to_string(),
            refresh_ms: 10_000,
        }
    }
}

// ============================================================================
// Output Config
// ============================================================================

/// Output file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory all files are written to
    pub dir: PathBuf,
    /// Holders JSON file name
    pub holders_file: String,
    /// Market snapshot JSON file name
    pub market_file: String,
    /// Large transactions JSON file name
    pub transactions_file: String,
    /// Order book HTML file name
    pub order_book_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            holders_file: "cbpay_holders.json".to_string(),
            market_file: "cbpay_market_data.json".to_string(),
            transactions_file: "cbpay_large_transactions.json".to_string(),
            order_book_file: "order_book_with_usdt.html".to_string(),
        }
    }
}

impl OutputConfig {
    /// Holders JSON path
    pub fn holders_path(&self) -> PathBuf {
        self.dir.join(&self.holders_file)
    }

    /// Market snapshot JSON path
    pub fn market_path(&self) -> PathBuf {
        self.dir.join(&self.market_file)
    }

    /// Large transactions JSON path
    pub fn transactions_path(&self) -> PathBuf {
        self.dir.join(&self.transactions_file)
    }

    /// Order book HTML path
    pub fn order_book_path(&self) -> PathBuf {
        self.dir.join(&self.order_book_file)
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Fixed delay between requests in milliseconds (0 = no throttling)
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Retries per request (0 = a failure ends the walk)
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff type
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            page_delay_ms: default_page_delay(),
            max_retries: 0,
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_ms(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_page_delay() -> u64 {
    250
}

fn default_initial_ms() -> u64 {
    100
}

impl HttpConfig {
    /// Build the client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_secs(60),
            );

        builder = if self.page_delay_ms == 0 {
            builder.no_rate_limit()
        } else {
            builder.rate_limit(RateLimiterConfig::fixed_delay(Duration::from_millis(
                self.page_delay_ms,
            )))
        };

        builder.build()
    }
}
