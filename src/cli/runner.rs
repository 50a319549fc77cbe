//! CLI runner - executes commands
//!
//! Each fetch task stands alone: a failed fetch is logged and still
//! produces its output file. Only configuration and write errors end the
//! run with an error.

use crate::aggregator::Aggregate;
use crate::cli::commands::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::ledger::{fetch_holders, fetch_large_transactions};
use crate::market::{fetch_market_snapshot, MarketOutcome};
use crate::output::{write_html, write_json};
use crate::report::{build_report, load_markdown};
use crate::types::{Holder, MarketSnapshot, MarketSource, OptionStringExt, Transaction};
use chrono::Local;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Number of holders listed in the summary
const SUMMARY_TOP_HOLDERS: usize = 5;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match self.cli.command() {
            Commands::Config => {
                print!("{}", config.to_yaml()?);
                Ok(())
            }
            Commands::Report { .. } => write_report(&config).map(|_| ()),
            command => {
                let client = HttpClient::with_config(config.http.client_config())?;
                match command {
                    Commands::Holders => run_holders(&client, &config).await.map(|_| ()),
                    Commands::Market => run_market(&client, &config).await.map(|_| ()),
                    Commands::Transactions => {
                        run_transactions(&client, &config).await.map(|_| ())
                    }
                    _ => {
                        let summary = run_all(&client, &config).await?;
                        summary.log();
                        Ok(())
                    }
                }
            }
        }
    }

    /// Load the config file (or defaults) and apply command-line overrides
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                info!("Loading config from {}", path.display());
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.cli.output_dir {
            config.output.dir.clone_from(dir);
        }
        if let Some(key) = self.cli.api_key.clone().none_if_empty() {
            config.market.api_key = Some(key);
        }
        if let Some(threshold) = self.cli.threshold {
            config.transactions.threshold = threshold;
        }
        if let Some(top) = self.cli.top {
            config.transactions.top_n = top;
        }
        if let Some(Commands::Report { input, rate }) = &self.cli.command {
            if input.is_some() {
                config.report.input.clone_from(input);
            }
            if let Some(rate) = rate {
                config.report.conversion_rate = *rate;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// Everything one full run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Code of the tracked asset, used as the balance unit
    pub asset_code: String,
    /// Holders, largest balance first
    pub holders: Vec<Holder>,
    /// Market snapshot as written
    pub market: MarketSnapshot,
    /// Largest recent transactions
    pub transactions: Vec<Transaction>,
    /// Report path, when the report could be rendered
    pub report: Option<PathBuf>,
}

impl RunSummary {
    /// Log the end-of-run summary
    pub fn log(&self) {
        info!("=== Summary ===");
        info!("Total holders: {}", self.holders.len());
        if self.market.source != MarketSource::Error {
            info!("Current price: ${:.8} USD", self.market.price_usd);
            info!("Market cap: ${:.2} USD", self.market.market_cap_usd);
            info!("24h volume: ${:.2} USD", self.market.volume_24h_usd);
            info!("24h change: {:.2}%", self.market.price_change_24h);
        }
        info!("Recent large transactions: {}", self.transactions.len());

        if !self.holders.is_empty() {
            info!("Top {} holders:", SUMMARY_TOP_HOLDERS);
            for (i, holder) in self.holders.iter().take(SUMMARY_TOP_HOLDERS).enumerate() {
                info!(
                    "  {}. {}: {} {}",
                    i + 1,
                    holder.address,
                    format_amount(holder.balance),
                    self.asset_code
                );
            }
        }
    }
}

/// Run every task, then write all outputs
///
/// All fetches run before anything is written, and every output is
/// attempted even when an earlier one fails to write. The first write
/// error is returned once the run is over.
pub async fn run_all(client: &HttpClient, config: &AppConfig) -> Result<RunSummary> {
    info!("1. Collecting holders");
    let holders = collect_holders(client, config).await;

    info!("2. Collecting market data");
    let market = collect_market(client, config).await;

    info!("3. Collecting large transactions");
    let transactions = collect_transactions(client, config).await;

    let mut first_error = None;
    let mut keep_first = |result: Result<()>| {
        if let Err(e) = result {
            error!("{e}");
            first_error.get_or_insert(e);
        }
    };
    keep_first(save_holders(config, &holders));
    keep_first(save_market(config, &market));
    keep_first(save_transactions(config, &transactions));

    info!("4. Rendering order book report");
    let report = match write_report(config) {
        Ok(path) => Some(path),
        Err(e) => {
            error!("Order book report skipped: {e}");
            None
        }
    };

    match first_error {
        Some(e) => Err(e),
        None => Ok(RunSummary {
            asset_code: config.ledger.asset.code.clone(),
            holders,
            market,
            transactions,
            report,
        }),
    }
}

/// Fetch holders and write them out
pub async fn run_holders(client: &HttpClient, config: &AppConfig) -> Result<Vec<Holder>> {
    let holders = collect_holders(client, config).await;
    save_holders(config, &holders)?;
    Ok(holders)
}

/// Fetch the market snapshot and write it out
pub async fn run_market(client: &HttpClient, config: &AppConfig) -> Result<MarketSnapshot> {
    let market = collect_market(client, config).await;
    save_market(config, &market)?;
    Ok(market)
}

/// Fetch large transactions and write them out
pub async fn run_transactions(client: &HttpClient, config: &AppConfig) -> Result<Vec<Transaction>> {
    let transactions = collect_transactions(client, config).await;
    save_transactions(config, &transactions)?;
    Ok(transactions)
}

async fn collect_holders(client: &HttpClient, config: &AppConfig) -> Vec<Holder> {
    let outcome = fetch_holders(client, &config.ledger, &config.holders).await;
    log_outcome("holders", &outcome);
    outcome.into_items()
}

async fn collect_market(client: &HttpClient, config: &AppConfig) -> MarketSnapshot {
    let outcome = fetch_market_snapshot(client, &config.market).await;
    if let MarketOutcome::Failed { error, .. } = &outcome {
        warn!("Market snapshot recorded as an error: {error}");
    }
    outcome.into_snapshot()
}

async fn collect_transactions(client: &HttpClient, config: &AppConfig) -> Vec<Transaction> {
    let outcome = fetch_large_transactions(client, &config.ledger, &config.transactions).await;
    log_outcome("large transactions", &outcome);
    outcome.into_items()
}

fn save_holders(config: &AppConfig, holders: &[Holder]) -> Result<()> {
    let path = config.output.holders_path();
    write_json(&path, holders)?;
    info!("Holders saved to {}", path.display());
    Ok(())
}

fn save_market(config: &AppConfig, market: &MarketSnapshot) -> Result<()> {
    let path = config.output.market_path();
    write_json(&path, market)?;
    info!("Market data saved to {}", path.display());
    Ok(())
}

fn save_transactions(config: &AppConfig, transactions: &[Transaction]) -> Result<()> {
    let path = config.output.transactions_path();
    write_json(&path, transactions)?;
    info!("Large transactions saved to {}", path.display());
    Ok(())
}

/// Render the order book report and write it out
pub fn write_report(config: &AppConfig) -> Result<PathBuf> {
    let markdown = load_markdown(&config.report)?;
    let report = build_report(&markdown, &config.report, &Local::now())?;

    let path = config.output.order_book_path();
    write_html(&path, &report.html)?;
    info!(
        "Order book report saved to {} ({} bids, {} asks)",
        path.display(),
        report.book.bids.len(),
        report.book.asks.len()
    );
    Ok(path)
}

/// Two decimals with comma-grouped thousands (`1,234,567.89`)
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

fn log_outcome<T>(name: &str, outcome: &Aggregate<T>) {
    match outcome {
        Aggregate::Complete { items, .. } => info!("Found {} {name}", items.len()),
        Aggregate::Partial { items, error, .. } => {
            warn!("Kept {} {name} after a failed page: {error}", items.len());
        }
        Aggregate::Failed { error, .. } => error!("Fetching {name} failed: {error}"),
    }
}
