// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::unused_async)]

//! # ledger-snapshot
//!
//! Snapshots of a single ledger asset: who holds it, what it trades at and
//! which transfers were largest, written as flat JSON files, plus a static
//! HTML order book report.
//!
//! ## Features
//!
//! - **Paginated aggregation**: one cursor-following fetch / extract / sort
//!   loop shared by every ledger query
//! - **Typed outcomes**: complete, partial and failed walks are distinct
//! - **Throttled HTTP**: fixed delay between pages, optional retries
//! - **Market lookup**: symbol search then price query, absence kept apart
//!   from failure
//! - **Order book report**: markdown tables to a priced HTML page
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ledger_snapshot::{config::AppConfig, http::HttpClient, ledger::fetch_holders};
//!
//! #[tokio::main]
//! async fn main() -> ledger_snapshot::Result<()> {
//!     let config = AppConfig::default();
//!     let client = HttpClient::with_config(config.http.client_config())?;
//!
//!     let holders = fetch_holders(&client, &config.ledger, &config.holders).await;
//!     for holder in holders.items().iter().take(5) {
//!         println!("{}: {}", holder.address, holder.balance);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        CLI / Runner                          │
//! │   holders     market     transactions     report    config   │
//! └──────────────────────────────────────────────────────────────┘
//!          │            │            │              │
//! ┌────────┴─────┬──────┴─────┬──────┴───────┬──────┴──────────┐
//! │    Ledger    │   Market   │  Aggregator  │     Report      │
//! ├──────────────┼────────────┼──────────────┼─────────────────┤
//! │ Holders      │ Search     │ Fetch loop   │ Markdown parser │
//! │ Large txs    │ Price      │ Paginators   │ HTML template   │
//! └──────────────┴────────────┴──────────────┴─────────────────┘
//!          │            │            │              │
//! ┌────────┴────────────┴────────────┴──────────────┴──────────┐
//! │        HTTP (throttle, retry)        │   Output (JSON/HTML) │
//! └──────────────────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with throttling and retry
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Paginated fetch / extract loop
pub mod aggregator;

/// Holder and transaction queries against the ledger explorer
pub mod ledger;

/// Market snapshot lookup
pub mod market;

/// Order book report
pub mod report;

/// JSON and HTML file output
pub mod output;

/// Application configuration
pub mod config;

/// Template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use aggregator::{Aggregate, Aggregator};
pub use config::AppConfig;
pub use market::MarketOutcome;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
