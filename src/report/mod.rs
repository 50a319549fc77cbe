//! Order book report
//!
//! Parses the bid/ask tables of an order book markdown page, prices every
//! level in USDT at a fixed conversion rate and renders a standalone HTML
//! page.
//!
//! When no input page is configured the bundled sample is used.

mod parser;
mod render;
mod types;

pub use parser::{parse_number, parse_order_book, split_row, ASKS_HEADING, BIDS_HEADING};
pub use render::{format_cell, render_html, render_table, PAGE_TEMPLATE, TIMESTAMP_FORMAT};
pub use types::{round_to, OrderBook, OrderBookLevel};

use crate::config::ReportConfig;
use crate::error::{Error, Result, ResultExt};
use chrono::{DateTime, Local};
use tracing::info;

/// Order book page shipped with the binary
pub const SAMPLE_ORDER_BOOK: &str = include_str!("../../assets/sample_order_book.md");

/// A parsed book and its rendered page
#[derive(Debug, Clone)]
pub struct Report {
    /// Parsed levels
    pub book: OrderBook,
    /// Rendered page
    pub html: String,
}

/// Read the configured input page, or fall back to the bundled sample
pub fn load_markdown(config: &ReportConfig) -> Result<String> {
    match &config.input {
        Some(path) => {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            info!("Reading order book from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))
        }
        None => {
            info!("No order book input configured, using the bundled sample");
            Ok(SAMPLE_ORDER_BOOK.to_string())
        }
    }
}

/// Parse `markdown` and render the report page
pub fn build_report(
    markdown: &str,
    config: &ReportConfig,
    generated_at: &DateTime<Local>,
) -> Result<Report> {
    let book = parse_order_book(markdown, config.conversion_rate)?;
    let html = render_html(&book, config, generated_at)?;
    Ok(Report { book, html })
}

#[cfg(test)]
mod tests;
