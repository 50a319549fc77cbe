//! Order book markdown parser
//!
//! Reads the `### Bids` and `### Asks` sections of an order book page.
//! Each section holds a markdown table of price, amount, cumulative amount
//! and a value column that is ignored.

use super::types::{OrderBook, OrderBookLevel};
use crate::error::{Error, Result};
use tracing::debug;

/// Heading prefix of the bid section
pub const BIDS_HEADING: &str = "### Bids";

/// Heading prefix of the ask section
pub const ASKS_HEADING: &str = "### Asks";

/// Parse both sides of the book, pricing each level with `rate`
pub fn parse_order_book(markdown: &str, rate: f64) -> Result<OrderBook> {
    let bids = parse_section(markdown, BIDS_HEADING, rate)?;
    let asks = parse_section(markdown, ASKS_HEADING, rate)?;
    debug!("Parsed order book: {} bids, {} asks", bids.len(), asks.len());
    Ok(OrderBook { bids, asks })
}

fn parse_section(markdown: &str, heading: &str, rate: f64) -> Result<Vec<OrderBookLevel>> {
    let mut lines = markdown
        .lines()
        .skip_while(|line| !line.trim_start().starts_with(heading));

    if lines.next().is_none() {
        return Err(Error::order_book(format!("missing section '{heading}'")));
    }

    // Header row and anything else before the separator is skipped
    let mut lines = lines.take_while(|line| !line.trim_start().starts_with("### "));
    if !lines.by_ref().any(is_separator_row) {
        return Err(Error::order_book(format!("no table under '{heading}'")));
    }

    let levels = lines
        .take_while(|line| line.trim_start().starts_with('|'))
        .map(|line| {
            let cells = split_row(line);
            let cell = |i: usize| cells.get(i).and_then(|c| parse_number(c));
            OrderBookLevel::new(cell(0), cell(1), cell(2), rate)
        })
        .collect();

    Ok(levels)
}

/// Split a markdown table row into trimmed cells
pub fn split_row(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    if !line.starts_with('|') {
        return false;
    }
    split_row(line).iter().all(|cell| {
        let dashes = cell.trim_matches(':');
        dashes.len() >= 3 && dashes.chars().all(|c| c == '-')
    })
}

/// Parse a cell as a finite number; anything else is treated as missing
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
