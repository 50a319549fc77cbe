//! HTML rendering of the order book

use super::types::{OrderBook, OrderBookLevel};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::template::{render, TemplateContext};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Page layout with `{{ }}` placeholders
pub const PAGE_TEMPLATE: &str = include_str!("../../assets/order_book.html");

/// Timestamp shown in the status block
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Render the full report page
pub fn render_html<Tz>(
    book: &OrderBook,
    config: &ReportConfig,
    generated_at: &DateTime<Tz>,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let (base, quote) = split_pair(&config.pair);

    let ctx = TemplateContext::new()
        .with("pair", escape(&config.pair))
        .with("generated_at", generated_at.format(TIMESTAMP_FORMAT).to_string())
        .with("rate", format!("{:.7}", config.conversion_rate))
        .with("rate_source", escape(&config.rate_source))
        .with("refresh_ms", config.refresh_ms)
        .with("bids_table", render_table("Bids (Compras)", &book.bids, base, quote))
        .with("asks_table", render_table("Asks (Vendas)", &book.asks, base, quote));

    render(PAGE_TEMPLATE, &ctx)
}

/// Render one side of the book; levels without a price are skipped
pub fn render_table(title: &str, levels: &[OrderBookLevel], base: &str, quote: &str) -> String {
    let mut html = format!("<h3>{title}</h3>\n<table class=\"order-book-table\">\n");
    html.push_str("<thead>\n<tr>\n");
    for column in [
        format!("Preço ({quote})"),
        format!("Quantidade ({base})"),
        format!("Acumulado ({base})"),
        "Valor (USDT)".to_string(),
    ] {
        html.push_str(&format!("<th>{}</th>\n", escape(&column)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for level in levels.iter().filter(|l| l.price.is_some()) {
        html.push_str("<tr>\n");
        for cell in [level.price, level.amount, level.cumulative, level.value_usdt] {
            html.push_str(&format!("<td>{}</td>\n", format_cell(cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

/// Seven decimals, or `NaN` for a missing cell
pub fn format_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.7}"))
}

/// Split `BASE/QUOTE`; a pair without a slash is used for both
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('/').unwrap_or((pair, pair))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
