//! Tests for the order book report

use super::*;
use crate::template::extract_variables;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_case::test_case;

const SMALL_BOOK: &str = "\
## Order Book

### Bids (Compras)

| Preço (XDB) | Quantidade (CBPAY) | Acumulado (CBPAY) | Valor (USD) |
| --- | --- | --- | --- |
| 0.1600000 | 320.0000000 | 320.0000000 | N/A |
| N/A | 10.0000000 | 330.0000000 | N/A |
| 0.1500000 | oops | 330.0000000 | N/A |

### Asks (Vendas)

| Preço (XDB) | Quantidade (CBPAY) | Acumulado (CBPAY) | Valor (USD) |
| --- | --- | --- | --- |
| 0.3000000 | 270000.0000000 | 270000.0000000 | N/A |
| 2.5000000 | 100.0000000 | 270100.0000000 | N/A |

## Preço Atual do XDB

| ignored | table |
| --- | --- |
| 1 | 2 |
";

fn approx(actual: Option<f64>, expected: f64) -> bool {
    actual.is_some_and(|v| (v - expected).abs() < 1e-9)
}

// ============================================================================
// Parser Tests
// ============================================================================

#[test]
fn test_parse_sections() {
    let book = parse_order_book(SMALL_BOOK, 0.000_691_3).unwrap();
    assert_eq!(book.bids.len(), 3);
    assert_eq!(book.asks.len(), 2);

    assert_eq!(book.bids[0].price, Some(0.16));
    assert_eq!(book.bids[0].amount, Some(320.0));
    assert_eq!(book.bids[0].cumulative, Some(320.0));
    assert!(approx(book.bids[0].value_usdt, 0.035_394_6));

    assert!(approx(book.asks[0].value_usdt, 55.9953));
}

#[test]
fn test_unparsable_cells_are_missing() {
    let book = parse_order_book(SMALL_BOOK, 0.000_691_3).unwrap();

    assert_eq!(book.bids[1].price, None);
    assert_eq!(book.bids[1].value_usdt, None);

    assert_eq!(book.bids[2].amount, None);
    assert_eq!(book.bids[2].value_usdt, None);
}

#[test]
fn test_asks_end_at_blank_line() {
    let book = parse_order_book(SMALL_BOOK, 1.0).unwrap();
    let prices: Vec<_> = book.asks.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![Some(0.3), Some(2.5)]);
}

#[test]
fn test_missing_section_is_error() {
    let markdown = "### Bids (Compras)\n\n| a | b | c | d |\n| --- | --- | --- | --- |\n";
    let err = parse_order_book(markdown, 1.0).unwrap_err();
    assert!(err.to_string().contains(ASKS_HEADING));
}

#[test]
fn test_section_without_table_is_error() {
    let markdown = "### Bids\nnothing here\n### Asks\n| --- | --- |\n| 1 | 2 |\n";
    assert!(parse_order_book(markdown, 1.0).is_err());
}

#[test]
fn test_empty_table() {
    let markdown = "### Bids\n| a |\n| --- |\n\n### Asks\n| a |\n| :---: |\n";
    let book = parse_order_book(markdown, 1.0).unwrap();
    assert!(book.bids.is_empty());
    assert!(book.asks.is_empty());
}

#[test]
fn test_sample_book() {
    let book = parse_order_book(SAMPLE_ORDER_BOOK, 0.000_691_3).unwrap();
    assert_eq!(book.bids.len(), 20);
    assert_eq!(book.asks.len(), 15);
    assert!(book.bids.iter().all(|l| l.value_usdt.is_some()));
}

#[test]
fn test_split_row() {
    assert_eq!(split_row("| 1 | two |  |"), vec!["1", "two", ""]);
    assert_eq!(split_row("a|b"), vec!["a", "b"]);
}

#[test_case("0.1600000", Some(0.16) ; "decimal")]
#[test_case("N/A", None ; "not available")]
#[test_case("NaN", None ; "nan literal")]
#[test_case("", None ; "empty")]
fn test_parse_number(cell: &str, expected: Option<f64>) {
    assert_eq!(parse_number(cell), expected);
}

#[test_case(0.035_394_56, 0.035_394_6 ; "rounds up")]
#[test_case(1.000_000_04, 1.0 ; "rounds down")]
#[test_case(-0.000_000_06, -0.000_000_1 ; "negative")]
fn test_round_to(value: f64, expected: f64) {
    assert!((round_to(value, 7) - expected).abs() < 1e-12);
}

// ============================================================================
// Render Tests
// ============================================================================

#[test]
fn test_format_cell() {
    assert_eq!(format_cell(Some(0.16)), "0.1600000");
    assert_eq!(format_cell(Some(55.9953)), "55.9953000");
    assert_eq!(format_cell(None), "NaN");
}

#[test]
fn test_render_table_skips_rows_without_price() {
    let book = parse_order_book(SMALL_BOOK, 0.000_691_3).unwrap();
    let html = render_table("Bids (Compras)", &book.bids, "CBPAY", "XDB");

    assert!(html.starts_with("<h3>Bids (Compras)</h3>\n<table class=\"order-book-table\">"));
    assert!(html.contains("<th>Preço (XDB)</th>"));
    assert!(html.contains("<th>Quantidade (CBPAY)</th>"));
    assert!(html.contains("<th>Valor (USDT)</th>"));
    assert_eq!(html.matches("<tr>").count(), 3);
    assert!(html.contains("<td>0.1600000</td>\n<td>320.0000000</td>\n<td>320.0000000</td>\n<td>0.0353946</td>"));
    assert!(html.contains("<td>0.1500000</td>\n<td>NaN</td>"));
}

#[test]
fn test_render_html_page() {
    let book = parse_order_book(SMALL_BOOK, 0.000_691_3).unwrap();
    let config = ReportConfig::default();
    let at = Utc.with_ymd_and_hms(2025, 7, 3, 17, 49, 21).unwrap();

    let html = render_html(&book, &config, &at).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"pt-BR\">"));
    assert!(html.contains("Última atualização: 03/07/2025, 17:49:21<br>"));
    assert!(html.contains("0.0006913 USDT por XDB"));
    assert!(html.contains("Fonte: CoinMarketCap"));
    assert!(html.contains("<strong>CBPAY/XDB</strong>"));
    assert!(html.contains("}, 10000);"));
    assert!(html.contains("<div class=\"bids\">"));
    assert!(html.contains("<h3>Asks (Vendas)</h3>"));
    assert!(!html.contains("{{"));
}

#[test]
fn test_page_template_placeholders() {
    let mut vars = extract_variables(PAGE_TEMPLATE);
    vars.sort();
    vars.dedup();
    assert_eq!(
        vars,
        vec![
            "asks_table",
            "bids_table",
            "generated_at",
            "pair",
            "rate",
            "rate_source",
            "refresh_ms"
        ]
    );
}

// ============================================================================
// Build Tests
// ============================================================================

#[test]
fn test_load_markdown_defaults_to_sample() {
    let markdown = load_markdown(&ReportConfig::default()).unwrap();
    assert_eq!(markdown, SAMPLE_ORDER_BOOK);
}

#[test]
fn test_load_markdown_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("book.md");
    std::fs::write(&path, SMALL_BOOK).unwrap();

    let config = ReportConfig {
        input: Some(path),
        ..ReportConfig::default()
    };
    assert_eq!(load_markdown(&config).unwrap(), SMALL_BOOK);
}

#[test]
fn test_load_markdown_missing_file() {
    let config = ReportConfig {
        input: Some("/definitely/not/here.md".into()),
        ..ReportConfig::default()
    };
    assert!(matches!(
        load_markdown(&config),
        Err(Error::FileNotFound { .. })
    ));
}

#[test]
fn test_build_report() {
    let report = build_report(SMALL_BOOK, &ReportConfig::default(), &chrono::Local::now()).unwrap();
    assert_eq!(report.book.asks.len(), 2);
    assert!(report.html.contains("<td>55.9953000</td>"));
}
