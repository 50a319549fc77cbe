//! Tests for output module

use super::*;
use crate::error::Error;
use crate::types::{Holder, MarketSnapshot, MarketSource, Transaction};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

fn holders() -> Vec<Holder> {
    vec![
        Holder {
            address: "GA1".into(),
            balance: 1500.25,
        },
        Holder {
            address: "GA2".into(),
            balance: 0.0,
        },
    ]
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_json_writer_config_defaults() {
    let config = JsonWriterConfig::default();
    assert_eq!(config.indent(), 4);
    assert!(config.creates_dirs());

    let config = JsonWriterConfig::new().with_indent(2).with_create_dirs(false);
    assert_eq!(config.indent(), 2);
    assert!(!config.creates_dirs());
}

#[test]
fn test_four_space_indent() {
    let bytes = to_json_bytes(&json!({"a": [1]}), &JsonWriterConfig::default()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text, "{\n    \"a\": [\n        1\n    ]\n}");
}

#[test]
fn test_empty_list_is_brackets() {
    let empty: Vec<Holder> = Vec::new();
    let bytes = to_json_bytes(&empty, &JsonWriterConfig::default()).unwrap();
    assert_eq!(bytes, b"[]");
}

// ============================================================================
// File Tests
// ============================================================================

#[test]
fn test_write_then_read_holders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holders.json");

    let written = write_json(&path, &holders()).unwrap();
    assert!(written > 0);

    let read: Vec<Holder> = read_json(&path).unwrap();
    assert_eq!(read, holders());
}

#[test]
fn test_write_then_read_transactions_with_nulls() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tx.json");
    let txs = vec![Transaction {
        amount: 250_000.0,
        from: None,
        to: Some("GTO".into()),
        date: Some("2025-07-03T17:49:21Z".into()),
        transaction_hash: Some("abc".into()),
    }];

    write_json(&path, &txs).unwrap();

    let raw: serde_json::Value = read_json(&path).unwrap();
    assert!(raw[0]["from"].is_null());
    assert_eq!(raw[0]["to"], "GTO");

    let read: Vec<Transaction> = read_json(&path).unwrap();
    assert_eq!(read, txs);
}

#[test]
fn test_market_snapshot_optional_fields_omitted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");
    let snapshot = MarketSnapshot::failed("connection refused");

    write_json(&path, &snapshot).unwrap();

    let raw: serde_json::Value = read_json(&path).unwrap();
    assert_eq!(raw["source"], "Error");
    assert_eq!(raw["error"], "connection refused");
    assert!(raw.get("note").is_none());

    let read: MarketSnapshot = read_json(&path).unwrap();
    assert_eq!(read, snapshot);
}

#[test]
fn test_market_snapshot_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market.json");
    let snapshot = MarketSnapshot {
        price_usd: 0.5,
        market_cap_usd: 1_000_000.0,
        volume_24h_usd: 512.0,
        price_change_24h: -1.5,
        source: MarketSource::CoinGecko,
        note: None,
        ..MarketSnapshot::not_available("")
    };

    write_json(&path, &snapshot).unwrap();

    let read: MarketSnapshot = read_json(&path).unwrap();
    assert_eq!(read, snapshot);
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holders.json");

    write_json(&path, &holders()).unwrap();
    write_json(&path, &Vec::<Holder>::new()).unwrap();

    let read: Vec<Holder> = read_json(&path).unwrap();
    assert!(read.is_empty());
}

#[test]
fn test_write_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/out/report.html");

    write_html(&path, "<html></html>").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
}

#[test]
fn test_write_without_create_dirs_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing/holders.json");
    let config = JsonWriterConfig::new().with_create_dirs(false);

    let result = write_json_with_config(&path, &holders(), &config);
    assert!(matches!(result, Err(Error::Output { .. })));
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    let result: crate::error::Result<Vec<Holder>> = read_json(dir.path().join("nope.json"));
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}
