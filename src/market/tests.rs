//! Tests for the market fetcher

use super::*;
use crate::http::HttpClientConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().no_rate_limit().build()).unwrap()
}

fn config_for(base_url: String) -> MarketConfig {
    MarketConfig {
        base_url,
        api_key: Some("demo-key".to_string()),
        ..MarketConfig::default()
    }
}

async fn mount_search(server: &MockServer, coins: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("query", "coinbarpay"))
        .and(header("x-cg-demo-api-key", "demo-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "coins": coins })))
        .mount(server)
        .await;
}

#[test]
fn test_coin_matching() {
    let coin = |symbol: &str, name: &str| CoinEntry {
        id: "x".into(),
        symbol: symbol.into(),
        name: name.into(),
    };

    assert!(coin("cbpay", "Something").matches("CBPAY", "coinbar"));
    assert!(coin("CBP", "CoinBar Pay").matches("CBPAY", "coinbar"));
    assert!(!coin("CBP", "Other").matches("CBPAY", "coinbar"));
    assert!(!coin("CBP", "Other").matches("CBPAY", ""));
}

#[test]
fn test_snapshot_from_prices_defaults_missing_to_zero() {
    let fields: HashMap<String, Value> = serde_json::from_value(json!({
        "usd": 0.0123,
        "usd_24h_change": -4.5,
        "usd_market_cap": null
    }))
    .unwrap();

    let snapshot = snapshot_from_prices(&fields, "usd");
    assert_eq!(snapshot.source, MarketSource::CoinGecko);
    assert_eq!(snapshot.price_usd, 0.0123);
    assert_eq!(snapshot.price_change_24h, -4.5);
    assert_eq!(snapshot.market_cap_usd, 0.0);
    assert_eq!(snapshot.volume_24h_usd, 0.0);
}

#[tokio::test]
async fn test_found() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        json!([
            {"id": "bitcoin", "symbol": "BTC", "name": "Bitcoin"},
            {"id": "coinbarpay", "symbol": "cbpay", "name": "CoinBarPay"}
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "coinbarpay"))
        .and(query_param("vs_currencies", "usd"))
        .and(query_param("include_market_cap", "true"))
        .and(query_param("include_24hr_vol", "true"))
        .and(query_param("include_24hr_change", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coinbarpay": {
                "usd": 0.00042,
                "usd_market_cap": 125000.5,
                "usd_24h_vol": 980.25,
                "usd_24h_change": 3.75
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetch_market_snapshot(&client(), &config_for(server.uri())).await;

    assert!(outcome.is_found());
    let snapshot = outcome.into_snapshot();
    assert_eq!(snapshot.source, MarketSource::CoinGecko);
    assert_eq!(snapshot.price_usd, 0.00042);
    assert_eq!(snapshot.market_cap_usd, 125000.5);
    assert_eq!(snapshot.volume_24h_usd, 980.25);
    assert_eq!(snapshot.price_change_24h, 3.75);
    assert!(snapshot.note.is_none());
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_no_matching_coin() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        json!([{"id": "bitcoin", "symbol": "BTC", "name": "Bitcoin"}]),
    )
    .await;

    let outcome = fetch_market_snapshot(&client(), &config_for(server.uri())).await;

    assert!(matches!(outcome, MarketOutcome::NotAvailable(_)));
    let snapshot = outcome.snapshot();
    assert_eq!(snapshot.source, MarketSource::NotAvailable);
    assert_eq!(snapshot.price_usd, 0.0);
    assert_eq!(snapshot.market_cap_usd, 0.0);
    assert_eq!(
        snapshot.note.as_deref(),
        Some("CBPAY data not available on CoinGecko")
    );
}

#[tokio::test]
async fn test_id_missing_from_prices() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        json!([{"id": "coinbarpay", "symbol": "CBPAY", "name": "CoinBarPay"}]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let outcome = fetch_market_snapshot(&client(), &config_for(server.uri())).await;
    assert_eq!(outcome.snapshot().source, MarketSource::NotAvailable);
}

#[tokio::test]
async fn test_search_status_error_is_not_available() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let outcome = fetch_market_snapshot(&client(), &config_for(server.uri())).await;
    assert!(matches!(outcome, MarketOutcome::NotAvailable(_)));
    assert!(outcome.error().is_none());
}

#[tokio::test]
async fn test_invalid_json_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let outcome = fetch_market_snapshot(&client(), &config_for(server.uri())).await;

    assert!(matches!(outcome.error(), Some(Error::Decode { .. })));
    let snapshot = outcome.into_snapshot();
    assert_eq!(snapshot.source, MarketSource::Error);
    assert_eq!(snapshot.price_usd, 0.0);
    assert!(snapshot.error.is_some());
}

#[tokio::test]
async fn test_transport_error_is_failure() {
    // Nothing listens on this port
    let config = config_for("http://127.0.0.1:1".to_string());

    let outcome = fetch_market_snapshot(&client(), &config).await;

    assert!(matches!(outcome, MarketOutcome::Failed { .. }));
    assert_eq!(outcome.snapshot().source, MarketSource::Error);
}

#[tokio::test]
async fn test_no_api_key_header_when_unset() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"coins": []})))
        .expect(1)
        .mount(&server)
        .await;

    let config = MarketConfig {
        base_url: server.uri(),
        ..MarketConfig::default()
    };
    let outcome = fetch_market_snapshot(&client(), &config).await;
    assert!(matches!(outcome, MarketOutcome::NotAvailable(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-cg-demo-api-key").is_none());
}
