//! Ledger explorer operations
//!
//! The two aggregations run against the ledger API:
//! - holders: every account with a balance line of the tracked asset,
//!   oldest first, cursor pagination
//! - large transactions: newest payments of the tracked asset at or above a
//!   threshold, next-link pagination bounded by page/item limits

mod records;

pub use records::{
    parse_amount, AccountRecord, BalanceLine, HolderExtractor, LargePaymentExtractor,
    PaymentRecord,
};

use crate::aggregator::{Aggregate, AggregateConfig, Aggregator, PageRequest};
use crate::config::{HoldersConfig, LedgerConfig, TransactionsConfig};
use crate::http::HttpClient;
use crate::pagination::{CursorPaginator, NextUrlPaginator};
use crate::types::{Holder, Transaction};

/// Build an endpoint URL under the ledger base URL
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Fetch every holder of the tracked asset, sorted by balance descending
pub async fn fetch_holders(
    client: &HttpClient,
    ledger: &LedgerConfig,
    holders: &HoldersConfig,
) -> Aggregate<Holder> {
    let request = PageRequest::new(endpoint(&ledger.base_url, "accounts"))
        .query("asset", ledger.asset.to_string())
        .query("limit", ledger.page_limit.to_string())
        .query("order", holders.order.as_str());

    let extractor =
        HolderExtractor::new(ledger.asset.clone()).skip_zero_balances(holders.skip_zero_balances);

    let mut config = AggregateConfig::new();
    if let Some(max_pages) = holders.max_pages {
        config = config.with_max_pages(max_pages);
    }

    Aggregator::new(client)
        .with_config(config)
        .collect("holders", &request, &CursorPaginator::default(), &extractor)
        .await
        .map_items(sort_holders)
}

/// Fetch the largest recent payments of the tracked asset
pub async fn fetch_large_transactions(
    client: &HttpClient,
    ledger: &LedgerConfig,
    transactions: &TransactionsConfig,
) -> Aggregate<Transaction> {
    let request = PageRequest::new(endpoint(&ledger.base_url, "payments"))
        .query("asset_code", ledger.asset.code.as_str())
        .query("asset_issuer", ledger.asset.issuer.as_str())
        .query("limit", ledger.page_limit.to_string())
        .query("order", transactions.order.as_str());

    let extractor = LargePaymentExtractor::new(ledger.asset.clone(), transactions.threshold);

    let mut config = AggregateConfig::new();
    if let Some(max_pages) = transactions.max_pages {
        config = config.with_max_pages(max_pages);
    }
    if let Some(max_items) = transactions.max_items {
        config = config.with_max_items(max_items);
    }

    let top_n = transactions.top_n;
    Aggregator::new(client)
        .with_config(config)
        .collect("large transactions", &request, &NextUrlPaginator::default(), &extractor)
        .await
        .map_items(|items| top_transactions(items, top_n))
}

/// Sort holders by balance, largest first
pub fn sort_holders(mut holders: Vec<Holder>) -> Vec<Holder> {
    holders.sort_by(|a, b| b.balance.total_cmp(&a.balance));
    holders
}

/// Sort transactions by amount, largest first, and keep the first `n`
pub fn top_transactions(mut transactions: Vec<Transaction>, n: usize) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    transactions.truncate(n);
    transactions
}
