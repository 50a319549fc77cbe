//! Ledger explorer record shapes and extractors
//!
//! Only the fields the snapshots need are decoded; everything else in the
//! Horizon records is ignored.

use crate::aggregator::RecordExtractor;
use crate::types::{AssetFilter, Holder, Transaction};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// An entry of the `/accounts` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    /// Account id
    pub id: String,
    /// Native and trustline balances
    #[serde(default)]
    pub balances: Vec<BalanceLine>,
}

/// One balance line of an account
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceLine {
    /// `native` or a `credit_alphanum*` type
    pub asset_type: String,
    /// Asset code; absent on native lines
    #[serde(default)]
    pub asset_code: Option<String>,
    /// Issuing account; absent on native lines
    #[serde(default)]
    pub asset_issuer: Option<String>,
    /// Decimal string, e.g. "1500.0000000"
    pub balance: String,
}

impl BalanceLine {
    fn is_asset(&self, asset: &AssetFilter) -> bool {
        self.asset_type != "native"
            && asset.matches(self.asset_code.as_deref(), self.asset_issuer.as_deref())
    }
}

/// An entry of the `/payments` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRecord {
    /// Asset code of the transfer
    #[serde(default)]
    pub asset_code: Option<String>,
    /// Issuer of the transferred asset
    #[serde(default)]
    pub asset_issuer: Option<String>,
    /// Decimal string; absent on non-payment operations
    #[serde(default)]
    pub amount: Option<String>,
    /// Sending account
    #[serde(default)]
    pub from: Option<String>,
    /// Receiving account
    #[serde(default)]
    pub to: Option<String>,
    /// ISO-8601 timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Hash of the enclosing transaction
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Parse a ledger decimal string into a finite, non-negative amount
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// ============================================================================
// Holder Extractor
// ============================================================================

/// Turns account records into holders of the tracked asset
#[derive(Debug, Clone)]
pub struct HolderExtractor {
    /// Asset whose balance line is read
    pub asset: AssetFilter,
    /// Drop accounts that hold a trustline but a zero balance
    pub skip_zero_balances: bool,
}

impl HolderExtractor {
    /// Keep every holder of `asset`, zero balances included
    pub fn new(asset: AssetFilter) -> Self {
        Self {
            asset,
            skip_zero_balances: false,
        }
    }

    /// Drop or keep zero balances
    #[must_use]
    pub fn skip_zero_balances(mut self, skip: bool) -> Self {
        self.skip_zero_balances = skip;
        self
    }
}

impl RecordExtractor<Holder> for HolderExtractor {
    fn extract(&self, record: &Value) -> Option<Holder> {
        let account = match AccountRecord::deserialize(record) {
            Ok(account) => account,
            Err(e) => {
                debug!("Skipping undecodable account record: {e}");
                return None;
            }
        };

        // First matching line only, so an account appears once per page
        let line = account.balances.iter().find(|b| b.is_asset(&self.asset))?;
        let balance = parse_amount(&line.balance)?;

        if self.skip_zero_balances && balance == 0.0 {
            return None;
        }

        Some(Holder {
            address: account.id,
            balance,
        })
    }
}

// ============================================================================
// Large Payment Extractor
// ============================================================================

/// Turns payment records of the tracked asset into large transactions
#[derive(Debug, Clone)]
pub struct LargePaymentExtractor {
    /// Asset whose payments are kept
    pub asset: AssetFilter,
    /// Minimum amount to count as large (inclusive)
    pub threshold: f64,
}

impl LargePaymentExtractor {
    /// Keep payments of `asset` of at least `threshold`
    pub fn new(asset: AssetFilter, threshold: f64) -> Self {
        Self { asset, threshold }
    }
}

impl RecordExtractor<Transaction> for LargePaymentExtractor {
    fn extract(&self, record: &Value) -> Option<Transaction> {
        let payment = PaymentRecord::deserialize(record).ok()?;

        if !self
            .asset
            .matches(payment.asset_code.as_deref(), payment.asset_issuer.as_deref())
        {
            return None;
        }

        let amount = payment.amount.as_deref().and_then(parse_amount)?;
        if amount < self.threshold {
            return None;
        }

        Some(Transaction {
            amount,
            from: payment.from,
            to: payment.to,
            date: payment.created_at,
            transaction_hash: payment.transaction_hash,
        })
    }
}
