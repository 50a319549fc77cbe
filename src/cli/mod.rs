//! CLI module
//!
//! Command-line interface for producing the snapshots.
//!
//! # Commands
//!
//! - `run` - Every task below, then a summary (default)
//! - `holders` - Holder balances
//! - `market` - Market snapshot
//! - `transactions` - Largest recent transactions
//! - `report` - Order book HTML report
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{
    format_amount, run_all, run_holders, run_market, run_transactions, write_report, RunSummary,
    Runner,
};
