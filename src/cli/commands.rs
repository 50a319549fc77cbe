//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ledger and market snapshot generator
#[derive(Parser, Debug)]
#[command(name = "ledger-snapshot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the output files are written to
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Market API key
    #[arg(long, global = true, env = "COINGECKO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Minimum amount of a large transaction
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Number of large transactions to keep
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand; `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Fetch holders, market data and large transactions, then render the report (default)
    Run,

    /// Fetch every holder of the asset
    Holders,

    /// Fetch the market snapshot
    Market,

    /// Fetch the largest recent transactions
    Transactions,

    /// Render the order book report
    Report {
        /// Order book markdown page (bundled sample when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Conversion rate to USDT
        #[arg(long)]
        rate: Option<f64>,
    },

    /// Print the effective configuration as YAML
    Config,
}

impl Cli {
    /// The subcommand to run; `run` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}
