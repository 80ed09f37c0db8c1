//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quant")]
#[command(author, version, about = "Signal-combination backtesting engine for OHLC market data")]
pub struct Cli {
    /// Configuration file path (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Backtest the combined signal over one symbol's bars
    Backtest(BacktestArgs),
    /// Run every symbol in parallel and weight the curves together
    Portfolio(PortfolioArgs),
    /// Score the latest bar and print advice with stop/target levels
    Advise(AdviseArgs),
    /// List available signal generators
    Signals,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Bar data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Symbol label for the report
    #[arg(short, long, default_value = "DATA")]
    pub symbol: String,

    /// Initial cash override
    #[arg(long)]
    pub cash: Option<f64>,

    /// Fee override in basis points
    #[arg(long)]
    pub fee_bps: Option<f64>,

    /// Slippage override in basis points
    #[arg(long)]
    pub slippage_bps: Option<f64>,

    /// Maximum position override (fraction of equity)
    #[arg(long)]
    pub max_position: Option<f64>,

    /// Combine mode override (or, majority, and)
    #[arg(long)]
    pub mode: Option<String>,

    /// Persistence override (forward_fill, reset)
    #[arg(long)]
    pub persistence: Option<String>,

    /// SMA period pair override, e.g. "20,60"
    #[arg(long)]
    pub sma: Option<String>,

    /// EMA period pair override, e.g. "12,26"
    #[arg(long)]
    pub ema: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Export the per-bar equity table to a CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Directory containing one {symbol}.csv per symbol
    #[arg(short, long)]
    pub data: PathBuf,

    /// Symbols to include (comma-separated)
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Weighting scheme (equal, inverse_volatility)
    #[arg(long, default_value = "equal")]
    pub weighting: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct AdviseArgs {
    /// Bar data file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Symbol label
    #[arg(short, long, default_value = "DATA")]
    pub symbol: String,
}
