//! Backtesting engine.
//!
//! A pure, deterministic batch computation over a validated bar series and a
//! configuration value. The stages run in a fixed order: combined signal →
//! position series → per-bar transaction cost → strategy and buy-and-hold
//! equity → closed trades → summary statistics. Nothing here performs I/O,
//! and two runs over identical inputs produce bit-identical output.

pub mod cost;
pub mod engine;
pub mod equity;
pub mod portfolio;
pub mod position;
pub mod report;
pub mod statistics;
pub mod trades;

pub use cost::turnover_costs;
pub use engine::{BacktestConfig, BacktestEngine};
pub use equity::{price_returns, simulate, EquityCurves};
pub use portfolio::{run_portfolio, PortfolioReport, SymbolInput, WeightScheme};
pub use position::{track, PersistenceMode};
pub use report::BacktestReport;
pub use statistics::{periods_per_year, StatsRecord};
pub use trades::extract_trades;
