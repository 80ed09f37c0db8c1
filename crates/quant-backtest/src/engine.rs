//! Backtesting engine.

use quant_core::error::ConfigError;
use quant_core::{BarSeries, EquityPoint, QuantResult, Signal};
use quant_signals::{combine, CombineMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cost::turnover_costs;
use crate::equity::simulate;
use crate::position::{track, PersistenceMode};
use crate::report::BacktestReport;
use crate::statistics::{self, periods_per_year};
use crate::trades::extract_trades;

/// Backtest configuration.
///
/// All fields explicit; `periods_per_year` is derived from the bar interval
/// at run time, never configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Starting capital for both equity curves
    pub initial_cash: f64,
    /// Exchange fee in basis points per unit of turnover
    pub fee_bps: f64,
    /// Slippage in basis points per unit of turnover
    pub slippage_bps: f64,
    /// Position magnitude cap as a fraction of equity
    pub max_position: f64,
    /// Rule for merging per-indicator signal columns
    pub combine_mode: CombineMode,
    /// FLAT-bar semantics of the position tracker
    pub persistence: PersistenceMode,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_cash: 10_000.0,
            fee_bps: 10.0,
            slippage_bps: 5.0,
            max_position: 1.0,
            combine_mode: CombineMode::default(),
            persistence: PersistenceMode::default(),
        }
    }
}

impl BacktestConfig {
    /// Validate numeric parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_cash.is_finite() && self.initial_cash > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "initial cash {} must be positive",
                self.initial_cash
            )));
        }
        if !(self.max_position.is_finite() && self.max_position > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "max position {} must be positive",
                self.max_position
            )));
        }
        if self.fee_bps < 0.0 || self.slippage_bps < 0.0 {
            return Err(ConfigError::InvalidParameter(
                "fee and slippage must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Round-trip cost rate per unit of turnover.
    pub fn cost_rate(&self) -> f64 {
        (self.fee_bps + self.slippage_bps) / 10_000.0
    }
}

/// Backtesting engine.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Run the full pipeline over a validated bar series and the
    /// per-indicator signal matrix.
    ///
    /// Empty or schema-invalid bars abort the run with no partial output.
    pub fn run(&self, series: &BarSeries, matrix: &[Vec<Signal>]) -> QuantResult<BacktestReport> {
        self.config.validate()?;
        series.validate()?;

        let n = series.len();
        info!(
            symbol = %series.symbol,
            bars = n,
            columns = matrix.len(),
            mode = self.config.combine_mode.as_str(),
            "running backtest"
        );

        let combined = combine(matrix, n, self.config.combine_mode);
        let positions = track(&combined, self.config.max_position, self.config.persistence);
        let costs = turnover_costs(&positions, self.config.fee_bps, self.config.slippage_bps);

        let close = series.closes();
        let timestamps = series.timestamps();
        let curves = simulate(&close, &positions, &costs, self.config.initial_cash);
        let trades = extract_trades(&timestamps, &close, &positions, self.config.cost_rate());

        let ppy = periods_per_year(&timestamps);
        let stats = statistics::compute(&curves.strategy, &curves.strategy_returns, &trades, ppy);

        debug!(
            final_equity = stats.final_equity,
            trades = trades.len(),
            "backtest complete"
        );

        let equity = timestamps
            .iter()
            .zip(curves.strategy.iter().zip(curves.buy_hold.iter()))
            .map(|(&timestamp, (&strategy, &buy_hold))| EquityPoint {
                timestamp,
                strategy,
                buy_hold,
            })
            .collect();

        Ok(BacktestReport {
            symbol: series.symbol.clone(),
            config: self.config.clone(),
            stats,
            equity,
            position: positions,
            close,
            trades,
        })
    }
}
