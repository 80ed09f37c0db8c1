//! Backtest report generation and export.

use chrono::DateTime;
use quant_core::{EquityPoint, Trade};
use serde::{Deserialize, Serialize};

use crate::engine::BacktestConfig;
use crate::statistics::StatsRecord;

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Symbol the run was computed over
    pub symbol: String,
    /// Configuration used
    pub config: BacktestConfig,
    /// Summary statistics
    pub stats: StatsRecord,
    /// Strategy and buy-and-hold equity, one point per bar
    pub equity: Vec<EquityPoint>,
    /// Position series, one value per bar
    pub position: Vec<f64>,
    /// Close prices, one per bar
    pub close: Vec<f64>,
    /// Closed trades in chronological order
    pub trades: Vec<Trade>,
}

impl BacktestReport {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  BACKTEST REPORT — {}\n", self.symbol));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Initial Cash:          ${:.2}\n",
            self.config.initial_cash
        ));
        s.push_str(&format!(
            "  Final Equity:          ${:.2}\n",
            self.stats.final_equity
        ));
        s.push_str(&format!(
            "  Cumulative Return:     {:.2}%\n",
            self.stats.cumulative_return * 100.0
        ));
        s.push_str(&format!(
            "  Annualized Return:     {:.2}%\n",
            self.stats.annualized_return * 100.0
        ));
        s.push_str(&format!(
            "  Max Drawdown:          {:.2}%\n",
            self.stats.max_drawdown * 100.0
        ));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Annualized Volatility: {:.2}%\n",
            self.stats.annualized_volatility * 100.0
        ));
        s.push_str(&format!("  Sharpe Ratio:          {:.2}\n", self.stats.sharpe));
        s.push_str(&format!(
            "  Profit Factor:         {}\n",
            format_profit_factor(self.stats.profit_factor)
        ));
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Closed Trades:         {}\n", self.stats.n_trades));
        s.push_str(&format!(
            "  Win Rate:              {:.2}%\n",
            self.stats.win_rate * 100.0
        ));
        s.push('\n');

        s.push_str("EXECUTION\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Bars Processed:        {}\n", self.equity.len()));
        s.push_str(&format!(
            "  Periods / Year:        {:.1}\n",
            self.stats.periods_per_year
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Flat tabular export, one row per bar.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("date,equity,buyhold,pos,close\n");
        for (i, point) in self.equity.iter().enumerate() {
            let pos = self.position.get(i).copied().unwrap_or(0.0);
            let close = self.close.get(i).copied().unwrap_or(f64::NAN);
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                format_date(point.timestamp),
                point.strategy,
                point.buy_hold,
                pos,
                close
            ));
        }
        out
    }
}

fn format_date(timestamp_millis: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_millis) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp_millis.to_string(),
    }
}

fn format_profit_factor(pf: f64) -> String {
    if pf.is_infinite() {
        "inf".to_string()
    } else {
        format!("{pf:.2}")
    }
}
