//! Summary statistics over equity and return series.
//!
//! Every function here is total over degenerate input: empty series,
//! single-bar series and zero volatility all produce defined zero/neutral
//! values or documented sentinels rather than errors.

use quant_core::Trade;
use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-12;
const MILLIS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0 * 1000.0;
const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;

/// Summary statistics of a backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Total fractional return over the run
    pub cumulative_return: f64,
    /// Geometric annualized return
    pub annualized_return: f64,
    /// Stdev of per-bar returns scaled to a year
    pub annualized_volatility: f64,
    /// Annualized mean return over annualized volatility
    pub sharpe: f64,
    /// Largest peak-to-trough decline, in [0, 1]
    pub max_drawdown: f64,
    /// Fraction of closed trades with positive pnl
    pub win_rate: f64,
    /// Gross profit over gross loss; +inf with winners and no losers, 0 with
    /// no trades
    pub profit_factor: f64,
    pub final_equity: f64,
    /// Bars per year derived from the actual bar interval
    pub periods_per_year: f64,
    pub n_trades: usize,
}

/// Derive the number of bars per year from the actual bar interval.
///
/// Calendar year in milliseconds over the median inter-bar gap, so hourly
/// data annualizes at ~8766 and daily at ~365 rather than a hard-coded 252.
/// Falls back to 252 when fewer than two bars are available.
pub fn periods_per_year(timestamps: &[i64]) -> f64 {
    if timestamps.len() < 2 {
        return DEFAULT_PERIODS_PER_YEAR;
    }

    let mut gaps: Vec<i64> = timestamps.windows(2).map(|w| w[1] - w[0]).collect();
    gaps.sort_unstable();

    let mid = gaps.len() / 2;
    let median = if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) as f64 / 2.0
    } else {
        gaps[mid] as f64
    };

    if median <= 0.0 {
        return DEFAULT_PERIODS_PER_YEAR;
    }
    MILLIS_PER_YEAR / median
}

/// Compute the full statistics record.
pub fn compute(
    equity: &[f64],
    returns: &[f64],
    trades: &[Trade],
    periods_per_year: f64,
) -> StatsRecord {
    let n_bars = equity.len();
    let first = equity.first().copied().unwrap_or(0.0);
    let last = equity.last().copied().unwrap_or(0.0);

    let cumulative_return = if first > 0.0 { last / first - 1.0 } else { 0.0 };

    let annualized_return = if n_bars > 1 && first > 0.0 && last > 0.0 {
        (last / first).powf(periods_per_year / n_bars as f64) - 1.0
    } else {
        0.0
    };

    let annualized_volatility = stdev(returns) * periods_per_year.sqrt();
    let sharpe = mean(returns) * periods_per_year / (annualized_volatility + EPSILON);

    let (win_rate, profit_factor) = trade_stats(trades);

    StatsRecord {
        cumulative_return,
        annualized_return,
        annualized_volatility,
        sharpe,
        max_drawdown: max_drawdown(equity),
        win_rate,
        profit_factor,
        final_equity: last,
        periods_per_year,
        n_trades: trades.len(),
    }
}

/// Largest fractional decline from a running equity peak, in [0, 1].
/// Defined as 0 for series of at most one bar.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() <= 1 {
        return 0.0;
    }

    let mut peak = f64::MIN;
    let mut worst = 0.0;
    for &value in equity {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let drawdown = (peak - value) / peak;
            if drawdown > worst {
                worst = drawdown;
            }
        }
    }
    worst.clamp(0.0, 1.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn trade_stats(trades: &[Trade]) -> (f64, f64) {
    if trades.is_empty() {
        return (0.0, 0.0);
    }

    let mut winners = 0usize;
    let mut gross_profit = 0.0;
    let mut gross_loss = 0.0;

    for trade in trades {
        if trade.pnl > 0.0 {
            winners += 1;
            gross_profit += trade.pnl;
        } else if trade.pnl < 0.0 {
            gross_loss += trade.pnl.abs();
        }
    }

    let win_rate = winners as f64 / trades.len() as f64;
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    (win_rate, profit_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quant_core::TradeSide;

    fn trade(pnl: f64) -> Trade {
        Trade {
            entry_time: 0,
            entry_price: 100.0,
            exit_time: 1,
            exit_price: 100.0,
            side: TradeSide::Long,
            size: 1.0,
            pnl,
        }
    }

    #[test]
    fn test_periods_per_year_daily_bars() {
        let day = 86_400_000i64;
        let ts: Vec<i64> = (0..10).map(|i| i * day).collect();
        assert_relative_eq!(periods_per_year(&ts), 365.25);
    }

    #[test]
    fn test_periods_per_year_hourly_bars() {
        let hour = 3_600_000i64;
        let ts: Vec<i64> = (0..24).map(|i| i * hour).collect();
        assert_relative_eq!(periods_per_year(&ts), 365.25 * 24.0);
    }

    #[test]
    fn test_periods_per_year_fallback() {
        assert_eq!(periods_per_year(&[]), 252.0);
        assert_eq!(periods_per_year(&[1_000]), 252.0);
    }

    #[test]
    fn test_median_ignores_one_outlier_gap() {
        // One weekend-sized hole must not change the derived interval
        let day = 86_400_000i64;
        let ts = vec![0, day, 2 * day, 5 * day, 6 * day];
        assert_relative_eq!(periods_per_year(&ts), 365.25);
    }

    #[test]
    fn test_cumulative_return() {
        let stats = compute(&[10_000.0, 10_500.0, 11_000.0], &[0.0, 0.05, 0.047], &[], 365.0);
        assert_relative_eq!(stats.cumulative_return, 0.10, max_relative = 1e-12);
        assert_relative_eq!(stats.final_equity, 11_000.0);
    }

    #[test]
    fn test_max_drawdown_bounds() {
        assert_eq!(max_drawdown(&[]), 0.0);
        assert_eq!(max_drawdown(&[10_000.0]), 0.0);

        let dd = max_drawdown(&[100.0, 120.0, 60.0, 90.0]);
        assert_relative_eq!(dd, 0.5);
    }

    #[test]
    fn test_monotone_equity_has_zero_drawdown() {
        assert_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn test_zero_volatility_sharpe_is_finite() {
        let stats = compute(&[10_000.0; 5], &[0.0; 5], &[], 252.0);
        assert_eq!(stats.annualized_volatility, 0.0);
        assert!(stats.sharpe.is_finite());
        assert_eq!(stats.sharpe, 0.0);
    }

    #[test]
    fn test_single_bar_series_is_all_neutral() {
        let stats = compute(&[10_000.0], &[0.0], &[], 252.0);
        assert_eq!(stats.cumulative_return, 0.0);
        assert_eq!(stats.annualized_return, 0.0);
        assert_eq!(stats.max_drawdown, 0.0);
    }

    #[test]
    fn test_win_rate_fraction() {
        let trades = vec![trade(0.1), trade(-0.05), trade(0.02), trade(0.0)];
        let stats = compute(&[1.0, 1.0], &[0.0, 0.0], &trades, 252.0);
        assert_relative_eq!(stats.win_rate, 0.5);
        assert_relative_eq!(stats.profit_factor, 0.12 / 0.05, max_relative = 1e-12);
    }

    #[test]
    fn test_profit_factor_sentinels() {
        let no_losers = vec![trade(0.1), trade(0.2)];
        let stats = compute(&[1.0, 1.0], &[0.0, 0.0], &no_losers, 252.0);
        assert!(stats.profit_factor.is_infinite());

        let none = compute(&[1.0, 1.0], &[0.0, 0.0], &[], 252.0);
        assert_eq!(none.profit_factor, 0.0);
        assert_eq!(none.win_rate, 0.0);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn drawdown_stays_in_unit_interval(
                equity in proptest::collection::vec(1.0f64..1e9, 0..200),
            ) {
                let dd = max_drawdown(&equity);
                prop_assert!((0.0..=1.0).contains(&dd));
            }
        }
    }
}
