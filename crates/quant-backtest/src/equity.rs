//! Equity simulation.
//!
//! The position applied to a bar's return is the one decided at the close of
//! the previous bar. Multiplying the same-bar position against the same-bar
//! return would use information not yet available at decision time, so the
//! position series is lagged by one bar here.

use serde::{Deserialize, Serialize};

/// Strategy and buy-and-hold equity curves plus the per-bar strategy returns
/// the statistics stage consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityCurves {
    pub strategy: Vec<f64>,
    pub buy_hold: Vec<f64>,
    pub strategy_returns: Vec<f64>,
}

/// Simple per-bar close-to-close returns. `returns[0] = 0`.
pub fn price_returns(close: &[f64]) -> Vec<f64> {
    let mut returns = Vec::with_capacity(close.len());
    for (i, &price) in close.iter().enumerate() {
        if i == 0 {
            returns.push(0.0);
        } else {
            let prev = close[i - 1];
            returns.push(if prev != 0.0 { price / prev - 1.0 } else { 0.0 });
        }
    }
    returns
}

/// Simulate both equity curves from closes, positions and per-bar costs.
///
/// `strategy_return[t] = position[t-1] * price_return[t] - cost[t]` for
/// `t >= 1`; bar 0 carries only the initial entry cost. Both curves are
/// cumulative products of `1 + return` scaled by `initial_cash`, so with no
/// position and no cost they stay exactly at `initial_cash`.
pub fn simulate(
    close: &[f64],
    positions: &[f64],
    costs: &[f64],
    initial_cash: f64,
) -> EquityCurves {
    let n = close.len();
    let returns = price_returns(close);

    let mut strategy_returns = Vec::with_capacity(n);
    let mut strategy = Vec::with_capacity(n);
    let mut buy_hold = Vec::with_capacity(n);

    let mut strat_equity = initial_cash;
    let mut hold_equity = initial_cash;

    for t in 0..n {
        let lagged_position = if t == 0 { 0.0 } else { positions[t - 1] };
        let strat_ret = lagged_position * returns[t] - costs[t];

        strat_equity *= 1.0 + strat_ret;
        hold_equity *= 1.0 + returns[t];

        strategy_returns.push(strat_ret);
        strategy.push(strat_equity);
        buy_hold.push(hold_equity);
    }

    EquityCurves {
        strategy,
        buy_hold,
        strategy_returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_returns_first_bar_zero() {
        let r = price_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r[0], 0.0);
        assert_relative_eq!(r[1], 0.10);
        assert_relative_eq!(r[2], -0.10);
    }

    #[test]
    fn test_flat_position_stays_at_initial_cash() {
        let close = [100.0, 120.0, 90.0];
        let positions = [0.0; 3];
        let costs = [0.0; 3];
        let curves = simulate(&close, &positions, &costs, 10_000.0);

        assert!(curves.strategy.iter().all(|&e| e == 10_000.0));
        assert_relative_eq!(*curves.buy_hold.last().unwrap(), 9_000.0);
    }

    #[test]
    fn test_position_is_lagged_one_bar() {
        // Long from bar 1; the 10% move at bar 1 is not captured, the one at
        // bar 2 is.
        let close = [100.0, 110.0, 121.0];
        let positions = [0.0, 1.0, 1.0];
        let costs = [0.0; 3];
        let curves = simulate(&close, &positions, &costs, 10_000.0);

        assert_relative_eq!(curves.strategy[1], 10_000.0);
        assert_relative_eq!(curves.strategy[2], 11_000.0);
    }

    #[test]
    fn test_full_position_tracks_buy_hold_at_zero_cost() {
        let close = [100.0, 105.0, 103.0, 111.0];
        let positions = [1.0; 4];
        let costs = [0.0; 4];
        let curves = simulate(&close, &positions, &costs, 10_000.0);

        for (s, b) in curves.strategy.iter().zip(curves.buy_hold.iter()) {
            assert_relative_eq!(s, b, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_cost_drags_the_curve() {
        let close = [100.0, 100.0];
        let positions = [1.0, 1.0];
        let costs = [0.001, 0.0];
        let curves = simulate(&close, &positions, &costs, 10_000.0);

        assert_relative_eq!(curves.strategy[0], 9_990.0);
        assert_relative_eq!(curves.strategy[1], 9_990.0);
    }
}
