//! Closed-trade extraction from the position series.

use quant_core::{Trade, TradeSide};

struct OpenTrade {
    entry_index: usize,
    side: TradeSide,
    size: f64,
}

/// Extract round-trip trades from the position series.
///
/// A trade opens on the bar where the position sign moves away from zero or
/// flips, and closes on the bar it returns to zero or flips again (a flip
/// closes one trade and opens the next on the same bar). A still-open trade
/// at the end of the series is closed at the last bar. `cost_rate` is the
/// round-trip fractional cost per unit of size, charged once on entry and
/// once on exit.
pub fn extract_trades(
    timestamps: &[i64],
    close: &[f64],
    positions: &[f64],
    cost_rate: f64,
) -> Vec<Trade> {
    let n = positions.len().min(close.len()).min(timestamps.len());
    let mut trades = Vec::new();
    let mut open: Option<OpenTrade> = None;

    for t in 0..n {
        let sign = if positions[t] > 0.0 {
            1.0
        } else if positions[t] < 0.0 {
            -1.0
        } else {
            0.0
        };

        if let Some(current) = open.take() {
            if sign == current.side.sign() {
                open = Some(current);
            } else {
                trades.push(close_trade(&current, timestamps, close, t, cost_rate));
            }
        }

        if open.is_none() && sign != 0.0 {
            open = Some(OpenTrade {
                entry_index: t,
                side: if sign > 0.0 {
                    TradeSide::Long
                } else {
                    TradeSide::Short
                },
                size: positions[t].abs(),
            });
        }
    }

    // Force-close whatever is still held at the last bar
    if let Some(current) = open {
        if n > 0 {
            trades.push(close_trade(&current, timestamps, close, n - 1, cost_rate));
        }
    }

    trades
}

fn close_trade(
    open: &OpenTrade,
    timestamps: &[i64],
    close: &[f64],
    exit_index: usize,
    cost_rate: f64,
) -> Trade {
    let entry_price = close[open.entry_index];
    let exit_price = close[exit_index];
    let gross = if entry_price != 0.0 {
        open.side.sign() * (exit_price / entry_price - 1.0) * open.size
    } else {
        0.0
    };

    Trade {
        entry_time: timestamps[open.entry_index],
        entry_price,
        exit_time: timestamps[exit_index],
        exit_price,
        side: open.side,
        size: open.size,
        pnl: gross - cost_rate * 2.0 * open.size,
    }
}
