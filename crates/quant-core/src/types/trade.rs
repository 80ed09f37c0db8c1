//! Derived engine outputs: closed trades and equity points.

use serde::{Deserialize, Serialize};

/// Direction of a round-trip trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            TradeSide::Long => 1.0,
            TradeSide::Short => -1.0,
        }
    }
}

/// A closed round-trip trade.
///
/// Created when the position transitions from zero/opposite sign to a new
/// side, closed when it returns to zero/opposite sign. `pnl` is a fractional
/// return on equity, inclusive of entry and exit costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_time: i64,
    pub entry_price: f64,
    pub exit_time: i64,
    pub exit_price: f64,
    pub side: TradeSide,
    /// Position magnitude held for the duration, as a fraction of equity.
    pub size: f64,
    pub pnl: f64,
}

/// One point on the strategy and buy-and-hold equity curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: i64,
    pub strategy: f64,
    pub buy_hold: f64,
}
