//! Signal-to-position tracking.

use quant_core::Signal;
use serde::{Deserialize, Serialize};

/// How a FLAT bar affects the held position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceMode {
    /// A FLAT bar holds the previous bar's position. The position stays on
    /// until the next actionable signal reverses or reconfirms it, which is
    /// what gives infrequent event signals (MACD crossings) a holding period.
    ForwardFill,
    /// A FLAT bar exits to zero, so position mirrors the signal bar for bar.
    Reset,
}

impl Default for PersistenceMode {
    fn default() -> Self {
        Self::ForwardFill
    }
}

/// Convert the combined signal series into a position series.
///
/// A directional bar sets the position to `max_position * sign`; FLAT bars
/// follow the persistence mode. Sequential left-to-right scan: each bar
/// depends on the previous bar's output. Total over any finite input, and
/// `|position[t]| <= max_position` for every bar.
pub fn track(signals: &[Signal], max_position: f64, mode: PersistenceMode) -> Vec<f64> {
    let mut positions = Vec::with_capacity(signals.len());
    let mut held = 0.0;

    for signal in signals {
        held = match signal {
            Signal::Long => max_position,
            Signal::Short => -max_position,
            Signal::Flat => match mode {
                PersistenceMode::ForwardFill => held,
                PersistenceMode::Reset => 0.0,
            },
        };
        positions.push(held);
    }

    positions
}
