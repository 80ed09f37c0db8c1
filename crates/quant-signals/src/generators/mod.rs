//! Signal generator implementations.
//!
//! One generator per indicator family, all behind [`SignalGenerator`] so the
//! caller builds a list of enabled generators and iterates it generically
//! instead of branching per indicator.

mod bollinger_breakout;
mod ma_cross;
mod macd_cross;
mod rsi_threshold;

pub use bollinger_breakout::{BollingerBreakout, BollingerBreakoutConfig};
pub use ma_cross::{EmaCross, MaCrossConfig, SmaCross};
pub use macd_cross::{MacdCross, MacdCrossConfig};
pub use rsi_threshold::{RsiThreshold, RsiThresholdConfig};

use quant_core::Signal;

use crate::bundle::IndicatorBundle;

/// A per-indicator signal generator.
///
/// Pure over its inputs: the same bundle always yields the same series.
pub trait SignalGenerator: Send + Sync {
    /// Short machine-friendly key (e.g. "sma_cross").
    fn key(&self) -> &'static str;

    /// Human-readable description of the rule.
    fn description(&self) -> &'static str;

    /// Generate one signal per bar, or `None` when the columns this
    /// generator needs are absent from the bundle.
    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>>;
}

/// Run every generator against the bundle and collect the columns that
/// produced output. Disabled indicators are simply absent columns.
pub fn signal_matrix(
    generators: &[Box<dyn SignalGenerator>],
    bundle: &IndicatorBundle,
) -> Vec<Vec<Signal>> {
    generators
        .iter()
        .filter_map(|g| g.generate(bundle))
        .collect()
}
