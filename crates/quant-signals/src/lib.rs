//! Signal generation and combination.
//!
//! Each indicator family is a uniform [`SignalGenerator`] behind one
//! interface, consuming pre-computed, bar-aligned indicator columns from an
//! [`IndicatorBundle`] and emitting one directional reading per bar. The
//! [`combine`] step then merges any number of generator outputs into a single
//! combined series under a configurable voting rule.
//!
//! A disabled indicator is an absent bundle column: its generator returns
//! `None` and contributes no column to the vote, which is different from
//! voting FLAT everywhere.

pub mod bundle;
pub mod combiner;
pub mod generators;
pub mod registry;

pub use bundle::IndicatorBundle;
pub use combiner::{combine, CombineMode};
pub use generators::{
    signal_matrix, BollingerBreakout, BollingerBreakoutConfig, EmaCross, MaCrossConfig, MacdCross,
    MacdCrossConfig, RsiThreshold, RsiThresholdConfig, SignalGenerator, SmaCross,
};
pub use registry::{GeneratorInfo, GeneratorRegistry};
