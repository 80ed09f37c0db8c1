//! Core data types for the engine.

mod bar;
mod signal;
mod trade;

pub use bar::{Bar, BarSeries};
pub use signal::Signal;
pub use trade::{EquityPoint, Trade, TradeSide};
