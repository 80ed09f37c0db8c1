//! Risk sizing and advisory output.
//!
//! Independent of the backtest pipeline: both consumers read the latest
//! price/volatility state and produce advisory numbers, never orders.

pub mod advisor;
pub mod sizer;

pub use advisor::{advise, Advice, AdvisorParams, Decision};
pub use sizer::{RiskConfig, RiskSizer, SizingRecord};
