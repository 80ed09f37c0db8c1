//! Core types for the signal-combination backtesting engine.
//!
//! This crate provides the foundational building blocks:
//! - Market data types (`Bar`, `BarSeries`) and their validation
//! - Directional signals (`Signal`)
//! - Derived engine outputs (`Trade`, `EquityPoint`)
//! - The error taxonomy shared by all stages

pub mod error;
pub mod types;

pub use error::{ConfigError, DataError, QuantError, QuantResult};
pub use types::*;
