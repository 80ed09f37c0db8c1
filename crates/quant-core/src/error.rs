//! Error types for the backtesting engine.
//!
//! Failures fall into two camps: data errors abort a run with no partial
//! output, while config errors degrade gracefully (the affected indicator is
//! disabled and the run continues). Numeric degeneracy (zero volatility,
//! single-bar series, zero stop distance) is never an error; every
//! statistics function is total over such inputs.

use thiserror::Error;

/// Top-level error for the engine and its collaborators.
#[derive(Error, Debug)]
pub enum QuantError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fatal problems with the input bar stream.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("empty bar series")]
    Empty,

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("bar {index}: timestamp {timestamp} does not increase over the previous bar")]
    NonMonotonicTimestamp { index: usize, timestamp: i64 },

    #[error("bar {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no data found: {0}")]
    NotFound(String),
}

/// Recoverable configuration problems.
///
/// Callers are expected to disable the offending indicator and keep going
/// rather than abort the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed period list '{input}': {reason}")]
    MalformedPeriods { input: String, reason: String },
}

/// Result type alias for engine operations.
pub type QuantResult<T> = Result<T, QuantError>;
