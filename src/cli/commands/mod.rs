//! Command implementations.

pub mod advise;
pub mod backtest;
pub mod portfolio;
pub mod signals;
pub mod validate;

use anyhow::{Context, Result};
use quant_backtest::{BacktestConfig, PersistenceMode};
use quant_config::AppConfig;
use quant_core::{BarSeries, Signal};
use quant_data::CsvBarSource;
use quant_signals::{signal_matrix, CombineMode, IndicatorBundle};
use std::path::Path;
use tracing::warn;

/// Load the app configuration, falling back to defaults when no file is
/// given, and sanitize the indicator settings up front.
pub(crate) fn load_app_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut config = match config_path {
        Some(path) => quant_config::load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    for warning in config.indicators.sanitize() {
        warn!("{warning}");
    }

    Ok(config)
}

/// Load and validate one symbol's bars from a CSV file.
pub(crate) fn load_series(path: &Path, symbol: &str) -> Result<BarSeries> {
    let source = CsvBarSource::new(path)
        .with_context(|| format!("failed to open data file {}", path.display()))?;
    source
        .load(symbol)
        .with_context(|| format!("failed to load bars for {symbol}"))
}

/// Compute the indicator bundle and run every enabled generator over it.
pub(crate) fn bundle_and_matrix(
    config: &AppConfig,
    series: &BarSeries,
) -> (IndicatorBundle, Vec<Vec<Signal>>) {
    let bundle = config.indicators.build_bundle(series);
    let generators = config.indicators.build_generators();
    let matrix = signal_matrix(&generators, &bundle);
    (bundle, matrix)
}

pub(crate) fn parse_combine_mode(input: &str) -> Result<CombineMode> {
    match input.to_ascii_lowercase().as_str() {
        "or" => Ok(CombineMode::Or),
        "majority" => Ok(CombineMode::Majority),
        "and" => Ok(CombineMode::And),
        other => anyhow::bail!("unknown combine mode '{other}' (expected or, majority, and)"),
    }
}

pub(crate) fn parse_persistence(input: &str) -> Result<PersistenceMode> {
    match input.to_ascii_lowercase().as_str() {
        "forward_fill" => Ok(PersistenceMode::ForwardFill),
        "reset" => Ok(PersistenceMode::Reset),
        other => anyhow::bail!("unknown persistence '{other}' (expected forward_fill, reset)"),
    }
}

/// Apply command-line overrides on top of the configured backtest settings.
pub(crate) fn apply_backtest_overrides(
    base: &BacktestConfig,
    args: &crate::cli::BacktestArgs,
) -> Result<BacktestConfig> {
    let mut config = base.clone();
    if let Some(cash) = args.cash {
        config.initial_cash = cash;
    }
    if let Some(fee) = args.fee_bps {
        config.fee_bps = fee;
    }
    if let Some(slippage) = args.slippage_bps {
        config.slippage_bps = slippage;
    }
    if let Some(max) = args.max_position {
        config.max_position = max;
    }
    if let Some(mode) = &args.mode {
        config.combine_mode = parse_combine_mode(mode)?;
    }
    if let Some(persistence) = &args.persistence {
        config.persistence = parse_persistence(persistence)?;
    }
    Ok(config)
}
