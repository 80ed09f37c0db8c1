//! Backtest command implementation.

use anyhow::{Context, Result};
use quant_backtest::BacktestEngine;
use quant_config::parse_period_pair;
use std::path::Path;
use tracing::info;

use crate::cli::BacktestArgs;

pub fn run(args: BacktestArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = super::load_app_config(config_path)?;

    if let Some(pair) = &args.sma {
        let (fast, slow) = parse_period_pair(pair).context("invalid --sma periods")?;
        config.indicators.sma.enabled = true;
        config.indicators.sma.fast = fast;
        config.indicators.sma.slow = slow;
    }
    if let Some(pair) = &args.ema {
        let (fast, slow) = parse_period_pair(pair).context("invalid --ema periods")?;
        config.indicators.ema.enabled = true;
        config.indicators.ema.fast = fast;
        config.indicators.ema.slow = slow;
    }
    for warning in config.indicators.sanitize() {
        tracing::warn!("{warning}");
    }

    let backtest_config = super::apply_backtest_overrides(&config.backtest, &args)?;

    let series = super::load_series(&args.data, &args.symbol)?;
    let (_, matrix) = super::bundle_and_matrix(&config, &series);

    let engine = BacktestEngine::new(backtest_config);
    let report = engine
        .run(&series, &matrix)
        .context("backtest computation failed")?;

    match args.output.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)
            .with_context(|| format!("failed to write {}", save_path.display()))?;
        info!("report saved to {}", save_path.display());
    }

    if let Some(csv_path) = &args.export_csv {
        std::fs::write(csv_path, report.to_csv())
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        info!("equity table exported to {}", csv_path.display());
    }

    Ok(())
}
