//! Validate-config command implementation.

use anyhow::{Context, Result};
use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let path = config_path.context("provide a configuration file with --config")?;

    let mut config = quant_config::load_config(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    config
        .backtest
        .validate()
        .context("invalid [backtest] section")?;
    config.risk.validate().context("invalid [risk] section")?;

    let warnings = config.indicators.sanitize();
    if warnings.is_empty() {
        println!("configuration OK: {}", path.display());
    } else {
        println!(
            "configuration loads, but {} indicator(s) would be disabled:",
            warnings.len()
        );
        for warning in &warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
