//! Portfolio command implementation.

use anyhow::{Context, Result};
use quant_backtest::{run_portfolio, SymbolInput, WeightScheme};
use std::path::Path;
use tracing::info;

use crate::cli::PortfolioArgs;

pub fn run(args: PortfolioArgs, config_path: Option<&Path>) -> Result<()> {
    if args.symbols.is_empty() {
        anyhow::bail!("provide at least one symbol with --symbols (e.g. --symbols BTC,ETH)");
    }

    let config = super::load_app_config(config_path)?;

    let scheme = match args.weighting.to_ascii_lowercase().as_str() {
        "equal" => WeightScheme::Equal,
        "inverse_volatility" => WeightScheme::InverseVolatility,
        other => anyhow::bail!(
            "unknown weighting '{other}' (expected equal, inverse_volatility)"
        ),
    };

    let mut universe = Vec::with_capacity(args.symbols.len());
    for symbol in &args.symbols {
        let path = find_symbol_file(&args.data, symbol)?;
        let series = super::load_series(&path, symbol)?;
        let (_, matrix) = super::bundle_and_matrix(&config, &series);
        universe.push(SymbolInput { series, matrix });
    }
    info!(symbols = universe.len(), "loaded portfolio universe");

    let portfolio = run_portfolio(&config.backtest, &universe, scheme)
        .context("portfolio computation failed")?;

    match args.output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&portfolio)?),
        _ => {
            println!("PORTFOLIO ({:?} weighting)", portfolio.scheme);
            println!("───────────────────────────────────────────────────────────");
            for (report, weight) in portfolio.reports.iter().zip(portfolio.weights.iter()) {
                println!(
                    "  {:<10} weight {:>6.2}%  final ${:>12.2}  sharpe {:>6.2}  maxdd {:>6.2}%",
                    report.symbol,
                    weight * 100.0,
                    report.stats.final_equity,
                    report.stats.sharpe,
                    report.stats.max_drawdown * 100.0,
                );
            }
            if let Some(combined) = portfolio.combined_equity.last() {
                println!("───────────────────────────────────────────────────────────");
                println!("  combined final equity: ${combined:.2}");
            }
        }
    }

    Ok(())
}

fn find_symbol_file(dir: &Path, symbol: &str) -> Result<std::path::PathBuf> {
    let candidates = [
        dir.join(format!("{symbol}.csv")),
        dir.join(format!("{}.csv", symbol.to_lowercase())),
    ];
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .with_context(|| format!("no CSV file for {symbol} under {}", dir.display()))
}
