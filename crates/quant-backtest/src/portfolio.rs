//! Multi-symbol portfolio runs.
//!
//! Each symbol's pipeline is independent, so the map step runs in parallel;
//! the weighting reduction at the end is the only sequential part.

use quant_core::{BarSeries, DataError, QuantResult, Signal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{BacktestConfig, BacktestEngine};
use crate::report::BacktestReport;

const EPSILON: f64 = 1e-12;

/// One symbol's bars plus its per-indicator signal matrix.
pub struct SymbolInput {
    pub series: BarSeries,
    pub matrix: Vec<Vec<Signal>>,
}

/// How per-symbol curves are weighted into the portfolio curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightScheme {
    /// 1/N across symbols
    Equal,
    /// Weight proportional to the inverse of annualized volatility, so
    /// quieter symbols carry more of the book
    InverseVolatility,
}

impl Default for WeightScheme {
    fn default() -> Self {
        Self::Equal
    }
}

/// Aggregated result of a portfolio run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub scheme: WeightScheme,
    /// Per-symbol reports, in input order
    pub reports: Vec<BacktestReport>,
    /// Normalized weights, aligned to `reports`
    pub weights: Vec<f64>,
    /// Weighted strategy equity over the common prefix of all curves
    pub combined_equity: Vec<f64>,
}

/// Run the full pipeline for every symbol in parallel and reduce the
/// per-symbol curves under the weighting scheme.
///
/// Any symbol's fatal data error aborts the whole portfolio run.
pub fn run_portfolio(
    config: &BacktestConfig,
    universe: &[SymbolInput],
    scheme: WeightScheme,
) -> QuantResult<PortfolioReport> {
    if universe.is_empty() {
        return Err(DataError::Empty.into());
    }

    info!(symbols = universe.len(), scheme = ?scheme, "running portfolio");

    let engine = BacktestEngine::new(config.clone());
    let reports: Vec<BacktestReport> = universe
        .par_iter()
        .map(|input| engine.run(&input.series, &input.matrix))
        .collect::<QuantResult<_>>()?;

    let weights = normalized_weights(&reports, scheme);
    let combined_equity = combine_curves(&reports, &weights);

    Ok(PortfolioReport {
        scheme,
        reports,
        weights,
        combined_equity,
    })
}

fn normalized_weights(reports: &[BacktestReport], scheme: WeightScheme) -> Vec<f64> {
    let raw: Vec<f64> = match scheme {
        WeightScheme::Equal => vec![1.0; reports.len()],
        WeightScheme::InverseVolatility => reports
            .iter()
            .map(|r| 1.0 / (r.stats.annualized_volatility + EPSILON))
            .collect(),
    };

    let total: f64 = raw.iter().sum();
    raw.iter().map(|w| w / total).collect()
}

fn combine_curves(reports: &[BacktestReport], weights: &[f64]) -> Vec<f64> {
    let common_len = reports
        .iter()
        .map(|r| r.equity.len())
        .min()
        .unwrap_or(0);

    (0..common_len)
        .map(|t| {
            reports
                .iter()
                .zip(weights.iter())
                .map(|(r, w)| w * r.equity[t].strategy)
                .sum()
        })
        .collect()
}
