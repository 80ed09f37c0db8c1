//! Rule-based trade advice from the latest indicator readings.
//!
//! Advisory only: the output is a conviction score with per-rule reasons,
//! a discrete decision, and ATR-derived stop/target levels around the last
//! close. Nothing here feeds back into the backtest pipeline.

use quant_indicators::{Indicator, RollingStd};
use quant_signals::IndicatorBundle;
use serde::{Deserialize, Serialize};

const STOP_MULT: f64 = 1.2;
const TARGET_MULT: f64 = 2.0;
const HOLD_STOP_MULT: f64 = 1.0;
const HOLD_TARGET_MULT: f64 = 1.8;
const VOL_PROXY_WINDOW: usize = 14;

/// Thresholds the advisory rules read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdvisorParams {
    /// RSI oversold threshold
    pub rsi_buy: f64,
    /// RSI overbought threshold
    pub rsi_sell: f64,
}

impl Default for AdvisorParams {
    fn default() -> Self {
        Self {
            rsi_buy: 30.0,
            rsi_sell: 70.0,
        }
    }
}

/// Discrete advisory call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accumulate,
    Hold,
    Reduce,
}

/// Full advisory output for the latest bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advice {
    pub decision: Decision,
    /// Summed rule score; accumulate at >= +3, reduce at <= -2
    pub score: i32,
    /// One entry per rule that fired
    pub reasons: Vec<String>,
    pub last_close: f64,
    /// ATR, or the realized-volatility fallback when ATR is unavailable
    pub atr: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// Score the latest bar's readings and derive stop/target levels.
///
/// Returns `None` on an empty bundle. Absent indicator columns simply
/// contribute no rule, mirroring how disabled indicators drop out of the
/// signal vote.
pub fn advise(bundle: &IndicatorBundle, params: AdvisorParams) -> Option<Advice> {
    let last_close = bundle.close.last().copied().filter(|c| c.is_finite())?;

    let mut score = 0;
    let mut reasons = Vec::new();

    if let (Some(fast), Some(slow)) = (last_of(&bundle.sma_fast), last_of(&bundle.sma_slow)) {
        if fast > slow && last_close > fast {
            score += 2;
            reasons.push("bullish MA alignment with price above the fast average".to_string());
        } else if fast < slow && last_close < fast {
            score -= 2;
            reasons.push("bearish MA alignment with price below the fast average".to_string());
        }
    }

    if let (Some(macd), Some(signal), Some(hist)) = (
        last_of(&bundle.macd),
        last_of(&bundle.macd_signal),
        last_of(&bundle.macd_hist),
    ) {
        if macd > signal && hist > 0.0 {
            score += 2;
            reasons.push("MACD above its signal line with a positive histogram".to_string());
        } else if macd < signal && hist < 0.0 {
            score -= 2;
            reasons.push("MACD below its signal line with a negative histogram".to_string());
        }
    }

    if let Some(rsi) = last_of(&bundle.rsi) {
        if (45.0..=70.0).contains(&rsi) {
            score += 1;
            reasons.push("RSI firm but not overheated".to_string());
        } else if rsi >= params.rsi_sell {
            score -= 1;
            reasons.push("RSI overheated".to_string());
        } else if rsi <= params.rsi_buy {
            score += 1;
            reasons.push("RSI oversold".to_string());
        }
    }

    let decision = if score >= 3 {
        Decision::Accumulate
    } else if score <= -2 {
        Decision::Reduce
    } else {
        Decision::Hold
    };

    let atr = bundle
        .last_atr()
        .unwrap_or_else(|| realized_vol_proxy(&bundle.close, last_close));

    let (stop_loss, take_profit) = match decision {
        Decision::Accumulate => (
            last_close - STOP_MULT * atr,
            last_close + TARGET_MULT * atr,
        ),
        Decision::Reduce => (
            last_close + STOP_MULT * atr,
            last_close - TARGET_MULT * atr,
        ),
        Decision::Hold => (
            last_close - HOLD_STOP_MULT * atr,
            last_close + HOLD_TARGET_MULT * atr,
        ),
    };

    Some(Advice {
        decision,
        score,
        reasons,
        last_close,
        atr,
        stop_loss,
        take_profit,
    })
}

fn last_of(column: &Option<Vec<f64>>) -> Option<f64> {
    column
        .as_ref()
        .and_then(|c| c.last().copied())
        .filter(|v| v.is_finite())
}

/// Rolling stdev of close-to-close returns, scaled back to price. Zero when
/// the series is too short for the window.
fn realized_vol_proxy(close: &[f64], last_close: f64) -> f64 {
    let returns: Vec<f64> = close
        .windows(2)
        .map(|w| if w[0] != 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
        .collect();

    RollingStd::new(VOL_PROXY_WINDOW)
        .calculate(&returns)
        .last()
        .copied()
        .filter(|v| v.is_finite())
        .map(|sd| sd * last_close)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bullish_bundle() -> IndicatorBundle {
        let mut bundle = IndicatorBundle::new(vec![100.0, 102.0, 104.0, 110.0]);
        bundle.sma_fast = Some(vec![f64::NAN, f64::NAN, 103.0, 105.0]);
        bundle.sma_slow = Some(vec![f64::NAN, f64::NAN, 101.0, 102.0]);
        bundle.macd = Some(vec![0.0, 0.1, 0.5, 1.0]);
        bundle.macd_signal = Some(vec![0.0, 0.0, 0.2, 0.4]);
        bundle.macd_hist = Some(vec![0.0, 0.1, 0.3, 0.6]);
        bundle.rsi = Some(vec![50.0, 52.0, 55.0, 60.0]);
        bundle.atr = Some(vec![f64::NAN, 2.0, 2.0, 2.0]);
        bundle
    }

    #[test]
    fn test_full_bullish_stack_accumulates() {
        let advice = advise(&bullish_bundle(), AdvisorParams::default()).unwrap();

        assert_eq!(advice.score, 5);
        assert_eq!(advice.decision, Decision::Accumulate);
        assert_eq!(advice.reasons.len(), 3);
        assert_relative_eq!(advice.stop_loss, 110.0 - 1.2 * 2.0);
        assert_relative_eq!(advice.take_profit, 110.0 + 2.0 * 2.0);
    }

    #[test]
    fn test_bearish_stack_reduces() {
        let mut bundle = IndicatorBundle::new(vec![110.0, 106.0, 102.0, 98.0]);
        bundle.sma_fast = Some(vec![f64::NAN, f64::NAN, 104.0, 101.0]);
        bundle.sma_slow = Some(vec![f64::NAN, f64::NAN, 106.0, 104.0]);
        bundle.macd = Some(vec![0.0, -0.2, -0.6, -1.0]);
        bundle.macd_signal = Some(vec![0.0, 0.0, -0.2, -0.4]);
        bundle.macd_hist = Some(vec![0.0, -0.2, -0.4, -0.6]);
        bundle.atr = Some(vec![f64::NAN, 2.0, 2.0, 2.0]);

        let advice = advise(&bundle, AdvisorParams::default()).unwrap();

        assert_eq!(advice.score, -4);
        assert_eq!(advice.decision, Decision::Reduce);
        assert_relative_eq!(advice.stop_loss, 98.0 + 1.2 * 2.0);
        assert_relative_eq!(advice.take_profit, 98.0 - 2.0 * 2.0);
    }

    #[test]
    fn test_no_columns_holds_with_wide_band() {
        let close: Vec<f64> = (0..30)
            .map(|i| 100.0 * (1.0 + 0.01 * (i as f64 * 0.7).sin()))
            .collect();
        let bundle = IndicatorBundle::new(close);
        let advice = advise(&bundle, AdvisorParams::default()).unwrap();

        assert_eq!(advice.score, 0);
        assert_eq!(advice.decision, Decision::Hold);
        assert!(advice.reasons.is_empty());
        // Fallback volatility proxy gives a usable band
        assert!(advice.atr > 0.0);
        assert!(advice.stop_loss < advice.last_close);
        assert!(advice.take_profit > advice.last_close);
    }

    #[test]
    fn test_overheated_rsi_counts_against() {
        let mut bundle = bullish_bundle();
        bundle.rsi = Some(vec![50.0, 60.0, 75.0, 85.0]);

        let advice = advise(&bundle, AdvisorParams::default()).unwrap();
        // +2 MA, +2 MACD, -1 RSI
        assert_eq!(advice.score, 3);
        assert!(advice.reasons.iter().any(|r| r.contains("overheated")));
    }

    #[test]
    fn test_empty_bundle_yields_none() {
        let bundle = IndicatorBundle::new(Vec::new());
        assert!(advise(&bundle, AdvisorParams::default()).is_none());
    }

    #[test]
    fn test_hold_band_multipliers() {
        let mut bundle = IndicatorBundle::new(vec![100.0; 5]);
        bundle.atr = Some(vec![1.0; 5]);

        let advice = advise(&bundle, AdvisorParams::default()).unwrap();
        assert_eq!(advice.decision, Decision::Hold);
        assert_relative_eq!(advice.stop_loss, 99.0);
        assert_relative_eq!(advice.take_profit, 101.8);
    }
}
