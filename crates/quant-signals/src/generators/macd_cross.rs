//! MACD cross generator.
//!
//! Event, not state: a signal fires only on the bar where the MACD line
//! crosses its signal line (previous bar on the other side), every other bar
//! is FLAT.

use quant_core::{error::ConfigError, Signal};
use serde::{Deserialize, Serialize};

use crate::bundle::IndicatorBundle;
use crate::generators::SignalGenerator;

/// MACD cross configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdCrossConfig {
    /// Fast EMA period
    pub fast: usize,
    /// Slow EMA period
    pub slow: usize,
    /// Signal line EMA period
    pub signal: usize,
}

impl Default for MacdCrossConfig {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

impl MacdCrossConfig {
    /// Validate the period triple.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return Err(ConfigError::InvalidParameter(
                "MACD periods must be positive".into(),
            ));
        }
        if self.fast >= self.slow {
            return Err(ConfigError::InvalidParameter(format!(
                "MACD fast period {} must be less than slow period {}",
                self.fast, self.slow
            )));
        }
        Ok(())
    }
}

/// MACD line / signal line crossover events.
#[derive(Debug, Clone)]
pub struct MacdCross {
    config: MacdCrossConfig,
}

impl MacdCross {
    /// Create a new MACD cross generator.
    pub fn new(config: MacdCrossConfig) -> Self {
        Self { config }
    }

    /// The configured periods.
    pub fn config(&self) -> &MacdCrossConfig {
        &self.config
    }
}

impl SignalGenerator for MacdCross {
    fn key(&self) -> &'static str {
        "macd_cross"
    }

    fn description(&self) -> &'static str {
        "Long on the bar the MACD line crosses above its signal line, short on the crossing below"
    }

    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>> {
        let macd = bundle.macd.as_ref()?;
        let signal = bundle.macd_signal.as_ref()?;

        let n = macd.len().min(signal.len());
        let mut out = vec![Signal::Flat; n];

        for i in 1..n {
            let defined = macd[i].is_finite()
                && signal[i].is_finite()
                && macd[i - 1].is_finite()
                && signal[i - 1].is_finite();
            if !defined {
                continue;
            }
            if macd[i - 1] <= signal[i - 1] && macd[i] > signal[i] {
                out[i] = Signal::Long;
            } else if macd[i - 1] >= signal[i - 1] && macd[i] < signal[i] {
                out[i] = Signal::Short;
            }
        }

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_from(macd: Vec<f64>, signal: Vec<f64>) -> IndicatorBundle {
        let mut bundle = IndicatorBundle::new(vec![100.0; macd.len()]);
        bundle.macd = Some(macd);
        bundle.macd_signal = Some(signal);
        bundle
    }

    #[test]
    fn test_cross_up_fires_once() {
        let bundle = bundle_from(
            vec![-1.0, -0.5, 0.5, 1.0, 1.5],
            vec![0.0, 0.0, 0.0, 0.0, 0.0],
        );
        let out = MacdCross::new(MacdCrossConfig::default())
            .generate(&bundle)
            .unwrap();

        assert_eq!(
            out,
            vec![
                Signal::Flat,
                Signal::Flat,
                Signal::Long,
                Signal::Flat,
                Signal::Flat
            ]
        );
    }

    #[test]
    fn test_cross_down_fires_once() {
        let bundle = bundle_from(vec![1.0, 0.2, -0.3, -0.6], vec![0.0, 0.0, 0.0, 0.0]);
        let out = MacdCross::new(MacdCrossConfig::default())
            .generate(&bundle)
            .unwrap();

        assert_eq!(
            out,
            vec![Signal::Flat, Signal::Flat, Signal::Short, Signal::Flat]
        );
    }

    #[test]
    fn test_nan_suppresses_events() {
        let bundle = bundle_from(vec![f64::NAN, 0.5, 1.0], vec![0.0, 0.0, 0.0]);
        let out = MacdCross::new(MacdCrossConfig::default())
            .generate(&bundle)
            .unwrap();

        // The bar after a NaN cannot establish a crossing
        assert_eq!(out, vec![Signal::Flat, Signal::Flat, Signal::Flat]);
    }

    #[test]
    fn test_touch_then_break_counts_as_cross() {
        // Previous bar exactly on the line still arms a crossing
        let bundle = bundle_from(vec![0.0, 0.5], vec![0.0, 0.0]);
        let out = MacdCross::new(MacdCrossConfig::default())
            .generate(&bundle)
            .unwrap();

        assert_eq!(out, vec![Signal::Flat, Signal::Long]);
    }

    #[test]
    fn test_config_validation() {
        assert!(MacdCrossConfig::default().validate().is_ok());
        assert!(MacdCrossConfig {
            fast: 26,
            slow: 12,
            signal: 9
        }
        .validate()
        .is_err());
    }
}
