//! RSI threshold generator.

use quant_core::{error::ConfigError, Signal};
use serde::{Deserialize, Serialize};

use crate::bundle::IndicatorBundle;
use crate::generators::SignalGenerator;

/// RSI threshold configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiThresholdConfig {
    /// RSI lookback period
    pub period: usize,
    /// Oversold threshold: RSI at or below this reads LONG
    pub buy_threshold: f64,
    /// Overbought threshold: RSI at or above this reads SHORT
    pub sell_threshold: f64,
}

impl Default for RsiThresholdConfig {
    fn default() -> Self {
        Self {
            period: 14,
            buy_threshold: 30.0,
            sell_threshold: 70.0,
        }
    }
}

impl RsiThresholdConfig {
    /// Validate thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period < 2 {
            return Err(ConfigError::InvalidParameter(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.buy_threshold >= self.sell_threshold {
            return Err(ConfigError::InvalidParameter(format!(
                "RSI buy threshold {} must be below sell threshold {}",
                self.buy_threshold, self.sell_threshold
            )));
        }
        Ok(())
    }
}

/// Oversold/overbought RSI readings.
#[derive(Debug, Clone)]
pub struct RsiThreshold {
    config: RsiThresholdConfig,
}

impl RsiThreshold {
    /// Create a new RSI threshold generator.
    pub fn new(config: RsiThresholdConfig) -> Self {
        Self { config }
    }

    /// The configured thresholds.
    pub fn config(&self) -> &RsiThresholdConfig {
        &self.config
    }
}

impl SignalGenerator for RsiThreshold {
    fn key(&self) -> &'static str {
        "rsi"
    }

    fn description(&self) -> &'static str {
        "Long when RSI is at or below the oversold threshold, short at or above the overbought threshold"
    }

    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>> {
        let rsi = bundle.rsi.as_ref()?;
        let buy = self.config.buy_threshold;
        let sell = self.config.sell_threshold;

        Some(
            rsi.iter()
                .map(|&value| {
                    if !value.is_finite() {
                        Signal::Flat
                    } else if value <= buy {
                        Signal::Long
                    } else if value >= sell {
                        Signal::Short
                    } else {
                        Signal::Flat
                    }
                })
                .collect(),
        )
    }
}
