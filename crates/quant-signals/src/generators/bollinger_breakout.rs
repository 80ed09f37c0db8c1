//! Bollinger breakout generator.
//!
//! Mean-reversion reading: a close above the upper band is treated as
//! overextension (SHORT), a close below the lower band as capitulation
//! (LONG).

use quant_core::{error::ConfigError, Signal};
use serde::{Deserialize, Serialize};

use crate::bundle::IndicatorBundle;
use crate::generators::SignalGenerator;

/// Bollinger breakout configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBreakoutConfig {
    /// Band lookback window
    pub period: usize,
    /// Band width in standard deviations
    pub width: f64,
}

impl Default for BollingerBreakoutConfig {
    fn default() -> Self {
        Self {
            period: 20,
            width: 2.0,
        }
    }
}

impl BollingerBreakoutConfig {
    /// Validate window and width.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period < 2 {
            return Err(ConfigError::InvalidParameter(
                "Bollinger window must be at least 2".into(),
            ));
        }
        if self.width <= 0.0 || !self.width.is_finite() {
            return Err(ConfigError::InvalidParameter(format!(
                "Bollinger width {} must be positive",
                self.width
            )));
        }
        Ok(())
    }
}

/// Close outside the Bollinger bands.
#[derive(Debug, Clone)]
pub struct BollingerBreakout {
    config: BollingerBreakoutConfig,
}

impl BollingerBreakout {
    /// Create a new Bollinger breakout generator.
    pub fn new(config: BollingerBreakoutConfig) -> Self {
        Self { config }
    }

    /// The configured window.
    pub fn config(&self) -> &BollingerBreakoutConfig {
        &self.config
    }
}

impl SignalGenerator for BollingerBreakout {
    fn key(&self) -> &'static str {
        "bollinger"
    }

    fn description(&self) -> &'static str {
        "Short when the close breaks above the upper band, long when it breaks below the lower band"
    }

    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>> {
        let upper = bundle.boll_upper.as_ref()?;
        let lower = bundle.boll_lower.as_ref()?;

        Some(
            bundle
                .close
                .iter()
                .zip(upper.iter().zip(lower.iter()))
                .map(|(&close, (&up, &lo))| {
                    if !up.is_finite() || !lo.is_finite() || !close.is_finite() {
                        Signal::Flat
                    } else if close > up {
                        Signal::Short
                    } else if close < lo {
                        Signal::Long
                    } else {
                        Signal::Flat
                    }
                })
                .collect(),
        )
    }
}
