//! Moving-average cross generators.
//!
//! Always directional while both averages are defined: LONG when the fast
//! average is above the slow, SHORT otherwise. There is no flat state for
//! this family; FLAT appears only inside the warm-up window.

use quant_core::{error::ConfigError, Signal};
use serde::{Deserialize, Serialize};

use crate::bundle::IndicatorBundle;
use crate::generators::SignalGenerator;

/// Configuration shared by the SMA and EMA cross generators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MaCrossConfig {
    /// Fast average period
    pub fast: usize,
    /// Slow average period
    pub slow: usize,
}

impl Default for MaCrossConfig {
    fn default() -> Self {
        Self { fast: 20, slow: 60 }
    }
}

impl MaCrossConfig {
    /// Validate the period pair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fast < 2 {
            return Err(ConfigError::InvalidParameter(
                "fast period must be at least 2".into(),
            ));
        }
        if self.fast >= self.slow {
            return Err(ConfigError::InvalidParameter(format!(
                "fast period {} must be less than slow period {}",
                self.fast, self.slow
            )));
        }
        Ok(())
    }
}

fn cross_signals(fast: &[f64], slow: &[f64]) -> Vec<Signal> {
    fast.iter()
        .zip(slow.iter())
        .map(|(&f, &s)| {
            if !f.is_finite() || !s.is_finite() {
                Signal::Flat
            } else if f > s {
                Signal::Long
            } else {
                Signal::Short
            }
        })
        .collect()
}

/// SMA fast/slow cross.
#[derive(Debug, Clone)]
pub struct SmaCross {
    config: MaCrossConfig,
}

impl SmaCross {
    /// Create a new SMA cross generator.
    pub fn new(config: MaCrossConfig) -> Self {
        Self { config }
    }

    /// The configured periods.
    pub fn config(&self) -> &MaCrossConfig {
        &self.config
    }
}

impl SignalGenerator for SmaCross {
    fn key(&self) -> &'static str {
        "sma_cross"
    }

    fn description(&self) -> &'static str {
        "Long while the fast SMA is above the slow SMA, short otherwise"
    }

    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>> {
        let fast = bundle.sma_fast.as_ref()?;
        let slow = bundle.sma_slow.as_ref()?;
        Some(cross_signals(fast, slow))
    }
}

/// EMA fast/slow cross.
#[derive(Debug, Clone)]
pub struct EmaCross {
    config: MaCrossConfig,
}

impl EmaCross {
    /// Create a new EMA cross generator.
    pub fn new(config: MaCrossConfig) -> Self {
        Self { config }
    }

    /// The configured periods.
    pub fn config(&self) -> &MaCrossConfig {
        &self.config
    }
}

impl SignalGenerator for EmaCross {
    fn key(&self) -> &'static str {
        "ema_cross"
    }

    fn description(&self) -> &'static str {
        "Long while the fast EMA is above the slow EMA, short otherwise"
    }

    fn generate(&self, bundle: &IndicatorBundle) -> Option<Vec<Signal>> {
        let fast = bundle.ema_fast.as_ref()?;
        let slow = bundle.ema_slow.as_ref()?;
        Some(cross_signals(fast, slow))
    }
}
