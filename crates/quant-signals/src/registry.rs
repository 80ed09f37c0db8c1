//! Generator registry for dynamic generator construction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use quant_core::error::ConfigError;

use crate::generators::{
    BollingerBreakout, BollingerBreakoutConfig, EmaCross, MaCrossConfig, MacdCross,
    MacdCrossConfig, RsiThreshold, RsiThresholdConfig, SignalGenerator, SmaCross,
};

/// Information about a registered signal generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Display name
    pub name: String,
    /// Description of the rule
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry of the built-in signal generators.
pub struct GeneratorRegistry {
    generators: HashMap<String, GeneratorInfo>,
}

impl GeneratorRegistry {
    /// Create a registry with all built-in generators.
    pub fn new() -> Self {
        let mut generators = HashMap::new();

        generators.insert(
            "sma_cross".to_string(),
            GeneratorInfo {
                name: "SMA Cross".to_string(),
                description: "Long while the fast SMA is above the slow SMA, short otherwise"
                    .to_string(),
                default_config: default_json(&MaCrossConfig::default()),
            },
        );

        generators.insert(
            "ema_cross".to_string(),
            GeneratorInfo {
                name: "EMA Cross".to_string(),
                description: "Long while the fast EMA is above the slow EMA, short otherwise"
                    .to_string(),
                default_config: default_json(&MaCrossConfig::default()),
            },
        );

        generators.insert(
            "macd_cross".to_string(),
            GeneratorInfo {
                name: "MACD Cross".to_string(),
                description: "Fires on the bar the MACD line crosses its signal line".to_string(),
                default_config: default_json(&MacdCrossConfig::default()),
            },
        );

        generators.insert(
            "rsi".to_string(),
            GeneratorInfo {
                name: "RSI Threshold".to_string(),
                description: "Long at or below the oversold threshold, short at or above the overbought threshold"
                    .to_string(),
                default_config: default_json(&RsiThresholdConfig::default()),
            },
        );

        generators.insert(
            "bollinger".to_string(),
            GeneratorInfo {
                name: "Bollinger Breakout".to_string(),
                description: "Fades closes outside the Bollinger bands".to_string(),
                default_config: default_json(&BollingerBreakoutConfig::default()),
            },
        );

        Self { generators }
    }

    /// List all available generators.
    pub fn list(&self) -> Vec<&GeneratorInfo> {
        self.generators.values().collect()
    }

    /// Get generator info by key.
    pub fn get(&self, key: &str) -> Option<&GeneratorInfo> {
        self.generators.get(key)
    }

    /// Check whether a generator exists.
    pub fn exists(&self, key: &str) -> bool {
        self.generators.contains_key(key)
    }

    /// All registered keys.
    pub fn keys(&self) -> Vec<&String> {
        self.generators.keys().collect()
    }

    /// Build a generator from a JSON configuration.
    pub fn create(
        &self,
        key: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn SignalGenerator>, ConfigError> {
        match key {
            "sma_cross" => {
                let config: MaCrossConfig = parse_config(config)?;
                config.validate()?;
                Ok(Box::new(SmaCross::new(config)))
            }
            "ema_cross" => {
                let config: MaCrossConfig = parse_config(config)?;
                config.validate()?;
                Ok(Box::new(EmaCross::new(config)))
            }
            "macd_cross" => {
                let config: MacdCrossConfig = parse_config(config)?;
                config.validate()?;
                Ok(Box::new(MacdCross::new(config)))
            }
            "rsi" => {
                let config: RsiThresholdConfig = parse_config(config)?;
                config.validate()?;
                Ok(Box::new(RsiThreshold::new(config)))
            }
            "bollinger" => {
                let config: BollingerBreakoutConfig = parse_config(config)?;
                config.validate()?;
                Ok(Box::new(BollingerBreakout::new(config)))
            }
            _ => Err(ConfigError::InvalidParameter(format!(
                "unknown generator: {key}"
            ))),
        }
    }

    /// Build a generator with its default configuration.
    pub fn create_default(&self, key: &str) -> Result<Box<dyn SignalGenerator>, ConfigError> {
        let info = self
            .get(key)
            .ok_or_else(|| ConfigError::InvalidParameter(format!("unknown generator: {key}")))?;
        self.create(key, info.default_config.clone())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn default_json<T: Serialize>(config: &T) -> serde_json::Value {
    serde_json::to_value(config).unwrap_or(serde_json::Value::Null)
}

fn parse_config<T: for<'de> Deserialize<'de>>(
    config: serde_json::Value,
) -> Result<T, ConfigError> {
    serde_json::from_value(config).map_err(|e| ConfigError::InvalidParameter(e.to_string()))
}
