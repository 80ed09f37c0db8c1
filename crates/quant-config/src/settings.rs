//! Configuration structures.
//!
//! Indicator settings degrade gracefully: `sanitize` disables any block whose
//! parameters fail validation and reports what it disabled, instead of
//! aborting the whole run over one bad threshold.

use quant_core::error::ConfigError;
use quant_core::BarSeries;
use quant_backtest::BacktestConfig;
use quant_risk::RiskConfig;
use quant_signals::{
    BollingerBreakout, BollingerBreakoutConfig, EmaCross, IndicatorBundle, MaCrossConfig,
    MacdCross, MacdCrossConfig, RsiThreshold, RsiThresholdConfig, SignalGenerator, SmaCross,
};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub backtest: BacktestConfig,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub risk: RiskConfig,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quant-terminal".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Fast/slow moving-average pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaSettings {
    pub enabled: bool,
    pub fast: usize,
    pub slow: usize,
}

impl MaSettings {
    fn to_config(&self) -> MaCrossConfig {
        MaCrossConfig {
            fast: self.fast,
            slow: self.slow,
        }
    }
}

/// MACD period triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdSettings {
    pub enabled: bool,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl MacdSettings {
    fn to_config(&self) -> MacdCrossConfig {
        MacdCrossConfig {
            fast: self.fast,
            slow: self.slow,
            signal: self.signal,
        }
    }
}

/// RSI window and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiSettings {
    pub enabled: bool,
    pub period: usize,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
}

impl RsiSettings {
    fn to_config(&self) -> RsiThresholdConfig {
        RsiThresholdConfig {
            period: self.period,
            buy_threshold: self.buy_threshold,
            sell_threshold: self.sell_threshold,
        }
    }
}

/// Bollinger band window and width.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerSettings {
    pub enabled: bool,
    pub period: usize,
    pub width: f64,
}

impl BollingerSettings {
    fn to_config(&self) -> BollingerBreakoutConfig {
        BollingerBreakoutConfig {
            period: self.period,
            width: self.width,
        }
    }
}

/// Per-indicator enable flags and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSettings {
    #[serde(default = "IndicatorSettings::default_sma")]
    pub sma: MaSettings,
    #[serde(default = "IndicatorSettings::default_ema")]
    pub ema: MaSettings,
    #[serde(default = "IndicatorSettings::default_macd")]
    pub macd: MacdSettings,
    #[serde(default = "IndicatorSettings::default_rsi")]
    pub rsi: RsiSettings,
    #[serde(default = "IndicatorSettings::default_bollinger")]
    pub bollinger: BollingerSettings,
    /// ATR window for stop/target levels
    #[serde(default = "IndicatorSettings::default_atr_period")]
    pub atr_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            sma: Self::default_sma(),
            ema: Self::default_ema(),
            macd: Self::default_macd(),
            rsi: Self::default_rsi(),
            bollinger: Self::default_bollinger(),
            atr_period: Self::default_atr_period(),
        }
    }
}

impl IndicatorSettings {
    fn default_sma() -> MaSettings {
        MaSettings {
            enabled: true,
            fast: 20,
            slow: 60,
        }
    }

    fn default_ema() -> MaSettings {
        MaSettings {
            enabled: false,
            fast: 12,
            slow: 26,
        }
    }

    fn default_macd() -> MacdSettings {
        MacdSettings {
            enabled: true,
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }

    fn default_rsi() -> RsiSettings {
        RsiSettings {
            enabled: true,
            period: 14,
            buy_threshold: 30.0,
            sell_threshold: 70.0,
        }
    }

    fn default_bollinger() -> BollingerSettings {
        BollingerSettings {
            enabled: false,
            period: 20,
            width: 2.0,
        }
    }

    fn default_atr_period() -> usize {
        14
    }

    /// Disable any enabled block whose parameters fail validation.
    ///
    /// Returns one warning per disabled indicator; an empty vec means the
    /// settings were already clean.
    pub fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.sma.enabled {
            if let Err(e) = self.sma.to_config().validate() {
                self.sma.enabled = false;
                warnings.push(format!("disabling SMA cross: {e}"));
            }
        }
        if self.ema.enabled {
            if let Err(e) = self.ema.to_config().validate() {
                self.ema.enabled = false;
                warnings.push(format!("disabling EMA cross: {e}"));
            }
        }
        if self.macd.enabled {
            if let Err(e) = self.macd.to_config().validate() {
                self.macd.enabled = false;
                warnings.push(format!("disabling MACD cross: {e}"));
            }
        }
        if self.rsi.enabled {
            if let Err(e) = self.rsi.to_config().validate() {
                self.rsi.enabled = false;
                warnings.push(format!("disabling RSI threshold: {e}"));
            }
        }
        if self.bollinger.enabled {
            if let Err(e) = self.bollinger.to_config().validate() {
                self.bollinger.enabled = false;
                warnings.push(format!("disabling Bollinger breakout: {e}"));
            }
        }

        warnings
    }

    /// Compute the indicator columns the enabled generators need, plus ATR
    /// for the advisory stop levels.
    pub fn build_bundle(&self, series: &BarSeries) -> IndicatorBundle {
        let mut bundle = IndicatorBundle::new(series.closes());

        if self.sma.enabled {
            bundle = bundle.with_sma(self.sma.fast, self.sma.slow);
        }
        if self.ema.enabled {
            bundle = bundle.with_ema(self.ema.fast, self.ema.slow);
        }
        if self.macd.enabled {
            bundle = bundle.with_macd(self.macd.fast, self.macd.slow, self.macd.signal);
        }
        if self.rsi.enabled {
            bundle = bundle.with_rsi(self.rsi.period);
        }
        if self.bollinger.enabled {
            bundle = bundle.with_bollinger(self.bollinger.period, self.bollinger.width);
        }

        bundle.with_atr(self.atr_period, &series.highs(), &series.lows())
    }

    /// Instantiate the enabled generators.
    pub fn build_generators(&self) -> Vec<Box<dyn SignalGenerator>> {
        let mut generators: Vec<Box<dyn SignalGenerator>> = Vec::new();

        if self.sma.enabled {
            generators.push(Box::new(SmaCross::new(self.sma.to_config())));
        }
        if self.ema.enabled {
            generators.push(Box::new(EmaCross::new(self.ema.to_config())));
        }
        if self.macd.enabled {
            generators.push(Box::new(MacdCross::new(self.macd.to_config())));
        }
        if self.rsi.enabled {
            generators.push(Box::new(RsiThreshold::new(self.rsi.to_config())));
        }
        if self.bollinger.enabled {
            generators.push(Box::new(BollingerBreakout::new(self.bollinger.to_config())));
        }

        generators
    }
}

/// Parse a "fast,slow" period pair as entered on the command line.
pub fn parse_period_pair(input: &str) -> Result<(usize, usize), ConfigError> {
    let malformed = |reason: &str| ConfigError::MalformedPeriods {
        input: input.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = input.split(',').map(str::trim);
    let fast = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("expected two comma-separated periods"))?;
    let slow = parts
        .next()
        .ok_or_else(|| malformed("expected two comma-separated periods"))?;
    if parts.next().is_some() {
        return Err(malformed("expected exactly two periods"));
    }

    let fast = fast
        .parse::<usize>()
        .map_err(|_| malformed("periods must be positive integers"))?;
    let slow = slow
        .parse::<usize>()
        .map_err(|_| malformed("periods must be positive integers"))?;
    Ok((fast, slow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_core::Bar;

    fn series(n: usize) -> BarSeries {
        let bars = (0..n)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.3).sin() * 5.0;
                Bar::new(i as i64 * 86_400_000, c, c + 1.0, c - 1.0, c, 0.0)
            })
            .collect();
        BarSeries::new("TEST", bars)
    }

    #[test]
    fn test_defaults_are_clean() {
        let mut settings = IndicatorSettings::default();
        assert!(settings.sanitize().is_empty());
    }

    #[test]
    fn test_sanitize_disables_bad_block_only() {
        let mut settings = IndicatorSettings::default();
        settings.sma.fast = 60;
        settings.sma.slow = 20;

        let warnings = settings.sanitize();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("SMA"));
        assert!(!settings.sma.enabled);
        // The other indicators survive
        assert!(settings.macd.enabled);
        assert!(settings.rsi.enabled);
    }

    #[test]
    fn test_build_bundle_respects_flags() {
        let settings = IndicatorSettings::default();
        let bundle = settings.build_bundle(&series(100));

        assert!(bundle.sma_fast.is_some());
        assert!(bundle.macd.is_some());
        assert!(bundle.rsi.is_some());
        assert!(bundle.ema_fast.is_none());
        assert!(bundle.boll_upper.is_none());
        assert!(bundle.atr.is_some());
    }

    #[test]
    fn test_build_generators_matches_enabled_count() {
        let settings = IndicatorSettings::default();
        // sma, macd, rsi enabled by default
        assert_eq!(settings.build_generators().len(), 3);

        let mut all_off = IndicatorSettings::default();
        all_off.sma.enabled = false;
        all_off.macd.enabled = false;
        all_off.rsi.enabled = false;
        assert!(all_off.build_generators().is_empty());
    }

    #[test]
    fn test_parse_period_pair() {
        assert_eq!(parse_period_pair("20,60").unwrap(), (20, 60));
        assert_eq!(parse_period_pair(" 5 , 10 ").unwrap(), (5, 10));
        assert!(parse_period_pair("20").is_err());
        assert!(parse_period_pair("20,60,90").is_err());
        assert!(parse_period_pair("fast,slow").is_err());
        assert!(parse_period_pair("").is_err());
    }
}
