//! Configuration management.

mod settings;

pub use settings::{
    parse_period_pair, AppConfig, AppSettings, BollingerSettings, IndicatorSettings,
    LoggingConfig, MaSettings, MacdSettings, RsiSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("QUANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quant.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[backtest]\n\
             initial_cash = 25000.0\n\
             fee_bps = 2.0\n\
             \n\
             [indicators.rsi]\n\
             enabled = true\n\
             period = 7\n\
             buy_threshold = 25.0\n\
             sell_threshold = 75.0\n"
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.backtest.initial_cash, 25000.0);
        assert_eq!(config.backtest.fee_bps, 2.0);
        assert_eq!(config.indicators.rsi.period, 7);
        // Untouched sections come from defaults
        assert_eq!(config.logging.level, "info");
        assert!(config.indicators.sma.enabled);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/quant.toml")).is_err());
    }
}
