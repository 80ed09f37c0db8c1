//! Risk-based position sizing.

use quant_core::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const STOP_EPSILON: Decimal = dec!(0.000000000001);

/// Account-level risk parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Total account value in quote currency
    pub account_value: Decimal,
    /// Percent of the account risked per position
    pub risk_pct: Decimal,
    /// Leverage divisor; values below 1 are treated as 1
    pub leverage: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            account_value: dec!(10000),
            risk_pct: dec!(1),
            leverage: dec!(1),
        }
    }
}

impl RiskConfig {
    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_value <= Decimal::ZERO {
            return Err(ConfigError::InvalidParameter(format!(
                "account value {} must be positive",
                self.account_value
            )));
        }
        if self.risk_pct <= Decimal::ZERO || self.risk_pct > dec!(100) {
            return Err(ConfigError::InvalidParameter(format!(
                "risk percent {} must be in (0, 100]",
                self.risk_pct
            )));
        }
        Ok(())
    }
}

/// Advisory sizing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingRecord {
    /// Quote-currency amount at risk
    pub risk_amount: Decimal,
    /// Recommended notional, capped at the account value
    pub position_notional: Decimal,
    /// Recommended size in units of the instrument
    pub position_size: Decimal,
}

impl SizingRecord {
    fn zero() -> Self {
        Self {
            risk_amount: Decimal::ZERO,
            position_notional: Decimal::ZERO,
            position_size: Decimal::ZERO,
        }
    }
}

/// Converts account risk parameters and a stop-distance proxy into a
/// recommended position size.
#[derive(Debug, Clone)]
pub struct RiskSizer {
    config: RiskConfig,
}

impl RiskSizer {
    /// Create a new sizer.
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// The sizer's parameters.
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Compute the sizing record for the latest price.
    ///
    /// `stop_distance_fraction` is the stop distance as a fraction of price,
    /// typically ATR/price or a realized-volatility proxy. Fails closed:
    /// a non-positive price yields an all-zero record.
    pub fn size(&self, price: Decimal, stop_distance_fraction: Decimal) -> SizingRecord {
        if price <= Decimal::ZERO {
            return SizingRecord::zero();
        }

        let risk_amount = self.config.account_value * self.config.risk_pct / dec!(100);
        let stop = stop_distance_fraction.max(STOP_EPSILON);
        let leverage = self.config.leverage.max(Decimal::ONE);

        let position_notional = (risk_amount / stop / leverage).min(self.config.account_value);
        let position_size = position_notional / price;

        SizingRecord {
            risk_amount,
            position_notional,
            position_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sizing() {
        let sizer = RiskSizer::new(RiskConfig::default());
        let record = sizer.size(dec!(100), dec!(0.02));

        assert_eq!(record.risk_amount, dec!(100));
        assert_eq!(record.position_notional, dec!(5000));
        assert_eq!(record.position_size, dec!(50));
    }

    #[test]
    fn test_notional_clamped_to_account_value() {
        let sizer = RiskSizer::new(RiskConfig {
            account_value: dec!(4000),
            ..RiskConfig::default()
        });
        // Tight stop would size far beyond the account
        let record = sizer.size(dec!(100), dec!(0.002));

        assert_eq!(record.risk_amount, dec!(40));
        assert_eq!(record.position_notional, dec!(4000));
        assert_eq!(record.position_size, dec!(40));
    }

    #[test]
    fn test_leverage_divides_notional() {
        let sizer = RiskSizer::new(RiskConfig {
            leverage: dec!(2),
            ..RiskConfig::default()
        });
        let record = sizer.size(dec!(100), dec!(0.02));
        assert_eq!(record.position_notional, dec!(2500));
    }

    #[test]
    fn test_sub_unit_leverage_treated_as_one() {
        let sizer = RiskSizer::new(RiskConfig {
            leverage: dec!(0.5),
            ..RiskConfig::default()
        });
        let record = sizer.size(dec!(100), dec!(0.02));
        assert_eq!(record.position_notional, dec!(5000));
    }

    #[test]
    fn test_zero_stop_distance_is_guarded() {
        let sizer = RiskSizer::new(RiskConfig::default());
        let record = sizer.size(dec!(100), Decimal::ZERO);

        // Epsilon guard makes the raw size enormous; the account cap binds
        assert_eq!(record.position_notional, dec!(10000));
    }

    #[test]
    fn test_fails_closed_on_bad_price() {
        let sizer = RiskSizer::new(RiskConfig::default());
        assert_eq!(sizer.size(Decimal::ZERO, dec!(0.02)), SizingRecord::zero());
        assert_eq!(sizer.size(dec!(-5), dec!(0.02)), SizingRecord::zero());
    }

    #[test]
    fn test_config_validation() {
        assert!(RiskConfig::default().validate().is_ok());
        assert!(RiskConfig {
            account_value: Decimal::ZERO,
            ..RiskConfig::default()
        }
        .validate()
        .is_err());
        assert!(RiskConfig {
            risk_pct: dec!(101),
            ..RiskConfig::default()
        }
        .validate()
        .is_err());
    }
}
