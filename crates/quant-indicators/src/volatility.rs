//! Volatility indicators.

use serde::{Deserialize, Serialize};

use crate::traits::{Indicator, MultiOutputIndicator};

/// Rolling standard deviation.
#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
}

impl RollingStd {
    /// Create a new rolling standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl Indicator for RollingStd {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;
        for (i, window) in data.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
            result[i + self.period - 1] = variance.sqrt();
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "RollingStd"
    }
}

/// Average True Range (ATR).
///
/// Wilder-smoothed true range, the stop-distance proxy used by the risk
/// sizer and the advisory module.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate ATR from OHLC data, aligned to the bar index.
    pub fn calculate_ohlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        let len = high.len().min(low.len()).min(close.len());
        let mut result = vec![f64::NAN; len];
        if len < self.period + 1 {
            return result;
        }

        // True range needs the previous close, so it starts at bar 1
        let mut tr = Vec::with_capacity(len - 1);
        for i in 1..len {
            let high_low = high[i] - low[i];
            let high_close = (high[i] - close[i - 1]).abs();
            let low_close = (low[i] - close[i - 1]).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }

        let period_f64 = self.period as f64;

        // Initial ATR is the SMA of the first `period` true ranges
        let mut atr: f64 = tr[..self.period].iter().sum::<f64>() / period_f64;
        result[self.period] = atr;

        // Wilder's smoothing
        for (j, &tr_val) in tr.iter().enumerate().skip(self.period) {
            atr = (atr * (period_f64 - 1.0) + tr_val) / period_f64;
            result[j + 1] = atr;
        }

        result
    }

    /// Number of leading outputs that are NaN.
    pub fn warmup(&self) -> usize {
        self.period
    }
}

/// Bollinger Bands output for one bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

/// Bollinger Bands.
///
/// Middle band is an SMA; upper and lower bands sit a multiple of the
/// rolling standard deviation away.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create Bollinger Bands with the conventional (20, 2.0) parameters.
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        let nan = BollingerOutput {
            upper: f64::NAN,
            middle: f64::NAN,
            lower: f64::NAN,
        };
        let mut result = vec![nan; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;
        for (i, window) in data.windows(self.period).enumerate() {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
            let band_width = self.std_dev_multiplier * variance.sqrt();

            result[i + self.period - 1] = BollingerOutput {
                upper: mean + band_width,
                middle: mean,
                lower: mean - band_width,
            };
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_std() {
        let std_dev = RollingStd::new(3);
        let data = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let result = std_dev.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[1].is_nan());
        // First window: [2, 4, 6], mean = 4, variance = 8/3
        assert!((result[2] - (8.0f64 / 3.0).sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_atr_ohlc_aligned() {
        let atr = Atr::new(3);
        let high = vec![10.0, 11.0, 12.0, 11.0, 13.0, 14.0];
        let low = vec![8.0, 9.0, 10.0, 9.0, 11.0, 12.0];
        let close = vec![9.0, 10.0, 11.0, 10.0, 12.0, 13.0];

        let result = atr.calculate_ohlc(&high, &low, &close);
        assert_eq!(result.len(), 6);
        assert!(result[..3].iter().all(|v| v.is_nan()));
        for value in &result[3..] {
            assert!(*value > 0.0);
        }
    }

    #[test]
    fn test_bollinger_ordering() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.len(), data.len());
        assert!(result[18].upper.is_nan());
        for output in &result[19..] {
            assert!(output.upper > output.middle);
            assert!(output.middle > output.lower);
        }
    }

    #[test]
    fn test_bollinger_constant_price_collapses() {
        let bb = BollingerBands::with_params(5, 2.0);
        let data = vec![100.0; 6];

        let result = bb.calculate(&data);
        let last = result.last().unwrap();
        assert!((last.upper - 100.0).abs() < 1e-10);
        assert!((last.lower - 100.0).abs() < 1e-10);
    }
}
