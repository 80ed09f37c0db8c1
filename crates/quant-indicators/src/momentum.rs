//! Momentum indicators.

use serde::{Deserialize, Serialize};

use crate::traits::{Indicator, MultiOutputIndicator};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes to flag
/// overbought and oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Rsi {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() <= self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Seed averages over the first `period` changes
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.period {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                avg_gain += change;
            } else {
                avg_loss += -change;
            }
        }
        avg_gain /= period_f64;
        avg_loss /= period_f64;
        result[self.period] = rsi_value(avg_gain, avg_loss);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for i in (self.period + 1)..data.len() {
            let change = data[i] - data[i - 1];
            let (gain, loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss) / period_f64;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[inline]
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// MACD output for one bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of the MACD line)
    pub signal: f64,
    /// Histogram (MACD - signal)
    pub histogram: f64,
}

/// MACD (Moving Average Convergence Divergence).
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a MACD with the conventional (12, 26, 9) periods.
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let nan = MacdOutput {
            macd: f64::NAN,
            signal: f64::NAN,
            histogram: f64::NAN,
        };
        let mut result = vec![nan; data.len()];
        if data.len() < self.slow_period {
            return result;
        }

        let fast_ema = crate::Ema::new(self.fast_period).calculate(data);
        let slow_ema = crate::Ema::new(self.slow_period).calculate(data);

        // MACD line is defined wherever the slow EMA is
        let start = self.slow_period - 1;
        let macd_line: Vec<f64> = (start..data.len())
            .map(|i| fast_ema[i] - slow_ema[i])
            .collect();

        // Signal line is an EMA over the defined MACD region
        let signal_line = crate::Ema::new(self.signal_period).calculate(&macd_line);

        for (offset, i) in (start..data.len()).enumerate() {
            let macd = macd_line[offset];
            let signal = signal_line[offset];
            result[i] = MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            };
        }

        result
    }

    fn warmup(&self) -> usize {
        self.slow_period + self.signal_period - 2
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
