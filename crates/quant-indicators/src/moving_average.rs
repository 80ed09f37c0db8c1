//! Moving average indicators.

use crate::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum, then sliding window
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = sum / period_f64;

        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = sum / period_f64;
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first N values, then decays exponentially.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut result = vec![f64::NAN; data.len()];
        if data.len() < self.period {
            return result;
        }

        // Seed with SMA
        let mut ema: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result[self.period - 1] = ema;

        let one_minus_mult = 1.0 - self.multiplier;
        for i in self.period..data.len() {
            ema = data[i] * self.multiplier + ema * one_minus_mult;
            result[i] = ema;
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_aligned() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[3] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[4] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let result = sma.calculate(&[1.0, 2.0, 3.0]);

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_ema_aligned() {
        let ema = Ema::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = ema.calculate(&data);

        assert_eq!(result.len(), 5);
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10); // seed SMA
        // mult = 2/(3+1) = 0.5; result[3] = 4*0.5 + 2*0.5 = 3.0
        assert!((result[3] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_warmup_lengths() {
        assert_eq!(Sma::new(20).warmup(), 19);
        assert_eq!(Ema::new(12).warmup(), 11);
    }
}
