//! Aligned per-indicator value columns.

use quant_indicators::{
    Atr, BollingerBands, Ema, Indicator, Macd, MultiOutputIndicator, Rsi, Sma,
};

/// The indicator columns a signal run consumes, all aligned 1:1 with the bar
/// index (NaN through each column's warm-up window).
///
/// Columns are optional: an absent column means the indicator is disabled and
/// its generator contributes nothing to the vote.
#[derive(Debug, Clone, Default)]
pub struct IndicatorBundle {
    pub close: Vec<f64>,
    pub sma_fast: Option<Vec<f64>>,
    pub sma_slow: Option<Vec<f64>>,
    pub ema_fast: Option<Vec<f64>>,
    pub ema_slow: Option<Vec<f64>>,
    pub macd: Option<Vec<f64>>,
    pub macd_signal: Option<Vec<f64>>,
    pub macd_hist: Option<Vec<f64>>,
    pub rsi: Option<Vec<f64>>,
    pub boll_upper: Option<Vec<f64>>,
    pub boll_lower: Option<Vec<f64>>,
    pub atr: Option<Vec<f64>>,
}

impl IndicatorBundle {
    /// Start a bundle from the close series.
    pub fn new(close: Vec<f64>) -> Self {
        Self {
            close,
            ..Default::default()
        }
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// Check if the bundle has no bars.
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Compute and attach fast/slow SMA columns.
    pub fn with_sma(mut self, fast: usize, slow: usize) -> Self {
        self.sma_fast = Some(Sma::new(fast).calculate(&self.close));
        self.sma_slow = Some(Sma::new(slow).calculate(&self.close));
        self
    }

    /// Compute and attach fast/slow EMA columns.
    pub fn with_ema(mut self, fast: usize, slow: usize) -> Self {
        self.ema_fast = Some(Ema::new(fast).calculate(&self.close));
        self.ema_slow = Some(Ema::new(slow).calculate(&self.close));
        self
    }

    /// Compute and attach the MACD line, signal line and histogram.
    pub fn with_macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        let outputs = Macd::with_periods(fast, slow, signal).calculate(&self.close);
        self.macd = Some(outputs.iter().map(|o| o.macd).collect());
        self.macd_signal = Some(outputs.iter().map(|o| o.signal).collect());
        self.macd_hist = Some(outputs.iter().map(|o| o.histogram).collect());
        self
    }

    /// Compute and attach the RSI column.
    pub fn with_rsi(mut self, period: usize) -> Self {
        self.rsi = Some(Rsi::new(period).calculate(&self.close));
        self
    }

    /// Compute and attach Bollinger band columns.
    pub fn with_bollinger(mut self, period: usize, width: f64) -> Self {
        let outputs = BollingerBands::with_params(period, width).calculate(&self.close);
        self.boll_upper = Some(outputs.iter().map(|o| o.upper).collect());
        self.boll_lower = Some(outputs.iter().map(|o| o.lower).collect());
        self
    }

    /// Compute and attach the ATR column from high/low series.
    pub fn with_atr(mut self, period: usize, high: &[f64], low: &[f64]) -> Self {
        self.atr = Some(Atr::new(period).calculate_ohlc(high, low, &self.close));
        self
    }

    /// Last defined ATR value, if the column exists and has warmed up.
    pub fn last_atr(&self) -> Option<f64> {
        self.atr
            .as_ref()
            .and_then(|a| a.last().copied())
            .filter(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_stay_aligned() {
        let close: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let bundle = IndicatorBundle::new(close)
            .with_sma(5, 10)
            .with_macd(12, 26, 9)
            .with_rsi(14)
            .with_bollinger(20, 2.0);

        assert_eq!(bundle.sma_fast.as_ref().unwrap().len(), 50);
        assert_eq!(bundle.macd_signal.as_ref().unwrap().len(), 50);
        assert_eq!(bundle.rsi.as_ref().unwrap().len(), 50);
        assert_eq!(bundle.boll_lower.as_ref().unwrap().len(), 50);
        assert!(bundle.ema_fast.is_none());
    }

    #[test]
    fn test_last_atr_requires_warmup() {
        let close: Vec<f64> = (0..5).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();

        let bundle = IndicatorBundle::new(close).with_atr(14, &high, &low);
        assert!(bundle.last_atr().is_none());
    }
}
