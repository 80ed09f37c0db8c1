//! OHLC(V) bar types and stream validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One OHLCV observation at a point in time.
///
/// Uses f64 throughout: the engine works in fractional returns, not cash
/// accounting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume (0 when the source has none)
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    fn check(&self, index: usize) -> Result<(), DataError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(DataError::InvalidBar {
                    index,
                    reason: format!("{name} is not finite"),
                });
            }
        }
        if self.high < self.low {
            return Err(DataError::InvalidBar {
                index,
                reason: format!("high {} below low {}", self.high, self.low),
            });
        }
        Ok(())
    }
}

/// An ordered batch of bars for one symbol.
///
/// Unlike a live feed there is no eviction or capacity: the engine is a pure
/// computation over an already-materialized series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a series from already-collected bars.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    /// Number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The last bar, if any.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract timestamps as a vector.
    pub fn timestamps(&self) -> Vec<i64> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Validate the stream invariants: non-empty, strictly increasing
    /// timestamps, finite OHLC, high >= low.
    ///
    /// This is the single gate producing the fatal data errors; the engine
    /// refuses to emit partial results past it.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.bars.is_empty() {
            return Err(DataError::Empty);
        }
        for (i, bar) in self.bars.iter().enumerate() {
            bar.check(i)?;
            if i > 0 && bar.timestamp <= self.bars[i - 1].timestamp {
                return Err(DataError::NonMonotonicTimestamp {
                    index: i,
                    timestamp: bar.timestamp,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, close: f64) -> Bar {
        Bar::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
    }

    #[test]
    fn test_validate_ok() {
        let series = BarSeries::new("TEST", vec![bar(1, 100.0), bar(2, 101.0), bar(3, 99.0)]);
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let series = BarSeries::new("TEST", vec![]);
        assert!(matches!(series.validate(), Err(DataError::Empty)));
    }

    #[test]
    fn test_validate_duplicate_timestamp() {
        let series = BarSeries::new("TEST", vec![bar(1, 100.0), bar(1, 101.0)]);
        assert!(matches!(
            series.validate(),
            Err(DataError::NonMonotonicTimestamp { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_inverted_range() {
        let mut b = bar(1, 100.0);
        b.high = 90.0;
        let series = BarSeries::new("TEST", vec![b]);
        assert!(matches!(
            series.validate(),
            Err(DataError::InvalidBar { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut b = bar(1, 100.0);
        b.close = f64::NAN;
        let series = BarSeries::new("TEST", vec![b]);
        assert!(series.validate().is_err());
    }

}
