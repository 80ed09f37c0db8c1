//! CSV bar source.

use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use quant_core::error::DataError;
use quant_core::{Bar, BarSeries};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// CSV source for historical OHLC bars.
pub struct CsvBarSource {
    path: PathBuf,
}

impl CsvBarSource {
    /// Create a source for a CSV file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load and validate the full series for a symbol.
    ///
    /// Rows are sorted ascending by timestamp before validation, so an
    /// unordered file is fine but duplicate timestamps are still fatal.
    pub fn load(&self, symbol: &str) -> Result<BarSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::Parse(e.to_string()))?;

        let mut bars = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;
            let timestamp = parse_timestamp(&record.date)?;
            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        bars.sort_by_key(|b| b.timestamp);

        let series = BarSeries::new(symbol, bars);
        series.validate()?;
        Ok(series)
    }
}

/// Parse the timestamp formats seen in exchange and Yahoo exports.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    if let Ok(ts) = date_str.parse::<i64>() {
        // More than 10 digits means the value is already in milliseconds
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return Ok(ts * 1000);
    }

    Err(DataError::Parse(format!(
        "could not parse date: {date_str}"
    )))
}
