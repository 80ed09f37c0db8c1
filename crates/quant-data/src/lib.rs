//! Bar data ingestion.
//!
//! With network fetchers out of scope, CSV files are the one data path into
//! the engine.

pub mod csv_source;

pub use csv_source::CsvBarSource;
