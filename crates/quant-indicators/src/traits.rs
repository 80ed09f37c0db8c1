//! Indicator trait definitions.

/// Trait for single-output technical indicators.
///
/// `calculate` returns one value per input element; indices inside the
/// warm-up window hold NaN.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data, aligned to the input.
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Number of leading outputs that are NaN.
    fn warmup(&self) -> usize;

    /// Name of the indicator.
    fn name(&self) -> &str;
}

/// Multi-output indicator (e.g. Bollinger Bands, MACD).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing the related values.
    type Outputs;

    /// Calculate indicator values for the given data, aligned to the input.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Number of leading outputs whose fields are NaN.
    fn warmup(&self) -> usize;

    /// Name of the indicator.
    fn name(&self) -> &str;
}
