//! Technical indicators feeding the signal generators.
//!
//! Every indicator returns a vector the same length as its input, with
//! `f64::NAN` through the warm-up window, so outputs stay aligned 1:1 with
//! the bar index and downstream code never has to re-align truncated series.

pub mod momentum;
pub mod moving_average;
pub mod traits;
pub mod volatility;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use traits::{Indicator, MultiOutputIndicator};
pub use volatility::{Atr, BollingerBands, BollingerOutput, RollingStd};
