//! Directional signal values.

use serde::{Deserialize, Serialize};

/// A discrete per-bar directional reading.
///
/// One series per enabled indicator, aligned to the bar index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Long,
    Flat,
    Short,
}

impl Signal {
    /// Numeric vote value: LONG = +1, FLAT = 0, SHORT = -1.
    #[inline]
    pub fn value(self) -> i32 {
        match self {
            Signal::Long => 1,
            Signal::Flat => 0,
            Signal::Short => -1,
        }
    }

    /// Map the sign of a number onto a signal. NaN maps to FLAT.
    #[inline]
    pub fn from_sign(x: f64) -> Self {
        if x > 0.0 {
            Signal::Long
        } else if x < 0.0 {
            Signal::Short
        } else {
            Signal::Flat
        }
    }

    #[inline]
    pub fn is_flat(self) -> bool {
        self == Signal::Flat
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Signal::Long.value(), 1);
        assert_eq!(Signal::Flat.value(), 0);
        assert_eq!(Signal::Short.value(), -1);
    }

    #[test]
    fn test_from_sign_nan_is_flat() {
        assert_eq!(Signal::from_sign(f64::NAN), Signal::Flat);
        assert_eq!(Signal::from_sign(2.5), Signal::Long);
        assert_eq!(Signal::from_sign(-0.1), Signal::Short);
        assert_eq!(Signal::from_sign(0.0), Signal::Flat);
    }
}
