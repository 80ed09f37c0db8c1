//! Turnover-based transaction costs.

/// Per-bar transaction cost as a fraction of equity.
///
/// `cost[t] = (fee_bps + slippage_bps) / 10_000 * |position[t] - position[t-1]|`,
/// with the initial entry charged at bar 0 when `position[0] != 0`. Every
/// element is non-negative.
pub fn turnover_costs(positions: &[f64], fee_bps: f64, slippage_bps: f64) -> Vec<f64> {
    let rate = (fee_bps + slippage_bps) / 10_000.0;
    let mut prev = 0.0;

    positions
        .iter()
        .map(|&pos| {
            let cost = rate * (pos - prev).abs();
            prev = pos;
            cost
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_charges_on_turnover_only() {
        // Enter long at bar 1, flip short at bar 3
        let costs = turnover_costs(&[0.0, 1.0, 1.0, -1.0, -1.0], 10.0, 5.0);
        let rate = 15.0 / 10_000.0;

        assert_eq!(costs[0], 0.0);
        assert_relative_eq!(costs[1], rate);
        assert_eq!(costs[2], 0.0);
        assert_relative_eq!(costs[3], 2.0 * rate); // flip turns over twice the size
        assert_eq!(costs[4], 0.0);
    }

    #[test]
    fn test_initial_entry_charged_at_bar_zero() {
        let costs = turnover_costs(&[1.0, 1.0], 10.0, 0.0);
        assert_relative_eq!(costs[0], 10.0 / 10_000.0);
        assert_eq!(costs[1], 0.0);
    }

    #[test]
    fn test_zero_fees_are_free() {
        let costs = turnover_costs(&[0.0, 1.0, -1.0], 0.0, 0.0);
        assert!(costs.iter().all(|&c| c == 0.0));
    }
}
