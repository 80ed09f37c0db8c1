//! Signal combination.
//!
//! Merges the per-indicator signal columns into one final series. The matrix
//! is column-major: one `Vec<Signal>` per generator, each one signal per bar.

use quant_core::Signal;
use serde::{Deserialize, Serialize};

/// How the per-indicator columns are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Long if any column is long and none is short; short mirrored.
    Or,
    /// Sign of the vote sum across columns.
    Majority,
    /// Directional only on unanimity among all columns.
    And,
}

impl Default for CombineMode {
    fn default() -> Self {
        Self::Majority
    }
}

impl CombineMode {
    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "or",
            Self::Majority => "majority",
            Self::And => "and",
        }
    }
}

/// Combine the signal columns into a single per-bar series.
///
/// `n_bars` fixes the output length; an empty matrix yields an all-flat
/// series of that length. Columns shorter than `n_bars` contribute FLAT
/// for their missing tail.
pub fn combine(matrix: &[Vec<Signal>], n_bars: usize, mode: CombineMode) -> Vec<Signal> {
    if matrix.is_empty() {
        return vec![Signal::Flat; n_bars];
    }

    (0..n_bars)
        .map(|bar| {
            let votes = matrix
                .iter()
                .map(|column| column.get(bar).copied().unwrap_or(Signal::Flat));
            combine_bar(votes, mode)
        })
        .collect()
}

fn combine_bar(votes: impl Iterator<Item = Signal>, mode: CombineMode) -> Signal {
    match mode {
        CombineMode::Or => {
            let mut any_long = false;
            let mut any_short = false;
            for vote in votes {
                match vote {
                    Signal::Long => any_long = true,
                    Signal::Short => any_short = true,
                    Signal::Flat => {}
                }
            }
            match (any_long, any_short) {
                (true, false) => Signal::Long,
                (false, true) => Signal::Short,
                _ => Signal::Flat,
            }
        }
        CombineMode::Majority => {
            let sum: i32 = votes.map(Signal::value).sum();
            Signal::from_sign(sum as f64)
        }
        CombineMode::And => {
            let mut unanimous: Option<Signal> = None;
            for vote in votes {
                if vote.is_flat() {
                    return Signal::Flat;
                }
                match unanimous {
                    None => unanimous = Some(vote),
                    Some(first) if first != vote => return Signal::Flat,
                    Some(_) => {}
                }
            }
            unanimous.unwrap_or(Signal::Flat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Signal::{Flat, Long, Short};

    // Rows here are bars; transpose into the column-major matrix.
    fn matrix(rows: &[[Signal; 2]]) -> Vec<Vec<Signal>> {
        let mut cols = vec![Vec::new(), Vec::new()];
        for row in rows {
            cols[0].push(row[0]);
            cols[1].push(row[1]);
        }
        cols
    }

    #[test]
    fn test_majority_vote_sum() {
        let m = matrix(&[
            [Long, Long],
            [Long, Short],
            [Short, Short],
            [Flat, Flat],
        ]);
        assert_eq!(
            combine(&m, 4, CombineMode::Majority),
            vec![Long, Flat, Short, Flat]
        );
    }

    #[test]
    fn test_and_requires_unanimity() {
        let m = matrix(&[
            [Long, Long],
            [Long, Short],
            [Short, Short],
            [Flat, Flat],
        ]);
        assert_eq!(
            combine(&m, 4, CombineMode::And),
            vec![Long, Flat, Short, Flat]
        );

        // A single flat vote breaks unanimity
        let m = matrix(&[[Long, Long], [Long, Flat]]);
        assert_eq!(combine(&m, 2, CombineMode::And), vec![Long, Flat]);
    }

    #[test]
    fn test_or_is_vetoed_by_opposition() {
        let m = matrix(&[[Long, Flat], [Long, Short], [Flat, Short], [Flat, Flat]]);
        assert_eq!(
            combine(&m, 4, CombineMode::Or),
            vec![Long, Flat, Short, Flat]
        );
    }

    #[test]
    fn test_empty_matrix_is_all_flat() {
        for mode in [CombineMode::Or, CombineMode::Majority, CombineMode::And] {
            assert_eq!(combine(&[], 3, mode), vec![Flat, Flat, Flat]);
        }
    }

    #[test]
    fn test_short_column_pads_flat() {
        let m = vec![vec![Long, Long], vec![Long]];
        // Bar 1 sees [Long, Flat]: majority long, AND flat
        assert_eq!(combine(&m, 2, CombineMode::Majority), vec![Long, Long]);
        assert_eq!(combine(&m, 2, CombineMode::And), vec![Long, Flat]);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&CombineMode::Majority).unwrap(),
            "\"majority\""
        );
        let mode: CombineMode = serde_json::from_str("\"and\"").unwrap();
        assert_eq!(mode, CombineMode::And);
    }
}
