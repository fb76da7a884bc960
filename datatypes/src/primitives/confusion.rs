use serde::{Deserialize, Serialize};

/// The four outcome counts of a binary classification evaluation.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
}

impl ConfusionCounts {
    pub fn new(
        true_negatives: u64,
        false_positives: u64,
        false_negatives: u64,
        true_positives: u64,
    ) -> Self {
        Self {
            true_negatives,
            false_positives,
            false_negatives,
            true_positives,
        }
    }
}

/// A row-major 2x2 arrangement of [`ConfusionCounts`].
///
/// Rows are the actual classes, columns the predicted ones:
///
/// ```text
///                 predicted neg.  predicted pos.
/// actual neg.          TN              FP
/// actual pos.          FN              TP
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConfusionGrid([[u64; 2]; 2]);

impl ConfusionGrid {
    /// Iterates over `(row, column, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(column, value)| (row, column, *value))
        })
    }

    pub fn min_value(&self) -> u64 {
        self.cells().map(|(_, _, v)| v).min().unwrap_or_default()
    }

    pub fn max_value(&self) -> u64 {
        self.cells().map(|(_, _, v)| v).max().unwrap_or_default()
    }
}

impl From<ConfusionCounts> for ConfusionGrid {
    fn from(counts: ConfusionCounts) -> Self {
        Self([
            [counts.true_negatives, counts.false_positives],
            [counts.false_negatives, counts.true_positives],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_orders_cells_row_major() {
        let grid = ConfusionGrid::from(ConfusionCounts::new(286_285, 1, 3, 181));

        assert_eq!(
            grid.cells().collect::<Vec<_>>(),
            vec![(0, 0, 286_285), (0, 1, 1), (1, 0, 3), (1, 1, 181)]
        );
    }

    #[test]
    fn it_keeps_order_for_swapped_values() {
        let grid = ConfusionGrid::from(ConfusionCounts::new(4, 3, 2, 1));

        assert_eq!(
            grid.cells().map(|(_, _, value)| value).collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
    }

    #[test]
    fn it_computes_range() {
        let grid = ConfusionGrid::from(ConfusionCounts::new(10, 0, 7, 3));
        assert_eq!(grid.min_value(), 0);
        assert_eq!(grid.max_value(), 10);

        let zeros = ConfusionGrid::from(ConfusionCounts::default());
        assert_eq!(zeros.min_value(), 0);
        assert_eq!(zeros.max_value(), 0);
    }

    #[test]
    fn it_deserializes_counts() {
        let counts: ConfusionCounts = serde_json::from_str(
            r#"{"true_negatives": 286285, "false_positives": 1, "false_negatives": 3, "true_positives": 181}"#,
        )
        .unwrap();

        assert_eq!(counts, ConfusionCounts::new(286_285, 1, 3, 181));
    }
}
