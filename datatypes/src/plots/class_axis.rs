use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use std::ops::Range;

const AXIS_LENGTH: f64 = 2.;

/// An axis over two classes.
///
/// Each class occupies a band of length one on a continuous `[0, 2]` axis, so that cells
/// can be drawn as rectangles between band edges while the key points stay at the band
/// centers, where the class labels belong.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassAxis;

impl ClassAxis {
    /// The band that contains `position`, counted along the axis
    fn band_at(position: f64) -> usize {
        usize::from(position >= 1.)
    }

    /// The label of the column at `position` of a horizontal axis
    pub fn column_label(position: f64, labels: [&str; 2]) -> String {
        labels[Self::band_at(position)].to_string()
    }

    /// The label of the row at `position` of a vertical axis.
    ///
    /// Rows are counted from the top while the axis grows upwards.
    pub fn row_label(position: f64, labels: [&str; 2]) -> String {
        labels[1 - Self::band_at(position)].to_string()
    }

    /// The `(left, right)` edges of `column`
    pub fn column_band(column: usize) -> (f64, f64) {
        let left = column as f64;
        (left, left + 1.)
    }

    /// The `(top, bottom)` edges of `row`
    pub fn row_band(row: usize) -> (f64, f64) {
        let top = AXIS_LENGTH - row as f64;
        (top, top - 1.)
    }
}

impl Ranged for ClassAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let fraction = value / AXIS_LENGTH;
        limit.0 + (fraction * f64::from(limit.1 - limit.0)).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        vec![0.5, 1.5]
    }

    fn range(&self) -> Range<f64> {
        0.0..AXIS_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X_LABELS: [&str; 2] = ["Predicted Negative", "Predicted Positive"];
    const Y_LABELS: [&str; 2] = ["Actual Negative", "Actual Positive"];

    #[test]
    fn key_points_are_band_centers() {
        let axis = ClassAxis;

        let labels: Vec<String> = axis
            .key_points(10)
            .into_iter()
            .map(|position| ClassAxis::column_label(position, X_LABELS))
            .collect();

        assert_eq!(labels, vec!["Predicted Negative", "Predicted Positive"]);
    }

    #[test]
    fn rows_are_counted_from_the_top() {
        let (top, bottom) = ClassAxis::row_band(0);
        assert_eq!((top, bottom), (2., 1.));
        assert_eq!(ClassAxis::row_label(1.5, Y_LABELS), "Actual Negative");

        let (top, bottom) = ClassAxis::row_band(1);
        assert_eq!((top, bottom), (1., 0.));
        assert_eq!(ClassAxis::row_label(0.5, Y_LABELS), "Actual Positive");
    }

    #[test]
    fn columns_are_counted_from_the_left() {
        assert_eq!(ClassAxis::column_band(0), (0., 1.));
        assert_eq!(ClassAxis::column_band(1), (1., 2.));
        assert_eq!(ClassAxis::column_label(0.5, X_LABELS), "Predicted Negative");
        assert_eq!(ClassAxis::column_label(1.5, X_LABELS), "Predicted Positive");
    }

    #[test]
    fn it_maps_linearly() {
        let axis = ClassAxis;

        assert_eq!(axis.map(&0., (10, 210)), 10);
        assert_eq!(axis.map(&1., (10, 210)), 110);
        assert_eq!(axis.map(&2., (10, 210)), 210);
        // vertical axes are mapped from the bottom pixel to the top one
        assert_eq!(axis.map(&2., (300, 100)), 100);
    }
}
