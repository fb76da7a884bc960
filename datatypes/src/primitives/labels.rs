use serde::{Deserialize, Serialize};

/// Display names of the predicted and actual classes.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct ClassLabels {
    pub predicted_negative: String,
    pub predicted_positive: String,
    pub actual_negative: String,
    pub actual_positive: String,
}

impl ClassLabels {
    /// Tick labels of the x axis, left to right
    pub fn x_ticks(&self) -> [&str; 2] {
        [&self.predicted_negative, &self.predicted_positive]
    }

    /// Tick labels of the y axis, top to bottom
    pub fn y_ticks(&self) -> [&str; 2] {
        [&self.actual_negative, &self.actual_positive]
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        Self {
            predicted_negative: "Predicted Negative".to_string(),
            predicted_positive: "Predicted Positive".to_string(),
            actual_negative: "Actual Negative".to_string(),
            actual_positive: "Actual Positive".to_string(),
        }
    }
}
