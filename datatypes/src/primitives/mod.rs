mod confusion;
mod labels;

pub use confusion::{ConfusionCounts, ConfusionGrid};
pub use labels::ClassLabels;
