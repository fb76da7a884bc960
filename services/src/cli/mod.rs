mod matrix;
mod render;
mod vega;

pub use matrix::MatrixArgs;
pub use render::{RenderConfusionMatrix, render_confusion_matrix};
pub use vega::{VegaLiteGenerate, output_vega_lite_json};
