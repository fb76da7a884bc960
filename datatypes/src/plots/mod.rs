mod class_axis;
mod confusion_matrix;

pub use class_axis::ClassAxis;
pub use confusion_matrix::ConfusionMatrixHeatmap;
use crate::util::Result;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

pub trait Plot {
    /// Creates a Vega string for embedding it into a Html page
    ///
    /// # Errors
    ///
    /// This method fails on internal errors of the plot.
    ///
    fn to_vega_embeddable(&self) -> Result<PlotData>;

    /// Renders the plot into an image whose nominal size is `width_px` x `height_px`.
    ///
    /// The result is cropped to the plot's content, so it may be smaller or larger than
    /// the nominal size.
    fn to_image(&self, width_px: u32, height_px: u32) -> Result<RgbaImage>;
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotData {
    pub vega_string: String,
    pub metadata: PlotMetaData,
}

/// The value range the plot's color scale covers
#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotMetaData {
    pub color_scale_min: f64,
    pub color_scale_max: f64,
}
