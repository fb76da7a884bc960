use crate::operations::image::{ImageFormat, ToImageBytes};
use crate::plots::{ConfusionMatrixHeatmap, Plot};
use crate::primitives::{ClassLabels, ConfusionCounts};
use crate::util::Result;
use crate::util::fs::write_atomically;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{Level, span};

/// Renders confusion matrices as annotated heatmaps into image files.
///
/// The nominal figure size defaults to 600x500 pixels. The written image is cropped to
/// its content, so its actual size differs from the nominal one.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct MatrixRenderer {
    pub width_px: u32,
    pub height_px: u32,
}

impl Default for MatrixRenderer {
    fn default() -> Self {
        Self {
            width_px: 600,
            height_px: 500,
        }
    }
}

impl MatrixRenderer {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Renders `counts` as a heatmap and writes it to `output_path`.
    ///
    /// The image format is derived from the file extension. An existing file is replaced,
    /// a failed render leaves `output_path` untouched.
    pub fn render(
        &self,
        counts: ConfusionCounts,
        title: &str,
        output_path: &Path,
        labels: &ClassLabels,
    ) -> Result<PathBuf> {
        let span = span!(Level::DEBUG, "render", output = %output_path.display());
        let _enter = span.enter();

        let format = ImageFormat::from_path(output_path)?;

        let heatmap = ConfusionMatrixHeatmap::new(counts.into(), labels.clone(), title);
        let image = heatmap.to_image(self.width_px, self.height_px)?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            ?format,
            "rendered confusion matrix"
        );

        let bytes = image.to_image_bytes(format)?;

        write_atomically(output_path, &bytes)?;

        tracing::debug!(bytes = bytes.len(), "wrote confusion matrix");

        Ok(output_path.to_path_buf())
    }
}
