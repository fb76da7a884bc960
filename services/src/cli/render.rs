use super::MatrixArgs;
use crate::config::{self, ConfusionMatrix, get_config_element};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Renders the confusion matrix into an image file
#[derive(Debug, Default, Parser)]
pub struct RenderConfusionMatrix {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Output file, its extension selects the image format (png, jpg, bmp or tiff)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Nominal figure width in pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Nominal figure height in pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,
}

/// Renders the confusion matrix and reports the written file on `STDOUT`
#[allow(clippy::print_stdout)]
pub fn render_confusion_matrix(params: RenderConfusionMatrix) -> Result<PathBuf> {
    let matrix_config: ConfusionMatrix = get_config_element()?;
    let plot_config: config::Plot = get_config_element()?;

    let mut renderer = plot_config.renderer();
    if let Some(width) = params.width {
        renderer.width_px = width;
    }
    if let Some(height) = params.height {
        renderer.height_px = height;
    }

    let counts = params.matrix.counts(&matrix_config);
    let title = params.matrix.title(&matrix_config);
    let output = params.output.unwrap_or(matrix_config.output_file);

    tracing::info!(?counts, output = %output.display(), "rendering confusion matrix");

    let written = renderer.render(counts, &title, &output, &matrix_config.labels)?;

    println!("Saved confusion matrix as: {}", written.display());

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use cmviz_datatypes::RenderError;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_writes_the_image() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("matrix.png");

        let written = render_confusion_matrix(RenderConfusionMatrix {
            output: Some(output.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(written, output);

        let image = image::open(&output).unwrap();
        assert!(image.width() > 0);
        assert!(image.height() > 0);
    }

    #[test]
    #[serial]
    fn it_fails_for_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("matrix.png");

        let error = render_confusion_matrix(RenderConfusionMatrix {
            output: Some(output.clone()),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(
            error,
            Error::Render {
                source: RenderError::CreateOutputFile { .. }
            }
        ));
        assert!(!output.exists());
    }

    #[test]
    #[serial]
    fn it_renders_all_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("zeros.bmp");

        render_confusion_matrix(RenderConfusionMatrix {
            matrix: MatrixArgs {
                true_negatives: Some(0),
                false_positives: Some(0),
                false_negatives: Some(0),
                true_positives: Some(0),
                title: Some("Nothing".to_string()),
            },
            output: Some(output.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            image::ImageFormat::from_path(&output).unwrap(),
            image::ImageFormat::Bmp
        );
        assert!(image::open(&output).is_ok());
    }
}
