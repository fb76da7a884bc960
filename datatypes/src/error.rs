use plotters::drawing::DrawingAreaErrorKind;
use snafu::Snafu;
use std::path::PathBuf;

/// The error type of everything that happens between receiving the counts and
/// persisting the rendered image.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum RenderError {
    #[snafu(display("Plot exception: {}", details))]
    Plot { details: String },

    #[snafu(display("Unable to load the plot font: {}", details))]
    Font { details: String },

    #[snafu(display("Colorizer exception: {}", details))]
    Colorizer { details: String },

    #[snafu(display(
        "Unsupported image format `{}`, expected one of png, jpg, jpeg, bmp, tif or tiff",
        extension
    ))]
    UnsupportedImageFormat { extension: String },

    #[snafu(display("Unable to encode image: {}", source))]
    ImageEncoding { source: image::ImageError },

    #[snafu(display("Unable to create output file in `{}`: {}", directory.display(), source))]
    CreateOutputFile {
        directory: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write output file `{}`: {}", path.display(), source))]
    WriteOutputFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to persist output file `{}`: {}", path.display(), source))]
    PersistOutputFile {
        path: PathBuf,
        source: tempfile::PersistError,
    },
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync,
{
    fn from(source: DrawingAreaErrorKind<E>) -> Self {
        Self::Plot {
            details: source.to_string(),
        }
    }
}
