use crate::error;
use crate::util::Result;
use image::{DynamicImage, RgbaImage};
use snafu::ResultExt;
use std::io::Cursor;
use std::path::Path;

/// Image formats the renderer can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Chooses the format by the file extension of `path`, defaulting to PNG if there is none
    ///
    /// # Examples
    ///
    /// ```
    /// use cmviz_datatypes::operations::image::ImageFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ImageFormat::from_path(Path::new("matrix.png")).unwrap(), ImageFormat::Png);
    /// assert_eq!(ImageFormat::from_path(Path::new("matrix.JPG")).unwrap(), ImageFormat::Jpeg);
    /// assert_eq!(ImageFormat::from_path(Path::new("matrix")).unwrap(), ImageFormat::Png);
    /// assert!(ImageFormat::from_path(Path::new("matrix.svg")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self> {
        let Some(extension) = path.extension() else {
            return Ok(Self::Png);
        };

        let extension = extension.to_string_lossy();

        match extension.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "tif" | "tiff" => Ok(Self::Tiff),
            _ => error::UnsupportedImageFormat {
                extension: extension.into_owned(),
            }
            .fail(),
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

pub trait ToImageBytes {
    /// Outputs the encoded bytes of the image in `format`
    fn to_image_bytes(&self, format: ImageFormat) -> Result<Vec<u8>>;
}

impl ToImageBytes for RgbaImage {
    fn to_image_bytes(&self, format: ImageFormat) -> Result<Vec<u8>> {
        let image = match format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.clone()).into_rgb8())
            }
            ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff => {
                DynamicImage::ImageRgba8(self.clone())
            }
        };

        let mut buffer = Cursor::new(Vec::new());

        image
            .write_to(&mut buffer, format.into())
            .context(error::ImageEncoding)?;

        Ok(buffer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::image::decode_rgba;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(8, 6, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([8, 48, 107, 255])
            } else {
                image::Rgba([247, 251, 255, 255])
            }
        })
    }

    #[test]
    fn lossless_formats_keep_pixels() {
        let image = checkerboard();

        for format in [ImageFormat::Png, ImageFormat::Bmp, ImageFormat::Tiff] {
            let bytes = image.to_image_bytes(format).unwrap();
            assert_eq!(
                image::guess_format(&bytes).unwrap(),
                image::ImageFormat::from(format)
            );
            assert_eq!(decode_rgba(&bytes), image, "{format:?}");
        }
    }

    #[test]
    fn jpeg_keeps_dimensions() {
        let bytes = checkerboard().to_image_bytes(ImageFormat::Jpeg).unwrap();

        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(decode_rgba(&bytes).dimensions(), (8, 6));
    }

    #[test]
    fn unknown_extensions_fail() {
        let error = ImageFormat::from_path(Path::new("out/matrix.pdf")).unwrap_err();

        assert!(matches!(
            error,
            crate::error::RenderError::UnsupportedImageFormat { extension } if extension == "pdf"
        ));
    }
}
