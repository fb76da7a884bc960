use image::{Rgba, RgbaImage, imageops};

/// Crops `image` to the pixels that differ from `background` and surrounds them with
/// `padding` pixels of `background`.
///
/// An image without content is returned unchanged.
pub fn crop_to_content(image: &RgbaImage, background: Rgba<u8>, padding: u32) -> RgbaImage {
    let Some((left, top, right, bottom)) = content_bounds(image, background) else {
        return image.clone();
    };

    let content =
        imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image();

    let mut cropped = RgbaImage::from_pixel(
        content.width() + 2 * padding,
        content.height() + 2 * padding,
        background,
    );
    imageops::replace(&mut cropped, &content, i64::from(padding), i64::from(padding));

    cropped
}

/// The inclusive bounds `(left, top, right, bottom)` of all non-background pixels
fn content_bounds(image: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel != background)
        .fold(None, |bounds, (x, y, _)| match bounds {
            None => Some((x, y, x, y)),
            Some((left, top, right, bottom)) => {
                Some((left.min(x), top.min(y), right.max(x), bottom.max(y)))
            }
        })
}
