use std::path::Path;

/// Compare an image file with encoded image bytes pixel by pixel
///
/// # Panics
/// - if the `expected` image cannot be loaded
/// - if the `found` bytes cannot be loaded as an image
/// - if the images differ
///
pub fn assert_image_equals(expected: &Path, found: &[u8]) {
    let left_buf = std::fs::read(expected).expect("Failed to read `expected` path");
    let left = decode_rgba(&left_buf);
    let right = decode_rgba(found);

    assert_eq!(left.dimensions(), right.dimensions(), "Image sizes differ: {expected:?}");
    assert!(left == right, "Images differ: {expected:?}");
}

/// Decode encoded image bytes of any supported format into RGBA pixels
///
/// # Panics
/// - if the bytes cannot be loaded as an image
///
pub fn decode_rgba(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes)
        .expect("Failed to make image from bytes")
        .to_rgba8()
}
