use crate::error;
use crate::util::Result;
use plotters::style::{FontStyle, register_font};
use std::sync::LazyLock;

/// The family all plot texts are drawn with
pub const FONT_FAMILY: &str = "sans-serif";

/// DejaVu Sans is compiled into the binary, so rendering never depends on the fonts of the host
const DEJAVU_SANS: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

static REGISTRATION: LazyLock<Result<(), String>> = LazyLock::new(|| {
    register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).map_err(|_| String::from("invalid font data"))
});

/// Makes the embedded font available as [`FONT_FAMILY`].
///
/// The font is registered once per process, later calls only report the outcome.
pub fn ensure_font_registered() -> Result<()> {
    REGISTRATION
        .clone()
        .map_err(|details| error::RenderError::Font { details })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::IntoFont;

    #[test]
    fn it_registers_the_embedded_font() {
        ensure_font_registered().unwrap();
        ensure_font_registered().unwrap();

        let (width, height) = (FONT_FAMILY, 16).into_font().box_size("Prediction").unwrap();

        assert!(width > 0);
        assert!(height > 0);
    }

    #[test]
    fn longer_texts_are_wider() {
        ensure_font_registered().unwrap();

        let font = (FONT_FAMILY, 16).into_font();
        let (short, _) = font.box_size("1").unwrap();
        let (long, _) = font.box_size("286285").unwrap();

        assert!(long > short);
    }
}
