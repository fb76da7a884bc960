mod colorizer;
mod crop;
mod encode;
mod font;

pub use colorizer::{Breakpoint, Breakpoints, ColorMapper, Colorizer, RgbaColor};
pub use crop::crop_to_content;
pub use encode::{ImageFormat, ToImageBytes};
pub use font::{FONT_FAMILY, ensure_font_registered};
