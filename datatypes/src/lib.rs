pub mod error;
pub mod operations;
pub mod plots;
pub mod primitives;
mod renderer;
pub mod util;

pub use error::RenderError;
pub use renderer::MatrixRenderer;
