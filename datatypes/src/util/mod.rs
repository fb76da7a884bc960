pub mod fs;
pub mod image;
mod result;

pub use result::Result;
