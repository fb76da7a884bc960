use crate::error::RenderError;

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
