//! Inkboard Render Library
//!
//! The raster surface behind the whiteboard. It owns the pixel buffer and
//! knows how to stroke segments, rectangle and circle outlines, clear itself
//! and encode its contents as PNG. It has no notion of tools or input.

mod export;
mod surface;

pub use export::ImageData;
pub use surface::{BACKGROUND, Surface, SurfaceSnapshot};

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<png::EncodingError> for RenderError {
    fn from(err: png::EncodingError) -> Self {
        RenderError::Encode(err.to_string())
    }
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
