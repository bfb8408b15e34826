//! Error types for raster operations.

use thiserror::Error;

/// Errors from raster encoding and decoding.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;
