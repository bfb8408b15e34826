//! Editor error types.

use maskink_raster::RasterError;
use thiserror::Error;

/// Errors surfaced by the editor facade.
///
/// Undo/redo at the stack boundary is deliberately not represented here: it
/// is a no-op, observable only through `can_undo`/`can_redo`.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
    #[error("invalid brush config: {0}")]
    InvalidBrushConfig(String),
    #[error("no image loaded")]
    NotLoaded,
    #[error("mask export failed: {0}")]
    Export(#[from] RasterError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
