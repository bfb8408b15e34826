//! MaskInk Raster Library
//!
//! Pixel-level building blocks for the mask editor: the mask bitmap, the
//! brush segment rasterizer, and lossless raster I/O.

pub mod bitmap;
pub mod brush;
pub mod encode;
pub mod error;
pub mod paint;
pub mod source;

pub use bitmap::MaskBitmap;
pub use brush::{BrushConfig, BrushMode, BrushShape};
pub use encode::encode_png;
pub use error::RasterError;
pub use paint::{paint_segment, DEFAULT_TINT};
pub use source::{decode_source, SourceImage};
