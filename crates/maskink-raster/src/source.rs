//! The immutable source image under the mask.

use crate::error::RasterResult;

/// A decoded, read-only RGBA8 image. The editor never mutates it; it exists
/// to size the mask and to let hosts render the backdrop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl SourceImage {
    /// Wrap an already-decoded RGBA8 buffer. Dimension validation happens at
    /// `MaskEditor::load`, which is the only consumer that can reject it.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when the buffer length matches `width * height * 4`.
    pub fn buffer_consistent(&self) -> bool {
        self.pixels.len() as u64 == self.width as u64 * self.height as u64 * 4
    }
}

/// Decode an encoded image (PNG, JPEG or WebP) into a `SourceImage`.
///
/// Hosts that receive uploads as encoded bytes use this before `load`.
pub fn decode_source(bytes: &[u8]) -> RasterResult<SourceImage> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    log::debug!("decoded source image {width}x{height}");
    Ok(SourceImage::from_rgba8(width, height, decoded.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::MaskBitmap;
    use crate::encode::encode_png;

    #[test]
    fn test_buffer_consistency() {
        let good = SourceImage::from_rgba8(2, 3, vec![0; 24]);
        assert!(good.buffer_consistent());
        let bad = SourceImage::from_rgba8(2, 3, vec![0; 23]);
        assert!(!bad.buffer_consistent());
    }

    #[test]
    fn test_decode_roundtrips_dimensions() {
        // Encode a small bitmap to PNG, then decode it back as a source image.
        let bitmap = MaskBitmap::blank(7, 5);
        let png = encode_png(&bitmap).unwrap();
        let source = decode_source(&png).unwrap();
        assert_eq!(source.width(), 7);
        assert_eq!(source.height(), 5);
        assert!(source.buffer_consistent());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_source(&[0, 1, 2, 3]).is_err());
    }
}
