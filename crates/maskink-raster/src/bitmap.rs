//! The mutable mask raster.

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A mutable RGBA8 raster holding the painted mask.
///
/// Dimensions are fixed at construction and never change; replacing the
/// source image replaces the bitmap wholesale. A blank bitmap is fully
/// transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MaskBitmap {
    /// Create a fully transparent bitmap of the given dimensions.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// Bitmap width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Write one pixel. Panics when out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Alpha channel of one pixel.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y) + 3]
    }

    /// Reset every pixel to fully transparent without reallocating.
    pub fn clear_in_place(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite this bitmap's contents with a copy of another bitmap.
    /// Panics when dimensions differ; callers uphold the fixed-size invariant.
    pub fn copy_from(&mut self, other: &MaskBitmap) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "mask bitmap dimensions are fixed after load"
        );
        self.data.copy_from_slice(&other.data);
    }

    /// True when no pixel carries any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}
