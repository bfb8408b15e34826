//! Lossless PNG export of the mask.

use crate::bitmap::MaskBitmap;
use crate::error::RasterResult;

/// Encode the mask as an RGBA8 PNG at its native pixel dimensions.
///
/// The output is independent of any viewport state: painted pixels carry
/// their composited tint and alpha, everything else is fully transparent.
pub fn encode_png(bitmap: &MaskBitmap) -> RasterResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, bitmap.width(), bitmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bitmap.as_bytes())?;
        writer.finish()?;
    }
    log::debug!(
        "encoded mask {}x{} to {} PNG bytes",
        bitmap.width(),
        bitmap.height(),
        out.len()
    );
    Ok(out)
}
