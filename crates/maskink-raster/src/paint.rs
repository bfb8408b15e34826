//! Brush segment rasterizer.
//!
//! Strokes arrive as consecutive image-space point pairs and are rasterized
//! immediately; nothing here retains stroke geometry. Each call composites a
//! whole capsule (circle brush) or dilated segment (square brush) in a single
//! pass, so overlapping pixels inside one segment are blended exactly once.

use crate::bitmap::MaskBitmap;
use crate::brush::{BrushConfig, BrushMode, BrushShape};
use kurbo::Point;
use peniko::Color;

/// Default mask highlight color: fully opaque white, the conventional
/// "selected region" color for downstream mask consumers.
pub const DEFAULT_TINT: Color = Color::WHITE;

/// Antialias ramp width in image pixels for the circle brush.
const AA_RAMP: f64 = 1.0;

/// Rasterize one stroke segment from `p1` to `p2` (image space) into the mask.
///
/// The image-space line width is `brush.size_px / view_scale`, which keeps the
/// apparent on-screen brush size constant regardless of zoom. A zero-length
/// segment still paints a full dot of the configured diameter, so a tap leaves
/// a mark.
///
/// Draw mode composites `tint` source-over at `brush.opacity`; erase mode
/// removes all coverage wherever the footprint touches, regardless of opacity.
pub fn paint_segment(
    bitmap: &mut MaskBitmap,
    p1: Point,
    p2: Point,
    brush: &BrushConfig,
    view_scale: f64,
    tint: Color,
) {
    debug_assert!(view_scale > 0.0);
    let radius = brush.size_px / view_scale / 2.0;
    if radius <= 0.0 || !radius.is_finite() {
        return;
    }

    // Bounding box of the dilated segment, padded for the antialias ramp and
    // clamped to the bitmap.
    let pad = radius + AA_RAMP;
    let x0 = (p1.x.min(p2.x) - pad).floor().max(0.0) as u32;
    let y0 = (p1.y.min(p2.y) - pad).floor().max(0.0) as u32;
    let x1 = ((p1.x.max(p2.x) + pad).ceil() as i64).clamp(0, bitmap.width() as i64) as u32;
    let y1 = ((p1.y.max(p2.y) + pad).ceil() as i64).clamp(0, bitmap.height() as i64) as u32;

    let rgba = tint.to_rgba8();
    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the pixel center.
            let c = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let coverage = match brush.shape {
                BrushShape::Circle => circle_coverage(c, p1, p2, radius),
                BrushShape::Square => square_coverage(c, p1, p2, radius),
            };
            if coverage <= 0.0 {
                continue;
            }
            match brush.mode {
                BrushMode::Draw => {
                    let a = bitmap.alpha(x, y) as f64 / 255.0;
                    let a_out = a + (1.0 - a) * brush.opacity * coverage;
                    bitmap.set_pixel(x, y, [rgba.r, rgba.g, rgba.b, (a_out * 255.0).round() as u8]);
                }
                // Erase is binary removal: any touched pixel loses all coverage.
                BrushMode::Erase => bitmap.set_pixel(x, y, [0, 0, 0, 0]),
            }
        }
    }
}

/// Coverage of a pixel center against the segment dilated by a disc, with a
/// one-pixel antialias ramp at the rim (round caps and joins fall out of the
/// capsule shape).
fn circle_coverage(c: Point, p1: Point, p2: Point, radius: f64) -> f64 {
    let d = distance_to_segment(c, p1, p2);
    ((radius + AA_RAMP / 2.0 - d) / AA_RAMP).clamp(0.0, 1.0)
}

/// Binary coverage of a pixel center against the segment dilated by an
/// axis-aligned square of half-extent `radius` (butt caps, hard edges).
///
/// The pixel is covered iff some t in [0, 1] keeps the point within the square
/// around `lerp(p1, p2, t)` on both axes, which reduces to intersecting two
/// per-axis t-intervals.
fn square_coverage(c: Point, p1: Point, p2: Point, radius: f64) -> f64 {
    let tx = axis_interval(c.x, p1.x, p2.x - p1.x, radius);
    let ty = axis_interval(c.y, p1.y, p2.y - p1.y, radius);
    match (tx, ty) {
        (Some((ax, bx)), Some((ay, by))) => {
            let lo = ax.max(ay).max(0.0);
            let hi = bx.min(by).min(1.0);
            if lo <= hi { 1.0 } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Interval of t where |c - (origin + t*delta)| <= half on one axis.
/// Returns None when empty, an unbounded interval is expressed as the full
/// parameter range.
fn axis_interval(c: f64, origin: f64, delta: f64, half: f64) -> Option<(f64, f64)> {
    if delta.abs() < f64::EPSILON {
        if (c - origin).abs() <= half {
            Some((f64::NEG_INFINITY, f64::INFINITY))
        } else {
            None
        }
    } else {
        let a = (c - half - origin) / delta;
        let b = (c + half - origin) / delta;
        Some((a.min(b), a.max(b)))
    }
}

/// Euclidean distance from a point to a segment.
fn distance_to_segment(c: Point, p1: Point, p2: Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return c.distance(p1);
    }
    let t = (((c.x - p1.x) * dx + (c.y - p1.y) * dy) / len_sq).clamp(0.0, 1.0);
    c.distance(Point::new(p1.x + t * dx, p1.y + t * dy))
}
