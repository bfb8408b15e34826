//! Viewport transform between screen and image space.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower bound on the viewport scale.
pub const MIN_SCALE: f64 = 0.2;
/// Default upper bound on the viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Affine mapping from image space to screen space:
/// `screen = image * scale + offset`.
///
/// Owns the pan/zoom state for one editor. The offset is deliberately
/// unclamped: the image may be panned fully out of view (free-pan UX).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Uniform scale factor, kept within `[min_scale, max_scale]`.
    pub scale: f64,
    /// Screen-space translation of the image origin.
    pub offset: Vec2,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the image inside the container and center it.
    ///
    /// The fit scale never exceeds 100%: small images are shown at native
    /// size, not upscaled. Called on load and on container resize.
    pub fn fit(&mut self, container: Size, image: Size) {
        if image.width <= 0.0 || image.height <= 0.0 {
            return;
        }
        let scale = (container.width / image.width)
            .min(container.height / image.height)
            .min(1.0);
        self.scale = scale.clamp(self.min_scale, self.max_scale);
        self.offset = Vec2::new(
            (container.width - image.width * self.scale) / 2.0,
            (container.height - image.height * self.scale) / 2.0,
        );
    }

    /// Convert a screen point to image coordinates.
    pub fn to_image(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Convert an image point to screen coordinates.
    pub fn to_screen(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.offset.x,
            image.y * self.scale + self.offset.y,
        )
    }

    /// Zoom by `factor`, keeping the image point under `screen` fixed.
    ///
    /// When clamping produces no scale change the call is a no-op, so hitting
    /// a zoom bound never drifts the offset.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        // Anchor: the image point currently under the cursor stays put.
        let image_point = self.to_image(screen);
        self.scale = new_scale;
        let moved = self.to_screen(image_point);
        self.offset += Vec2::new(screen.x - moved.x, screen.y - moved.y);
    }

    /// Pan by a screen-space delta. No clamping by design.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fit_exact_container() {
        let mut vp = Viewport::new();
        vp.fit(Size::new(400.0, 400.0), Size::new(400.0, 400.0));
        assert!((vp.scale - 1.0).abs() < EPS);
        assert!(vp.offset.x.abs() < EPS);
        assert!(vp.offset.y.abs() < EPS);
    }

    #[test]
    fn test_fit_never_upscales() {
        let mut vp = Viewport::new();
        vp.fit(Size::new(800.0, 600.0), Size::new(200.0, 100.0));
        assert!((vp.scale - 1.0).abs() < EPS);
        // Centered at native size.
        assert!((vp.offset.x - 300.0).abs() < EPS);
        assert!((vp.offset.y - 250.0).abs() < EPS);
    }

    #[test]
    fn test_fit_downscales_and_centers() {
        let mut vp = Viewport::new();
        vp.fit(Size::new(400.0, 400.0), Size::new(800.0, 400.0));
        assert!((vp.scale - 0.5).abs() < EPS);
        assert!(vp.offset.x.abs() < EPS);
        assert!((vp.offset.y - 100.0).abs() < EPS);
    }

    #[test]
    fn test_fit_respects_min_scale() {
        let mut vp = Viewport::new();
        vp.fit(Size::new(100.0, 100.0), Size::new(10_000.0, 10_000.0));
        assert!((vp.scale - vp.min_scale).abs() < EPS);
    }

    #[test]
    fn test_screen_image_roundtrip() {
        let mut vp = Viewport::new();
        vp.scale = 1.5;
        vp.offset = Vec2::new(30.0, -20.0);
        let screen = Point::new(123.0, 456.0);
        let back = vp.to_screen(vp.to_image(screen));
        assert!((back.x - screen.x).abs() < 1e-10);
        assert!((back.y - screen.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_anchors_cursor() {
        let mut vp = Viewport::new();
        vp.offset = Vec2::new(50.0, 80.0);
        let cursor = Point::new(200.0, 150.0);
        let anchored = vp.to_image(cursor);

        vp.zoom_at(cursor, 2.0);
        let after = vp.to_image(cursor);
        assert!((after.x - anchored.x).abs() < EPS);
        assert!((after.y - anchored.y).abs() < EPS);
    }

    #[test]
    fn test_zoom_roundtrip() {
        let mut vp = Viewport::new();
        vp.offset = Vec2::new(12.0, -7.0);
        let cursor = Point::new(140.0, 90.0);

        vp.zoom_at(cursor, 1.6);
        vp.zoom_at(cursor, 1.0 / 1.6);
        assert!((vp.scale - 1.0).abs() < 1e-9);
        assert!((vp.offset.x - 12.0).abs() < 1e-6);
        assert!((vp.offset.y + 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps_and_noops_at_bounds() {
        let mut vp = Viewport::new();
        vp.zoom_at(Point::ZERO, 1000.0);
        assert!((vp.scale - vp.max_scale).abs() < EPS);

        // Already at the bound: a further zoom must not move the offset.
        let offset = vp.offset;
        vp.zoom_at(Point::new(50.0, 50.0), 2.0);
        assert!((vp.scale - vp.max_scale).abs() < EPS);
        assert_eq!(vp.offset, offset);

        vp.scale = 1.0;
        vp.zoom_at(Point::ZERO, 0.0001);
        assert!((vp.scale - vp.min_scale).abs() < EPS);
    }

    #[test]
    fn test_pan_is_unclamped() {
        let mut vp = Viewport::new();
        vp.pan(Vec2::new(-100_000.0, 42.0));
        assert!((vp.offset.x + 100_000.0).abs() < EPS);
        assert!((vp.offset.y - 42.0).abs() < EPS);
    }
}
