//! Brush configuration for stroke rasterization.

use serde::{Deserialize, Serialize};

/// Footprint of the brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrushShape {
    /// Round caps and joins.
    #[default]
    Circle,
    /// Axis-aligned square footprint, butt caps.
    Square,
}

/// Whether the brush adds or removes coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BrushMode {
    #[default]
    Draw,
    /// Erase fully removes coverage; `opacity` is ignored in this mode.
    Erase,
}

/// Brush parameters. Captured once per stroke: the controller snapshots the
/// config on pointer down, so changing it mid-stroke affects the next stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Nominal on-screen diameter in screen pixels. The rasterizer divides by
    /// the viewport scale so the apparent size stays constant across zoom.
    pub size_px: f64,
    pub shape: BrushShape,
    /// Coverage strength in (0, 1]. Ignored when `mode == Erase`.
    pub opacity: f64,
    pub mode: BrushMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size_px: 32.0,
            shape: BrushShape::Circle,
            opacity: 1.0,
            mode: BrushMode::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = BrushConfig::default();
        assert!(brush.size_px > 0.0);
        assert!(brush.opacity > 0.0 && brush.opacity <= 1.0);
        assert_eq!(brush.shape, BrushShape::Circle);
        assert_eq!(brush.mode, BrushMode::Draw);
    }
}
