use glam::Vec3;

use crate::coords::Viewport;

/// Screen-to-scene scale factors for path input.
///
/// A touch at pixel `(x, y)` lands at
/// `((cx - x) / width * x_scale, (cy - y) / height * y_scale, z)`, where
/// `(cx, cy)` is the surface center. The defaults were tuned by hand so the
/// path follows the finger with the default camera and frustum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchScale {
    pub x: f32,
    pub y: f32,
}

impl TouchScale {
    pub const DEFAULT_X: f32 = 3.65;
    pub const DEFAULT_Y: f32 = 2.1;

    /// Maps a pixel position to scene space, or `None` before the surface has a size.
    pub fn map(self, viewport: Viewport, x: f32, y: f32, z: f32) -> Option<Vec3> {
        if !viewport.is_valid() {
            return None;
        }
        let (cx, cy) = viewport.center();
        Some(Vec3::new(
            (cx - x) / viewport.width * self.x,
            (cy - y) / viewport.height * self.y,
            z,
        ))
    }
}

impl Default for TouchScale {
    fn default() -> Self {
        Self {
            x: Self::DEFAULT_X,
            y: Self::DEFAULT_Y,
        }
    }
}
