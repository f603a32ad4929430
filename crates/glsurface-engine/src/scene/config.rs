use glam::Vec3;

use crate::math::Camera;
use crate::paint::Color;

use super::TouchScale;

/// Scene configuration.
///
/// Defaults reproduce the reference scene: white background, camera at
/// `(0, 0, -3)` looking at the origin, frustum depth `[3, 7]`, triangle
/// rotating about `-Z`.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub clear_color: Color,
    pub camera: Camera,

    /// Near plane distance of the projection frustum.
    pub near: f32,
    /// Far plane distance of the projection frustum.
    pub far: f32,

    /// Axis the triangle rotates about.
    pub rotation_axis: Vec3,

    /// Pixel-to-scene scale for path input.
    pub touch_scale: TouchScale,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: Color::WHITE,
            camera: Camera::default(),
            near: 3.0,
            far: 7.0,
            rotation_axis: Vec3::NEG_Z,
            touch_scale: TouchScale::default(),
        }
    }
}
