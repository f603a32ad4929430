use glam::{Mat4, Vec3};

/// Fixed look-at camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl Camera {
    #[inline]
    pub const fn new(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        Self { eye, center, up }
    }

    /// Right-handed view matrix (same result as `gluLookAt`).
    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }
}

impl Default for Camera {
    /// Three units behind the origin on `-Z`, looking at the origin, `+Y` up.
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, -3.0), Vec3::ZERO, Vec3::Y)
    }
}

/// Rotation of `degrees` about `axis`.
///
/// A zero-length axis yields the identity.
pub fn rotation_about(degrees: f32, axis: Vec3) -> Mat4 {
    let Some(axis) = axis.try_normalize() else {
        return Mat4::IDENTITY;
    };
    Mat4::from_axis_angle(axis, degrees.to_radians())
}
