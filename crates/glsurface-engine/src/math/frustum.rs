use glam::{Mat4, Vec4};

/// Remaps OpenGL clip space depth (`[-1, 1]`) to wgpu clip space depth (`[0, 1]`).
///
/// Apply on the left: `GL_TO_WGPU_CLIP * mvp`.
#[rustfmt::skip]
pub const GL_TO_WGPU_CLIP: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Perspective view volume described by its near-plane rectangle and depth range.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    /// Frustum with horizontal extent `±ratio` and vertical extent `±1`.
    #[inline]
    pub const fn from_aspect(ratio: f32, near: f32, far: f32) -> Self {
        Self {
            left: -ratio,
            right: ratio,
            bottom: -1.0,
            top: 1.0,
            near,
            far,
        }
    }

    /// Width / height of the surface, or `None` for a degenerate surface.
    #[inline]
    pub fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(width as f32 / height as f32)
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }

    /// Builds the perspective matrix (same layout as `glFrustum`).
    pub fn to_matrix(&self) -> Mat4 {
        let Self { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;

        let rw = 1.0 / (r - l);
        let rh = 1.0 / (t - b);
        let rd = 1.0 / (n - f);

        Mat4::from_cols(
            Vec4::new(2.0 * n * rw, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n * rh, 0.0, 0.0),
            Vec4::new((r + l) * rw, (t + b) * rh, (f + n) * rd, -1.0),
            Vec4::new(0.0, 0.0, 2.0 * f * n * rd, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn aspect_ratio_800_by_600() {
        let ratio = Frustum::aspect_ratio(800, 600).unwrap();
        assert!(close(ratio, 800.0 / 600.0));

        let f = Frustum::from_aspect(ratio, 3.0, 7.0);
        assert!(close(f.left, -1.333_333_3));
        assert!(close(f.right, 1.333_333_3));
        assert_eq!(f.bottom, -1.0);
        assert_eq!(f.top, 1.0);
        assert_eq!(f.near, 3.0);
        assert_eq!(f.far, 7.0);
        assert!(close(f.ratio(), ratio));
    }

    #[test]
    fn aspect_ratio_rejects_zero_dimension() {
        assert!(Frustum::aspect_ratio(0, 600).is_none());
        assert!(Frustum::aspect_ratio(800, 0).is_none());
    }

    #[test]
    fn near_plane_maps_to_minus_one() {
        let m = Frustum::from_aspect(1.0, 3.0, 7.0).to_matrix();
        let clip = m.project_point3(Vec3::new(0.0, 0.0, -3.0));
        assert!(close(clip.z, -1.0));
    }

    #[test]
    fn far_plane_maps_to_plus_one() {
        let m = Frustum::from_aspect(1.0, 3.0, 7.0).to_matrix();
        let clip = m.project_point3(Vec3::new(0.0, 0.0, -7.0));
        assert!(close(clip.z, 1.0));
    }

    #[test]
    fn near_plane_corners_map_to_ndc_corners() {
        let f = Frustum::from_aspect(1.5, 3.0, 7.0);
        let m = f.to_matrix();
        let clip = m.project_point3(Vec3::new(f.right, f.top, -f.near));
        assert!(close(clip.x, 1.0));
        assert!(close(clip.y, 1.0));
    }

    #[test]
    fn wgpu_correction_maps_depth_to_unit_range() {
        let m = GL_TO_WGPU_CLIP * Frustum::from_aspect(1.0, 3.0, 7.0).to_matrix();
        assert!(close(m.project_point3(Vec3::new(0.0, 0.0, -3.0)).z, 0.0));
        assert!(close(m.project_point3(Vec3::new(0.0, 0.0, -7.0)).z, 1.0));
    }
}
