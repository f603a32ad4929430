use glam::{Mat4, Vec3};

use crate::coords::Viewport;
use crate::math::{rotation_about, Frustum};
use crate::render::shapes::{Path, Square, Triangle};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FpsCounter;

use super::{RotationAngle, SceneConfig};

/// Matrices used for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameMatrices {
    pub view: Mat4,
    /// `projection * view`; used for the square and the path.
    pub view_projection: Mat4,
    pub rotation: Mat4,
    /// `view_projection * rotation`; used for the triangle.
    pub triangle_mvp: Mat4,
}

/// Renders the scene and owns the path input.
///
/// Lifecycle, driven by the host surface:
/// 1. [`on_surface_created`](Self::on_surface_created) once, links all shapes
/// 2. [`on_surface_changed`](Self::on_surface_changed) on every resize
/// 3. [`on_draw_frame`](Self::on_draw_frame) every frame
pub struct SceneRenderer {
    config: SceneConfig,

    viewport: Viewport,
    projection: Mat4,
    frustum: Option<Frustum>,

    angle: RotationAngle,
    fps: FpsCounter,

    square: Square,
    triangle: Triangle,
    path: Path,
}

impl SceneRenderer {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            projection: Mat4::IDENTITY,
            frustum: None,
            angle: RotationAngle::default(),
            fps: FpsCounter::new(),
            square: Square::new(),
            triangle: Triangle::new(),
            path: Path::new(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Handle to the triangle's rotation angle; clone it into any driver thread.
    pub fn angle(&self) -> RotationAngle {
        self.angle.clone()
    }

    /// Frustum of the current projection, `None` before the first resize.
    pub fn frustum(&self) -> Option<Frustum> {
        self.frustum
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn square(&self) -> &Square {
        &self.square
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── surface callbacks ────────────────────────────────────────────────

    /// Links every shape program.
    pub fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) {
        self.square.link(ctx);
        self.triangle.link(ctx);
        self.path.link(ctx);
        log::debug!(
            "surface created: square={:?} triangle={:?} path={:?}",
            self.square.state(),
            self.triangle.state(),
            self.path.state()
        );
    }

    /// Stores the surface size and rebuilds the projection from its aspect ratio.
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        log::debug!("surface changed: width = {width}, height = {height}");

        let Some(ratio) = Frustum::aspect_ratio(width, height) else {
            log::warn!("ignoring degenerate surface size {width}x{height}");
            return;
        };

        self.viewport = Viewport::from_physical(width, height);

        let frustum = Frustum::from_aspect(ratio, self.config.near, self.config.far);
        self.projection = frustum.to_matrix();
        self.frustum = Some(frustum);
    }

    /// Computes this frame's matrices from the current projection, camera and angle.
    pub fn frame_matrices(&self) -> FrameMatrices {
        let view = self.config.camera.view_matrix();
        let view_projection = self.projection * view;
        let rotation = rotation_about(self.angle.get(), self.config.rotation_axis);

        FrameMatrices {
            view,
            view_projection,
            rotation,
            triangle_mvp: view_projection * rotation,
        }
    }

    /// Clears the target and draws square, triangle and path, in that order.
    pub fn on_draw_frame(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if let Some(fps) = self.fps.tick() {
            log::debug!("fps: {fps:.1}");
        }

        target.clear(self.config.clear_color);

        let m = self.frame_matrices();

        self.square.draw(ctx, target, m.view_projection);
        self.triangle.draw(ctx, target, m.triangle_mvp);
        self.path.draw(ctx, target, m.view_projection);
    }

    // ── path input ───────────────────────────────────────────────────────

    /// Empties the path.
    pub fn reset_path(&mut self) {
        self.path.set_coords(Vec::new());
    }

    /// Maps a pixel position into scene space and appends it to the path.
    ///
    /// Points arriving before the surface has a size are dropped.
    pub fn append_path_point(&mut self, x: f32, y: f32, z: f32) {
        let Some(point) = self.config.touch_scale.map(self.viewport, x, y, z) else {
            log::warn!("dropping path point ({x}, {y}): surface has no size yet");
            return;
        };

        let mut coords: Vec<Vec3> = Vec::with_capacity(self.path.coords().len() + 1);
        coords.extend_from_slice(self.path.coords());
        coords.push(point);
        self.path.set_coords(coords);
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
