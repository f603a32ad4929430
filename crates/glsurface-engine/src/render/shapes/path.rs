use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{warn_unlinked, FlatColorProgram, ShapeState, Vertex, TRANSFORM_VERT};

pub const PATH_COLOR: Color = Color::new(0.936_718_75, 0.769_531_25, 0.522_656_25, 1.0);

/// Freehand polyline drawn as a line strip.
///
/// Coordinates are replaced wholesale through [`Path::set_coords`]. Every
/// replacement drops the current vertex buffer; the next draw uploads a new
/// buffer sized exactly to the coordinate list.
///
/// Lines are rasterized one pixel wide (wgpu has no line-width state).
#[derive(Default)]
pub struct Path {
    coords: Vec<Vec3>,
    vertex_count: u32,

    program: Option<FlatColorProgram>,
    vertex_buffer: Option<wgpu::Buffer>,
    warned_unlinked: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ShapeState {
        if self.program.is_some() {
            ShapeState::Ready
        } else {
            ShapeState::Uninitialized
        }
    }

    pub fn coords(&self) -> &[Vec3] {
        &self.coords
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Replaces the coordinate list and recomputes the vertex count.
    pub fn set_coords(&mut self, coords: Vec<Vec3>) {
        self.vertex_count = coords.len() as u32;
        self.coords = coords;
        self.vertex_buffer = None;
    }

    /// Links the program. No-op once `Ready`.
    pub fn link(&mut self, ctx: &RenderCtx<'_>) {
        if self.program.is_some() {
            return;
        }

        self.program = FlatColorProgram::link(
            ctx,
            "path",
            TRANSFORM_VERT,
            wgpu::PrimitiveTopology::LineStrip,
        );
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, mvp: Mat4) {
        if self.program.is_none() {
            warn_unlinked("Path", &mut self.warned_unlinked);
            return;
        }

        // A strip needs at least one segment.
        if self.vertex_count < 2 {
            return;
        }

        self.ensure_vertex_buffer(ctx);

        let (Some(program), Some(vbo)) = (self.program.as_ref(), self.vertex_buffer.as_ref())
        else {
            return;
        };

        program.write_uniform(ctx, mvp, PATH_COLOR);

        let mut rpass = program.begin_pass(target);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }

    fn ensure_vertex_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.vertex_buffer.is_some() || self.coords.is_empty() {
            return;
        }

        let vertices: Vec<Vertex> = self.coords.iter().copied().map(Vertex::from).collect();

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("path vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Headless, TARGET_FORMAT};

    #[test]
    fn starts_empty_and_uninitialized() {
        let path = Path::new();
        assert_eq!(path.state(), ShapeState::Uninitialized);
        assert!(path.coords().is_empty());
        assert_eq!(path.vertex_count(), 0);
    }

    #[test]
    fn set_coords_updates_vertex_count() {
        let mut path = Path::new();
        path.set_coords(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(path.vertex_count(), 3);
        assert_eq!(path.coords(), &[Vec3::ZERO, Vec3::X, Vec3::Y]);
    }

    #[test]
    fn set_coords_replaces_previous_list() {
        let mut path = Path::new();
        path.set_coords(vec![Vec3::ZERO; 5]);
        path.set_coords(vec![Vec3::ONE]);
        assert_eq!(path.vertex_count(), 1);
        assert_eq!(path.coords(), &[Vec3::ONE]);
    }

    #[test]
    fn clearing_resets_vertex_count() {
        let mut path = Path::new();
        path.set_coords(vec![Vec3::ZERO; 4]);
        path.set_coords(Vec::new());
        assert_eq!(path.vertex_count(), 0);
        assert!(path.coords().is_empty());
    }

    #[test]
    fn link_is_idempotent() {
        let Some(gpu) = Headless::new() else { return };
        let ctx = gpu.ctx(TARGET_FORMAT);

        let mut path = Path::new();
        path.link(&ctx);
        let first = path.program.as_ref().unwrap().pipeline().clone();

        path.link(&ctx);
        assert_eq!(path.program.as_ref().unwrap().pipeline(), &first);
    }

    #[test]
    fn rejected_pipeline_leaves_path_unlinked() {
        let Some(gpu) = Headless::new() else { return };
        let mut path = Path::new();
        path.link(&gpu.ctx(wgpu::TextureFormat::Rgba8Uint));
        assert_eq!(path.state(), ShapeState::Uninitialized);
    }

    #[test]
    fn set_coords_drops_uploaded_buffer() {
        let Some(gpu) = Headless::new() else { return };
        let mut path = Path::new();
        path.link(&gpu.ctx(TARGET_FORMAT));
        path.set_coords(vec![Vec3::ZERO, Vec3::X]);

        gpu.render(16, 16, |ctx, target| path.draw(ctx, target, Mat4::IDENTITY));
        assert!(path.vertex_buffer.is_some());

        path.set_coords(vec![Vec3::ZERO, Vec3::Y, Vec3::ONE]);
        assert!(path.vertex_buffer.is_none());

        gpu.render(16, 16, |ctx, target| path.draw(ctx, target, Mat4::IDENTITY));
        assert!(path.vertex_buffer.is_some());
        assert_eq!(path.vertex_count(), 3);
    }

    #[test]
    fn single_point_is_never_uploaded() {
        let Some(gpu) = Headless::new() else { return };
        let mut path = Path::new();
        path.link(&gpu.ctx(TARGET_FORMAT));
        path.set_coords(vec![Vec3::ZERO]);

        gpu.render(16, 16, |ctx, target| path.draw(ctx, target, Mat4::IDENTITY));
        assert!(path.vertex_buffer.is_none());
    }
}
