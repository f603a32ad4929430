use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{warn_unlinked, FlatColorProgram, ShapeState, Vertex, TRANSFORM_VERT};

/// Isosceles triangle with its centroid on the origin, counter-clockwise.
pub const TRIANGLE_COORDS: [Vertex; 3] = [
    Vertex::new(0.0, 0.622_008_46, 0.0),    // top
    Vertex::new(-0.5, -0.311_004_23, 0.0), // bottom left
    Vertex::new(0.5, -0.311_004_23, 0.0),  // bottom right
];

pub const TRIANGLE_COLOR: Color = Color::new(0.636_718_75, 0.769_531_25, 0.222_656_25, 1.0);

/// Triangle transformed by the per-draw MVP matrix.
#[derive(Default)]
pub struct Triangle {
    program: Option<FlatColorProgram>,
    vertex_buffer: Option<wgpu::Buffer>,
    warned_unlinked: bool,
}

impl Triangle {
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

    pub fn vertex_count(&self) -> u32 {
        TRIANGLE_COORDS.len() as u32
    }

    /// Links the program and uploads the static geometry. No-op once `Ready`.
    pub fn link(&mut self, ctx: &RenderCtx<'_>) {
        if self.program.is_some() {
            return;
        }

        let Some(program) = FlatColorProgram::link(
            ctx,
            "triangle",
            TRANSFORM_VERT,
            wgpu::PrimitiveTopology::TriangleList,
        ) else {
            return;
        };

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.program = Some(program);
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, mvp: Mat4) {
        let (Some(program), Some(vbo)) = (self.program.as_ref(), self.vertex_buffer.as_ref())
        else {
            warn_unlinked("Triangle", &mut self.warned_unlinked);
            return;
        };

        program.write_uniform(ctx, mvp, TRIANGLE_COLOR);

        let mut rpass = program.begin_pass(target);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..self.vertex_count(), 0..1);
    }
}
