use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{warn_unlinked, FlatColorProgram, ShapeState, Vertex, POSITION_VERT};

/// Corners in draw-list order: top-left, bottom-left, bottom-right, top-right.
pub const SQUARE_COORDS: [Vertex; 4] = [
    Vertex::new(-0.5, 0.5, 0.0),  // top left
    Vertex::new(-0.5, -0.5, 0.0), // bottom left
    Vertex::new(0.5, -0.5, 0.0),  // bottom right
    Vertex::new(0.5, 0.5, 0.0),   // top right
];

/// Two triangles: `(0, 1, 2)` and `(0, 2, 3)`.
pub const SQUARE_DRAW_ORDER: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub const SQUARE_COLOR: Color = Color::new(0.2, 0.709_803_9, 0.898_039_2, 1.0);

/// Static square drawn directly in clip space.
///
/// The vertex shader ignores the transform, so the square stays fixed in the
/// middle of the surface regardless of projection or camera.
#[derive(Default)]
pub struct Square {
    program: Option<FlatColorProgram>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    warned_unlinked: bool,
}

impl Square {
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

    /// Index triples of the triangles the square is drawn with.
    pub fn triangles() -> impl Iterator<Item = [u16; 3]> {
        SQUARE_DRAW_ORDER.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Links the program and uploads the static geometry. No-op once `Ready`.
    pub fn link(&mut self, ctx: &RenderCtx<'_>) {
        if self.program.is_some() {
            return;
        }

        let Some(program) = FlatColorProgram::link(
            ctx,
            "square",
            POSITION_VERT,
            wgpu::PrimitiveTopology::TriangleList,
        ) else {
            return;
        };

        self.vertex_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("square vbo"),
            contents: bytemuck::cast_slice(&SQUARE_COORDS),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.index_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("square ibo"),
            contents: bytemuck::cast_slice(&SQUARE_DRAW_ORDER),
            usage: wgpu::BufferUsages::INDEX,
        }));

        self.program = Some(program);
    }

    /// Draws the square as indexed triangles.
    ///
    /// `mvp` is uploaded with the color but not applied by the vertex stage.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, mvp: Mat4) {
        let (Some(program), Some(vbo), Some(ibo)) = (
            self.program.as_ref(),
            self.vertex_buffer.as_ref(),
            self.index_buffer.as_ref(),
        ) else {
            warn_unlinked("Square", &mut self.warned_unlinked);
            return;
        };

        program.write_uniform(ctx, mvp, SQUARE_COLOR);

        let mut rpass = program.begin_pass(target);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..SQUARE_DRAW_ORDER.len() as u32, 0, 0..1);
    }
}
