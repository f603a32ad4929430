//! Shared GPU types and the flat-color program used by all shapes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::math::GL_TO_WGPU_CLIP;
use crate::paint::Color;
use crate::render::{load_shader, RenderCtx, RenderTarget, ShaderKind};

/// Number of floats per vertex (`x, y, z`).
pub const COORDS_PER_VERTEX: usize = 3;

pub(super) const FLAT_COLOR_FRAG: &str = include_str!("../shaders/flat_color.frag.wgsl");
pub(super) const POSITION_VERT: &str = include_str!("../shaders/position.vert.wgsl");
pub(super) const TRANSFORM_VERT: &str = include_str!("../shaders/transform.vert.wgsl");

// ── lifecycle ─────────────────────────────────────────────────────────────

/// Lifecycle of a shape drawable.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShapeState {
    /// Program not linked yet; draws are skipped.
    Uninitialized,
    /// Program linked; draws issue GPU commands.
    Ready,
}

// ── vertex ────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; COORDS_PER_VERTEX],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: [x, y, z] }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl From<Vec3> for Vertex {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

// ── uniform ───────────────────────────────────────────────────────────────

/// Per-draw uniform block shared by the vertex and fragment stages.
///
/// Matches `ShapeUniform` in the WGSL sources: a column-major `mat4x4<f32>`
/// followed by a `vec4<f32>` color (80 bytes, 16-byte aligned).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ShapeUniform {
    pub mvp: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ShapeUniform {
    /// Builds the block from a GL-convention matrix.
    pub fn new(mvp: Mat4, color: Color) -> Self {
        Self {
            mvp: (GL_TO_WGPU_CLIP * mvp).to_cols_array_2d(),
            color: color.to_array(),
        }
    }

    fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<ShapeUniform>() as u64)
            .expect("ShapeUniform has non-zero size by construction")
    }
}

// ── program ───────────────────────────────────────────────────────────────

/// A linked vertex + flat-color fragment pipeline.
///
/// Bindings are resolved once at link time and kept next to the pipeline:
/// the uniform buffer and bind group live as long as the program.
pub(super) struct FlatColorProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
}

impl FlatColorProgram {
    /// Compiles both stages and links the pipeline.
    ///
    /// Returns `None` if either shader fails to compile or the device rejects
    /// the pipeline (for example a color target the fragment output cannot be
    /// written to). Shader errors are logged by the shader loader.
    pub(super) fn link(
        ctx: &RenderCtx<'_>,
        label: &str,
        vertex_src: &str,
        topology: wgpu::PrimitiveTopology,
    ) -> Option<Self> {
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let program = Self::create(ctx, label, vertex_src, topology);

        if let Some(err) = pollster::block_on(scope.pop()) {
            log::error!("{label}: program link failed: {err}");
            return None;
        }

        if program.is_some() {
            log::debug!("linked {label} program ({topology:?})");
        }
        program
    }

    fn create(
        ctx: &RenderCtx<'_>,
        label: &str,
        vertex_src: &str,
        topology: wgpu::PrimitiveTopology,
    ) -> Option<Self> {
        let vs = load_shader(ctx.device, ShaderKind::Vertex, &format!("{label} vs"), vertex_src)?;
        let fs = load_shader(
            ctx.device,
            ShaderKind::Fragment,
            &format!("{label} fs"),
            FLAT_COLOR_FRAG,
        )?;

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(&format!("{label} bgl")),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(ShapeUniform::min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(&format!("{label} pipeline layout")),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(ShaderKind::Vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(ShaderKind::Fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} ubo")),
            size: std::mem::size_of::<ShapeUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Some(Self {
            label: label.to_string(),
            pipeline,
            bind_group,
            uniform_buffer,
        })
    }

    #[cfg(test)]
    pub(super) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Uploads the transform and color for the next draw.
    pub(super) fn write_uniform(&self, ctx: &RenderCtx<'_>, mvp: Mat4, color: Color) {
        let u = ShapeUniform::new(mvp, color);
        ctx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Begins a load/store pass with this program and its bindings set.
    pub(super) fn begin_pass<'t>(&self, target: &'t mut RenderTarget<'_>) -> wgpu::RenderPass<'t> {
        let mut rpass = target.begin_load_pass(&self.label);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass
    }
}

/// Logs once that a shape was drawn before it was linked.
pub(super) fn warn_unlinked(name: &str, warned: &mut bool) {
    if !*warned {
        log::warn!("{name}: draw called before the program was linked; skipped");
        *warned = true;
    }
}
