//! GPU rendering subsystem.
//!
//! Each shape owns its GPU resources (pipeline, uniform buffer, vertex data)
//! and records its own render pass into the frame encoder.
//!
//! Convention:
//! - geometry is `[x, y, z]` per vertex, in object space
//! - vertex shaders receive a GL-convention MVP corrected for wgpu depth

mod ctx;
pub mod shader;
pub mod shapes;

#[cfg(test)]
pub(crate) mod testing;

pub use ctx::{RenderCtx, RenderTarget};
pub use shader::{load_shader, ShaderKind};
