//! Matrix helpers for the fixed camera rig.
//!
//! All matrices are `glam::Mat4` (column-major) and follow the OpenGL clip
//! convention (`z` in `[-1, 1]`). Use [`GL_TO_WGPU_CLIP`] when uploading a
//! GL-convention matrix to a wgpu pipeline.

mod camera;
mod frustum;

pub use camera::{rotation_about, Camera};
pub use frustum::{Frustum, GL_TO_WGPU_CLIP};
