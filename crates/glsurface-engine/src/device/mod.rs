//! GPU device + surface management.
//!
//! Creates the wgpu device and queue for a window, configures its surface,
//! and hands out frames to render into.

mod gpu;

pub use gpu::{log_uncaptured_errors, Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
pub(crate) use gpu::device_descriptor;
