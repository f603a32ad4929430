//! Surface-space geometry shared by the runtime and renderers.
//!
//! Pixel space: origin top-left, +X right, +Y down.

mod viewport;

pub use viewport::Viewport;
