//! The demo scene: a fixed square, a rotating triangle and a freehand path.
//!
//! [`SceneRenderer`] implements the surface callbacks (created, changed,
//! draw-frame) and the path mutation API fed by pointer/touch input.

mod angle;
mod config;
mod renderer;
mod touch;

pub use angle::RotationAngle;
pub use config::SceneConfig;
pub use renderer::{FrameMatrices, SceneRenderer};
pub use touch::TouchScale;
