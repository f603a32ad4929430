//! glsurface engine crate.
//!
//! A GPU drawing surface: a static square, a rotating triangle and a
//! freehand path, drawn with a flat-color pipeline on top of a small
//! `winit` + `wgpu` runtime.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod render;
pub mod paint;
pub mod scene;
