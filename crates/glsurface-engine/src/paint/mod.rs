//! Paint model shared between the scene and the shape renderers.
//!
//! Shapes fill with a single flat color; there are no gradients or patterns.

pub mod color;

pub use color::Color;
