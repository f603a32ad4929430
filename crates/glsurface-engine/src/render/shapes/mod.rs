//! Shape drawables.
//!
//! Every shape starts `Uninitialized`, becomes `Ready` once its program is
//! linked on surface creation, and releases its GPU resources on drop.

mod common;

pub mod path;
pub mod square;
pub mod triangle;

pub use common::{ShapeState, ShapeUniform, Vertex, COORDS_PER_VERTEX};
pub use path::Path;
pub use square::Square;
pub use triangle::Triangle;
