//! Time subsystem.
//!
//! `FpsCounter` measures frame rate over one-second windows of a monotonic
//! clock. It does not depend on the runtime.

mod fps;

pub use fps::FpsCounter;
