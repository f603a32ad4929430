//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application:
//! surface callbacks plus a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
