use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented on top of the runtime.
///
/// Mirrors a GPU surface renderer: `on_surface_created` once per surface,
/// `on_surface_changed` after creation and on every resize, `on_frame` for
/// every redraw. All callbacks run on the event loop thread.
pub trait App {
    /// Called once after the GPU surface is ready.
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) {
        let _ = ctx;
    }

    /// Called with the new drawable size in physical pixels, never zero.
    fn on_surface_changed(&mut self, width: u32, height: u32) {
        let _ = (width, height);
    }

    /// Called once per redraw with the input gathered since the last frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
