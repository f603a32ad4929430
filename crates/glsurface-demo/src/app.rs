use glsurface_engine::core::{App, AppControl, FrameCtx};
use glsurface_engine::input::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};
use glsurface_engine::render::RenderCtx;
use glsurface_engine::scene::SceneRenderer;

use crate::driver::AngleDriver;

/// Degrees added or removed by one arrow key press.
const NUDGE_DEGREES: f32 = 5.0;

/// The demo application: feeds pointer input into the scene's path and
/// draws the scene every frame.
pub struct DemoApp {
    renderer: SceneRenderer,
    driver: Option<AngleDriver>,

    /// Left button (or primary finger) is down and points extend the path.
    drawing: bool,
}

impl DemoApp {
    pub fn new(renderer: SceneRenderer, driver: Option<AngleDriver>) -> Self {
        Self {
            renderer,
            driver,
            drawing: false,
        }
    }

    #[cfg(test)]
    fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Applies one input event to the scene.
    fn handle_event(&mut self, ev: &InputEvent) -> AppControl {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
            }) => match state {
                MouseButtonState::Pressed => {
                    self.drawing = true;
                    self.renderer.reset_path();
                    self.renderer.append_path_point(*x, *y, 0.0);
                }
                MouseButtonState::Released => self.drawing = false,
            },

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) if self.drawing => {
                self.renderer.append_path_point(*x, *y, 0.0);
            }

            InputEvent::PointerLeft | InputEvent::Focused(false) => self.drawing = false,

            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat,
            } => return self.handle_key(*key, *repeat),

            _ => {}
        }

        AppControl::Continue
    }

    fn handle_key(&mut self, key: Key, repeat: bool) -> AppControl {
        match key {
            Key::Escape => return AppControl::Exit,
            Key::Space if !repeat => {
                if let Some(driver) = &self.driver {
                    let paused = driver.toggle_paused();
                    log::info!("rotation {}", if paused { "paused" } else { "resumed" });
                }
            }
            Key::Backspace => self.renderer.reset_path(),
            Key::ArrowLeft => {
                self.renderer.angle().add_degrees(NUDGE_DEGREES);
            }
            Key::ArrowRight => {
                self.renderer.angle().add_degrees(-NUDGE_DEGREES);
            }
            _ => {}
        }
        AppControl::Continue
    }
}

impl App for DemoApp {
    fn on_surface_created(&mut self, ctx: &RenderCtx<'_>) {
        self.renderer.on_surface_created(ctx);
    }

    fn on_surface_changed(&mut self, width: u32, height: u32) {
        self.renderer.on_surface_changed(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for ev in &ctx.input_frame.events {
            if self.handle_event(ev) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        let renderer = &mut self.renderer;
        ctx.render(|rctx, target| renderer.on_draw_frame(rctx, target))
    }
}
