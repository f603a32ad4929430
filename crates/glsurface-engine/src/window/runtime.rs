use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glsurface".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the drawing surface described by `config` and runs `app` until
    /// the window closes or a callback returns [`AppControl::Exit`].
    ///
    /// Fails if the window or its GPU surface cannot be created.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = SurfaceHost::new(config, gpu_init, app);

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.init_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// The window, its GPU surface and the input gathered between frames.
#[self_referencing]
struct Surface {
    input_state: InputState,
    input_frame: InputFrame,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Surface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        SurfaceTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }
}

/// Drives one [`App`] from winit callbacks.
struct SurfaceHost<A> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    surface: Option<Surface>,

    /// Setup failure, reported by `Runtime::run` after the loop ends.
    init_error: Option<anyhow::Error>,
}

impl<A: App> SurfaceHost<A> {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            surface: None,
            init_error: None,
        }
    }

    fn open_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let surface = Surface::open(event_loop, &self.config, self.gpu_init.clone())?;

        let app = &mut self.app;
        surface.with_gpu(|gpu| {
            app.on_surface_created(&gpu.render_ctx());
            if let Some((w, h)) = drawable(gpu.size()) {
                app.on_surface_changed(w, h);
            }
        });

        surface.request_redraw();
        self.surface = Some(surface);
        Ok(())
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.with_gpu_mut(|gpu| gpu.resize(new_size));
        match drawable(new_size) {
            Some((w, h)) => self.app.on_surface_changed(w, h),
            None => log::debug!("surface is zero-sized; waiting for resize"),
        }
        surface.request_redraw();
    }

    /// Runs one app frame and clears the input it consumed.
    fn frame(&mut self) -> AppControl {
        let (app, Some(surface)) = (&mut self.app, self.surface.as_mut()) else {
            return AppControl::Continue;
        };

        surface.with_mut(|fields| {
            let control = {
                let mut ctx = FrameCtx {
                    window: fields.window,
                    gpu: fields.gpu,
                    input_frame: fields.input_frame,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        })
    }
}

/// The size to report to the app, or `None` while the surface is minimized.
fn drawable(size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    (size.width > 0 && size.height > 0).then_some((size.width, size.height))
}

impl<A: App> ApplicationHandler for SurfaceHost<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        if let Err(e) = self.open_surface(event_loop) {
            log::error!("failed to open drawing surface: {e:#}");
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous rendering: the triangle animates every frame.
        if let Some(surface) = &self.surface {
            surface.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match event {
            WindowEvent::CloseRequested => {
                self.surface = None;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => self.resize(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = surface.with_window(|w| w.inner_size());
                self.resize(size);
            }

            WindowEvent::RedrawRequested => {
                if self.frame() == AppControl::Exit {
                    self.surface = None;
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_names_the_window() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.title, "glsurface");
        assert_eq!(cfg.initial_size, LogicalSize::new(800.0, 600.0));
    }

    #[test]
    fn minimized_surface_is_not_drawable() {
        assert_eq!(drawable(PhysicalSize::new(0, 0)), None);
        assert_eq!(drawable(PhysicalSize::new(800, 0)), None);
        assert_eq!(drawable(PhysicalSize::new(0, 600)), None);
    }

    #[test]
    fn drawable_reports_physical_size() {
        assert_eq!(drawable(PhysicalSize::new(1080, 1920)), Some((1080, 1920)));
    }
}
