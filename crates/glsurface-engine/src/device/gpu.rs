use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::render::RenderCtx;

/// Adapter and presentation options.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// Off by default, so shader colors reach the screen unconverted.
    pub prefer_srgb: bool,
    pub present_mode: wgpu::PresentMode,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// What the frame loop should do after a failed surface acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; the next frame may succeed.
    Reconfigured,
    /// Transient; drop this frame.
    SkipFrame,
    /// Unrecoverable; stop the loop.
    Fatal,
}

/// Device, queue and the window surface they present to.
///
/// The surface borrows the window for `'w`.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Last size passed to [`Gpu::resize`], possibly zero while minimized.
    size: PhysicalSize<u32>,
}

/// One acquired surface texture plus the encoder recording into it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> Gpu<'w> {
    /// Creates a device for `window` and configures its surface.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&device_descriptor(adapter.limits()))
            .await
            .context("GPU adapter refused to open a device")?;

        log_uncaptured_errors(&device);

        let config = surface_config(&surface.get_capabilities(&adapter), size, &init)
            .context("surface reports no supported formats")?;
        surface.configure(&device, &config);
        log::debug!("surface configured: {:?} {}x{}", config.format, size.width, size.height);

        Ok(Gpu {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn render_ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(&self.device, &self.queue, self.config.format)
    }

    /// Records the new size and reconfigures the surface when it is non-zero.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture. Present it with [`Gpu::submit`].
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("glsurface frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }

    /// Logs `err`, reconfigures the surface when that can help, and says how
    /// the frame loop should continue.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        let action = surface_error_action(&err);
        match action {
            SurfaceErrorAction::Fatal => log::error!("surface error {err}: giving up"),
            _ => log::debug!("surface error {err}: {action:?}"),
        }

        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0
        {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }
}

/// Device descriptor used for both window and offscreen devices.
///
/// No optional features are requested; the flat-color pipelines fit in any
/// adapter's limits.
pub(crate) fn device_descriptor(limits: wgpu::Limits) -> wgpu::DeviceDescriptor<'static> {
    wgpu::DeviceDescriptor {
        label: Some("glsurface device"),
        required_features: wgpu::Features::empty(),
        required_limits: limits,
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::Performance,
        trace: wgpu::Trace::Off,
    }
}

/// Routes device errors that escape every error scope to the log.
///
/// wgpu's default handler panics; rendering here is best-effort, so a failed
/// buffer or pipeline creation is reported and the frame loop carries on.
pub fn log_uncaptured_errors(device: &wgpu::Device) {
    device.on_uncaptured_error(Arc::new(|err: wgpu::Error| {
        log::error!("wgpu: {err}");
    }));
}

fn surface_error_action(err: &SurfaceError) -> SurfaceErrorAction {
    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// Builds the surface configuration from what the adapter supports.
fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(&caps.formats, init.prefer_srgb)?;

    // The scene clears to an opaque color; compositor blending is never wanted.
    let opaque = wgpu::CompositeAlphaMode::Opaque;
    let alpha_mode = if caps.alpha_modes.contains(&opaque) {
        opaque
    } else {
        caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    };

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width,
        height: size.height,
        present_mode: init.present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;

    let wanted: [F; 2] = if prefer_srgb {
        [F::Bgra8UnormSrgb, F::Rgba8UnormSrgb]
    } else {
        [F::Bgra8Unorm, F::Rgba8Unorm]
    };

    wanted
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    fn caps(formats: Vec<F>, alpha_modes: Vec<wgpu::CompositeAlphaMode>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes,
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn format_prefers_linear_when_srgb_off() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn format_prefers_srgb_when_requested() {
        let formats = [F::Rgba8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
    }

    #[test]
    fn format_falls_back_to_first() {
        assert_eq!(choose_surface_format(&[F::Rgba16Float], false), Some(F::Rgba16Float));
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn config_uses_size_and_opaque_alpha() {
        use wgpu::CompositeAlphaMode as A;

        let cfg = surface_config(
            &caps(vec![F::Bgra8UnormSrgb, F::Bgra8Unorm], vec![A::PreMultiplied, A::Opaque]),
            PhysicalSize::new(640, 480),
            &GpuInit::default(),
        )
        .unwrap();

        assert_eq!(cfg.format, F::Bgra8Unorm);
        assert_eq!((cfg.width, cfg.height), (640, 480));
        assert_eq!(cfg.alpha_mode, A::Opaque);
        assert_eq!(cfg.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn config_falls_back_to_first_alpha_mode() {
        use wgpu::CompositeAlphaMode as A;

        let cfg = surface_config(
            &caps(vec![F::Rgba8Unorm], vec![A::Inherit, A::PostMultiplied]),
            PhysicalSize::new(1, 1),
            &GpuInit::default(),
        )
        .unwrap();
        assert_eq!(cfg.alpha_mode, A::Inherit);
    }

    #[test]
    fn config_needs_a_format() {
        let cfg = surface_config(&caps(vec![], vec![]), PhysicalSize::new(1, 1), &GpuInit::default());
        assert!(cfg.is_none());
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(surface_error_action(&SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
