//! Headless device and offscreen rendering for GPU-backed tests.
//!
//! Tests call [`Headless::new`] and return early when it yields `None`, so the
//! suite still passes on machines without any adapter.

use crate::device::{device_descriptor, log_uncaptured_errors};
use crate::render::{RenderCtx, RenderTarget};

pub(crate) const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

pub(crate) struct Headless {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl Headless {
    pub(crate) fn new() -> Option<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = match pollster::block_on(instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: None,
                force_fallback_adapter: false,
            },
        )) {
            Ok(adapter) => adapter,
            Err(err) => {
                eprintln!("no GPU adapter, skipping: {err}");
                return None;
            }
        };

        let (device, queue) =
            pollster::block_on(adapter.request_device(&device_descriptor(adapter.limits()))).ok()?;

        log_uncaptured_errors(&device);
        Some(Self { device, queue })
    }

    pub(crate) fn ctx(&self, format: wgpu::TextureFormat) -> RenderCtx<'_> {
        RenderCtx::new(&self.device, &self.queue, format)
    }

    /// Runs `draw` against a fresh `width x height` target and reads it back.
    pub(crate) fn render(
        &self,
        width: u32,
        height: u32,
        draw: impl FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    ) -> Pixels {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let padded_row = (width * 4).next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen readback"),
            size: u64::from(padded_row * height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("offscreen encoder"),
            });

        {
            let ctx = self.ctx(TARGET_FORMAT);
            let mut target = RenderTarget::new(&mut encoder, &view);
            draw(&ctx, &mut target);
        }

        encoder.copy_texture_to_buffer(
            texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            size,
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        slice.map_async(wgpu::MapMode::Read, |res| res.unwrap());
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .unwrap();

        let mapped = slice.get_mapped_range();
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for row in mapped.chunks_exact(padded_row as usize) {
            data.extend_from_slice(&row[..(width * 4) as usize]);
        }
        drop(mapped);
        readback.unmap();

        Pixels { width, height, data }
    }
}

/// Tightly packed RGBA8 rows, top row first.
pub(crate) struct Pixels {
    pub(crate) width: u32,
    pub(crate) height: u32,
    data: Vec<u8>,
}

impl Pixels {
    pub(crate) fn at(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub(crate) fn count_near(&self, rgb: [u8; 3]) -> usize {
        self.data
            .chunks_exact(4)
            .filter(|px| near([px[0], px[1], px[2]], rgb))
            .count()
    }

    /// Rows holding at least one pixel of `rgb`.
    pub(crate) fn rows_with(&self, rgb: [u8; 3]) -> Vec<u32> {
        (0..self.height)
            .filter(|&y| (0..self.width).any(|x| near(self.at(x, y), rgb)))
            .collect()
    }
}

/// Per-channel match within the rounding slack of an 8-bit target.
pub(crate) fn near(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter().zip(b).all(|(&x, y)| x.abs_diff(y) <= 2)
}

#[track_caller]
pub(crate) fn assert_near(actual: [u8; 3], expected: [u8; 3]) {
    assert!(near(actual, expected), "expected ~{expected:?}, got {actual:?}");
}
