//! glsurface demo: a square, a rotating triangle and a path drawn with the
//! mouse or a finger.

mod app;
mod driver;

use anyhow::{Context, Result};
use glsurface_engine::device::GpuInit;
use glsurface_engine::logging::{init_logging, LoggingConfig};
use glsurface_engine::scene::{SceneConfig, SceneRenderer};
use glsurface_engine::window::{Runtime, RuntimeConfig};

use app::DemoApp;
use driver::AngleDriver;

/// Triangle rotation speed.
const DEGREES_PER_SECOND: f32 = 36.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let renderer = SceneRenderer::new(SceneConfig::default());
    let driver = AngleDriver::spawn(renderer.angle(), DEGREES_PER_SECOND)
        .context("failed to spawn angle driver thread")?;

    log::info!("drag to draw a path; space pauses rotation, backspace clears, escape quits");

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        DemoApp::new(renderer, Some(driver)),
    )
}
