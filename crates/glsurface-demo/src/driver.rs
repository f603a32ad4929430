use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use glsurface_engine::scene::RotationAngle;

const STEP: Duration = Duration::from_millis(10);

/// Background thread advancing a [`RotationAngle`] at a fixed rate.
///
/// Stops and joins on drop.
pub struct AngleDriver {
    stop: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AngleDriver {
    pub fn spawn(angle: RotationAngle, degrees_per_second: f32) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let paused = Arc::new(AtomicBool::new(false));

        let handle = thread::Builder::new()
            .name("angle-driver".to_string())
            .spawn({
                let stop = Arc::clone(&stop);
                let paused = Arc::clone(&paused);
                move || {
                    let mut last = Instant::now();
                    while !stop.load(Ordering::Acquire) {
                        thread::sleep(STEP);
                        let now = Instant::now();
                        let dt = now.duration_since(last).as_secs_f32();
                        last = now;

                        if !paused.load(Ordering::Acquire) {
                            angle.add_degrees(degrees_per_second * dt);
                        }
                    }
                }
            })?;

        Ok(Self {
            stop,
            paused,
            handle: Some(handle),
        })
    }

    /// Flips the paused flag and returns the new value.
    pub fn toggle_paused(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::AcqRel)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}

impl Drop for AngleDriver {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("angle driver thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_angle_until_dropped() {
        let angle = RotationAngle::new(0.0);
        let driver = AngleDriver::spawn(angle.clone(), 90.0).expect("spawn driver");

        thread::sleep(Duration::from_millis(100));
        drop(driver);

        let after_stop = angle.get();
        assert!(after_stop > 0.0);

        thread::sleep(Duration::from_millis(50));
        assert_eq!(angle.get(), after_stop);
    }

    #[test]
    fn paused_driver_holds_angle() {
        let angle = RotationAngle::new(45.0);
        let driver = AngleDriver::spawn(angle.clone(), 90.0).expect("spawn driver");

        assert!(driver.toggle_paused());
        // One step may already be in flight when the flag flips.
        thread::sleep(Duration::from_millis(30));
        let held = angle.get();
        thread::sleep(Duration::from_millis(60));
        assert_eq!(angle.get(), held);

        assert!(!driver.toggle_paused());
        assert!(!driver.is_paused());
    }
}
