use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Rotation angle in degrees, shared between the render thread and any driver.
///
/// The value is stored as `f32` bits in an atomic, so readers always see a
/// whole value written by some writer. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct RotationAngle(Arc<AtomicU32>);

impl RotationAngle {
    pub fn new(degrees: f32) -> Self {
        Self(Arc::new(AtomicU32::new(degrees.to_bits())))
    }

    /// Snapshot of the current value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, degrees: f32) {
        self.0.store(degrees.to_bits(), Ordering::Release);
    }

    /// Adds `delta` degrees, wrapping the result into `[0, 360)`.
    ///
    /// Returns the new value.
    pub fn add_degrees(&self, delta: f32) -> f32 {
        let mut next = 0.0;
        // The closure always returns `Some`, so the update cannot fail.
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                next = (f32::from_bits(bits) + delta).rem_euclid(360.0);
                Some(next.to_bits())
            });
        next
    }
}
