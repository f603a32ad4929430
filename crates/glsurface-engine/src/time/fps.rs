use std::time::{Duration, Instant};

/// Counts frames over rolling windows and reports the rate when a window closes.
///
/// The first tick opens a window. A window closes on the first tick that lands
/// strictly more than `window` after it opened; that tick starts the next window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Option<Instant>,
    frames: u32,
}

impl FpsCounter {
    /// One-second windows.
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            window_start: None,
            frames: 0,
        }
    }

    /// Records a frame at `Instant::now()`.
    pub fn tick(&mut self) -> Option<f64> {
        self.tick_at(Instant::now())
    }

    /// Records a frame at `now` and returns the rate of the window it closed, if any.
    pub fn tick_at(&mut self, now: Instant) -> Option<f64> {
        let mut rate = None;

        match self.window_start {
            None => self.window_start = Some(now),
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                if elapsed > self.window {
                    rate = Some(self.frames as f64 / elapsed.as_secs_f64());
                    self.window_start = Some(now);
                    self.frames = 0;
                }
            }
        }

        self.frames += 1;
        rate
    }

    /// Frames counted in the current window.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_opens_window() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.tick_at(Instant::now()), None);
        assert_eq!(fps.frames(), 1);
    }

    #[test]
    fn no_report_within_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new();
        fps.tick_at(t0);
        for i in 1..=10 {
            assert_eq!(fps.tick_at(t0 + Duration::from_millis(i * 100)), None);
        }
        // Exactly one second is still inside the window.
        assert_eq!(fps.frames(), 11);
    }

    #[test]
    fn reports_rate_when_window_closes() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new();
        for i in 0..60 {
            fps.tick_at(t0 + Duration::from_millis(i * 10));
        }
        let rate = fps.tick_at(t0 + Duration::from_millis(1200)).unwrap();
        assert!((rate - 50.0).abs() < 1e-9);
        // The closing tick counts toward the next window.
        assert_eq!(fps.frames(), 1);
    }

    #[test]
    fn custom_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::with_window(Duration::from_millis(100));
        fps.tick_at(t0);
        fps.tick_at(t0 + Duration::from_millis(50));
        let rate = fps.tick_at(t0 + Duration::from_millis(200)).unwrap();
        assert!((rate - 10.0).abs() < 1e-9);
    }
}
