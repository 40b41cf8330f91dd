//! Frame timing: presented-frame counting and the frame-rate title.

use std::time::{Duration, Instant};

/// Counts presented frames and reports the rate a few times per second.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    window_start: Option<Instant>,
    frames: u32,
    interval: Duration,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

impl FrameCounter {
    pub fn new(interval: Duration) -> Self {
        Self {
            window_start: None,
            frames: 0,
            interval,
        }
    }

    /// Registers one frame at `now`. Returns frames per second once more than
    /// `interval` has passed since the last report.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let start = *self.window_start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);

        let mut fps = None;
        if elapsed > self.interval {
            fps = Some(f64::from(self.frames) / elapsed.as_secs_f64());
            self.window_start = Some(now);
            self.frames = 0;
        }
        self.frames += 1;
        fps
    }
}

/// Window title showing the frame rate.
pub fn fps_title(fps: f64) -> String {
    format!("OpenGL @ fps: {fps:.2}")
}
