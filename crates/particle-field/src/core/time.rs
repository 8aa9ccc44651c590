/// Milliseconds of accumulated frame time per FPS report.
pub const FPS_REPORT_INTERVAL_MS: f64 = 1000.0;

/// Frames-per-second estimator.
/// Counts frames and elapsed time; once a full report interval has
/// accumulated, publishes a per-second rate and starts over.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    elapsed_ms: f64,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            elapsed_ms: 0.0,
            // Optimistic until the first report.
            fps: 60,
        }
    }

    /// Count one frame that took `delta_ms`. Returns the new estimate when a
    /// report is due.
    pub fn tick(&mut self, delta_ms: f64) -> Option<u32> {
        self.frames += 1;
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < FPS_REPORT_INTERVAL_MS {
            return None;
        }
        self.fps = (self.frames as f64 * 1000.0 / self.elapsed_ms).round() as u32;
        self.frames = 0;
        self.elapsed_ms = 0.0;
        Some(self.fps)
    }

    /// Most recently reported estimate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn reset(&mut self) {
        self.frames = 0;
        self.elapsed_ms = 0.0;
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
