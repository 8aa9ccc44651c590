//! Frame-loop driver.
//!
//! The host owns the clock and the display refresh; the driver only asks it
//! for "one more frame" through a [`FrameScheduler`]. Each delivered frame
//! applies queued configuration, advances the field, renders it and schedules
//! the next frame. `stop()` cancels the pending request, and a callback that
//! still arrives afterwards is ignored, so nothing runs or reschedules once
//! the driver is stopped.

use crate::core::field::ParticleField;
use crate::core::time::FpsCounter;
use crate::input::queue::ConfigQueue;
use crate::renderer::surface::Surface;

/// Host-issued identifier for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// The host's per-frame callback mechanism (e.g. `requestAnimationFrame`).
pub trait FrameScheduler {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request that has not fired yet.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Milliseconds since the previous frame (0 for the first frame after start).
    pub delta_ms: f64,
    /// New FPS estimate, if one was published this frame.
    pub fps: Option<u32>,
}

pub struct FrameDriver<H: FrameScheduler> {
    scheduler: H,
    running: bool,
    pending: Option<FrameHandle>,
    last_timestamp: Option<f64>,
    fps: FpsCounter,
}

impl<H: FrameScheduler> FrameDriver<H> {
    pub fn new(scheduler: H) -> Self {
        Self {
            scheduler,
            running: false,
            pending: None,
            last_timestamp: None,
            fps: FpsCounter::new(),
        }
    }

    /// Begin requesting frames. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_timestamp = None;
        self.fps.reset();
        self.pending = Some(self.scheduler.request_frame());
        log::info!("frame loop started");
    }

    /// Cancel any pending frame; no further frames are requested.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::info!("frame loop stopped");
    }

    /// Handle one frame callback at host time `timestamp_ms`.
    /// Returns `None` (and does nothing) if the driver is stopped.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        field: &mut ParticleField,
        queue: &mut ConfigQueue,
        surface: &mut S,
    ) -> Option<FrameReport> {
        if !self.running {
            return None;
        }
        self.pending = None;

        // The first frame after start has no predecessor: its delta is zero
        // and it is left out of the FPS count.
        let (delta_ms, fps) = match self.last_timestamp {
            Some(prev) => {
                let delta = (timestamp_ms - prev).max(0.0);
                (delta, self.fps.tick(delta))
            }
            None => (0.0, None),
        };
        self.last_timestamp = Some(timestamp_ms);
        if let Some(fps) = fps {
            log::debug!("fps: {}", fps);
        }

        let size_before = field.viewport().size();
        for event in queue.drain() {
            field.apply(event, &*surface);
        }
        let size = field.viewport().size();
        if size != size_before {
            // Resize the buffer before drawing so this frame is not lost.
            surface.fit(size);
        }

        field.step(delta_ms as f32);
        field.render_frame(surface);

        self.pending = Some(self.scheduler.request_frame());
        Some(FrameReport { delta_ms, fps })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Most recent FPS estimate.
    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &H {
        &self.scheduler
    }
}
