use glam::Vec2;
use particle_field::{ConfigEvent, ConfigQueue, FrameDriver, ParticleField, Surface};
use web_sys::Element;

use crate::canvas::CanvasSurface;
use crate::scheduler::WebScheduler;

/// Wires the particle field to a canvas and the browser's frame callback.
///
/// Lives in a `thread_local!` (see `lib.rs`) because wasm-bindgen cannot
/// export the driver's generic types directly.
pub struct FieldRunner {
    field: ParticleField,
    queue: ConfigQueue,
    driver: FrameDriver<WebScheduler>,
    surface: CanvasSurface,
    /// Optional `#fps` element that mirrors the FPS estimate.
    fps_readout: Option<Element>,
}

impl FieldRunner {
    pub fn new(
        field: ParticleField,
        mut surface: CanvasSurface,
        scheduler: WebScheduler,
        fps_readout: Option<Element>,
    ) -> Self {
        surface.fit(field.viewport().size());
        Self {
            field,
            queue: ConfigQueue::new(),
            driver: FrameDriver::new(scheduler),
            surface,
            fps_readout,
        }
    }

    pub fn start(&mut self) {
        self.driver.start();
    }

    pub fn stop(&mut self) {
        self.driver.stop();
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// Queue a configuration change for the next frame.
    pub fn push_config(&mut self, event: ConfigEvent) {
        self.queue.push(event);
    }

    /// One animation-frame callback.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let Some(report) = self.driver.frame(
            timestamp_ms,
            &mut self.field,
            &mut self.queue,
            &mut self.surface,
        ) else {
            return;
        };

        if let (Some(fps), Some(el)) = (report.fps, &self.fps_readout) {
            el.set_text_content(Some(&fps.to_string()));
        }
    }

    /// Queue a resize using the window's inner size as fallback.
    pub fn resize(&mut self, window_size: Vec2) {
        self.push_config(ConfigEvent::ViewportResize {
            width: window_size.x,
            height: window_size.y,
        });
    }

    pub fn fps(&self) -> u32 {
        self.driver.fps()
    }

    pub fn particle_count(&self) -> u32 {
        self.field.len() as u32
    }
}
