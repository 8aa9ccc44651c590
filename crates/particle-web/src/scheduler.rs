//! `requestAnimationFrame` as a [`FrameScheduler`].

use particle_field::{FrameHandle, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub struct WebScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl WebScheduler {
    /// `callback` receives the host's high-resolution timestamp in milliseconds.
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for WebScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {:?}", err);
                // 0 is never issued by the browser, so cancelling it is a no-op.
                FrameHandle(0)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, err);
        }
    }
}
