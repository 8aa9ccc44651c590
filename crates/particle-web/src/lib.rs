pub mod canvas;
pub mod runner;
pub mod scheduler;

pub use canvas::CanvasSurface;
pub use runner::FieldRunner;
pub use scheduler::WebScheduler;

use std::cell::RefCell;

use glam::Vec2;
use particle_field::{ConfigEvent, FieldConfig, FieldError, ParticleField};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns `None` before `field_init` succeeds.
fn with_runner<R>(f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("particle field not initialized; call field_init() first");
                None
            }
        }
    })
}

fn to_js(err: FieldError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window_size(window: &web_sys::Window) -> Vec2 {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Vec2::new(read(window.inner_width()), read(window.inner_height()))
}

/// Attach the field to `<canvas id=canvas_id>`.
///
/// `config_json` uses the camelCase `FieldConfig` keys; omitted keys take
/// their defaults. Without a config the field is seeded randomly.
#[wasm_bindgen]
pub fn field_init(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => FieldConfig::from_json(&json).map_err(to_js)?,
        None => FieldConfig::default().with_seed((js_sys::Math::random() * u32::MAX as f64) as u64),
    };

    let surface = match CanvasSurface::from_id(canvas_id) {
        Ok(surface) => surface,
        Err(err) => {
            log::error!("particle field: {}", err);
            return Err(to_js(err));
        }
    };
    let window = web_sys::window()
        .ok_or_else(|| to_js(FieldError::SurfaceUnavailable("no window".into())))?;
    let field = ParticleField::new(config, &surface, window_size(&window)).map_err(to_js)?;

    let callback = Closure::<dyn FnMut(f64)>::new(|timestamp: f64| {
        with_runner(|r| r.frame(timestamp));
    });
    let fps_readout = window.document().and_then(|d| d.get_element_by_id("fps"));
    let scheduler = WebScheduler::new(window, callback);
    let runner = FieldRunner::new(field, surface, scheduler, fps_readout);

    RUNNER.with(|cell| {
        // Cancel a previous runner's pending frame before it is dropped.
        if let Some(mut old) = cell.borrow_mut().replace(runner) {
            old.stop();
        }
    });
    log::info!("particle field: initialized on #{}", canvas_id);
    Ok(())
}

#[wasm_bindgen]
pub fn field_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn field_stop() {
    with_runner(|r| r.stop());
}

#[wasm_bindgen]
pub fn field_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}

/// Queue a control change by option name and textual value, as a form
/// control reports it (e.g. `("particleCount", "250")`).
#[wasm_bindgen]
pub fn field_set_option(option: &str, value: &str) -> Result<(), JsValue> {
    let event = ConfigEvent::from_option(option, value).map_err(|err| {
        log::warn!("rejected option {}={:?}: {}", option, value, err);
        to_js(err)
    })?;
    with_runner(|r| r.push_config(event));
    Ok(())
}

/// Queue a control change given as `{"option": ..., "value": ...}`.
#[wasm_bindgen]
pub fn field_apply_json(json: &str) -> Result<(), JsValue> {
    let event = ConfigEvent::from_json(json).map_err(|err| {
        log::warn!("rejected config event {}: {}", json, err);
        to_js(err)
    })?;
    with_runner(|r| r.push_config(event));
    Ok(())
}

/// Call from the window's `resize` listener.
#[wasm_bindgen]
pub fn field_resize() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let size = window_size(&window);
    with_runner(|r| r.resize(size));
}

#[wasm_bindgen]
pub fn field_fps() -> u32 {
    with_runner(|r| r.fps()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn field_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}
