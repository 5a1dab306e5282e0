//! WASM exports for the gummy rain canvas.
//!
//! One `GummyRunner` lives in a `thread_local!`; every export borrows it through
//! `with_runner`. JS calls `gummy_init` once, then `gummy_tick(dt)` from its
//! `requestAnimationFrame` loop and reads the header and instances out of memory.

use std::cell::RefCell;

use gummy_engine::{InputEvent, WorldConfig};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::GummyRunner;

thread_local! {
    static RUNNER: RefCell<Option<GummyRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GummyRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Gummy world not initialized. Call gummy_init() first.");
        f(runner)
    })
}

fn to_js(err: serde_json::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Create the world. `config_json` is a partial `WorldConfig` (empty string for defaults).
/// Without an explicit `seed`, the clock seeds spawn placement.
#[wasm_bindgen]
pub fn gummy_init(config_json: &str, width: f32, height: f32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        WorldConfig {
            seed: js_sys::Date::now() as u64,
            ..Default::default()
        }
    } else {
        let value: serde_json::Value = serde_json::from_str(config_json).map_err(to_js)?;
        let mut config: WorldConfig = serde_json::from_value(value.clone()).map_err(to_js)?;
        if value.get("seed").is_none() {
            config.seed = js_sys::Date::now() as u64;
        }
        config
    };

    let runner = GummyRunner::new(config, width, height);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("gummy-rain: initialized {}x{}", width, height);
    Ok(())
}

#[wasm_bindgen]
pub fn gummy_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- World operations ----

/// Spawn a JSON array of `{color, weight, shape?, isBirthday?, title?, date?}`.
/// Returns how many old gummies the cap evicted.
#[wasm_bindgen]
pub fn gummy_add_gummies(json: &str) -> Result<u32, JsValue> {
    with_runner(|r| r.add_gummies_json(json))
        .map(|evicted| evicted as u32)
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn gummy_clear() {
    with_runner(|r| r.clear());
}

#[wasm_bindgen]
pub fn gummy_shake() {
    with_runner(|r| r.shake());
}

#[wasm_bindgen]
pub fn gummy_set_size(width: f32, height: f32) -> bool {
    with_runner(|r| r.set_size(width, height))
}

// ---- Pointer input (arena-local pixels) ----

#[wasm_bindgen]
pub fn gummy_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn gummy_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn gummy_pointer_up() {
    with_runner(|r| r.push_input(InputEvent::PointerUp));
}

#[wasm_bindgen]
pub fn gummy_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn gummy_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn gummy_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn gummy_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn gummy_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

/// CSS cursor for the canvas.
#[wasm_bindgen]
pub fn gummy_cursor() -> String {
    with_runner(|r| r.cursor().css().to_string())
}

#[wasm_bindgen]
pub fn gummy_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn gummy_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

/// Id of the topmost gummy under the point, or -1.
#[wasm_bindgen]
pub fn gummy_particle_at(x: f32, y: f32) -> f64 {
    with_runner(|r| r.particle_at(x, y).map_or(-1.0, |id| id.0 as f64))
}

/// Tooltip JSON for a gummy id, or `undefined` if it is gone.
#[wasm_bindgen]
pub fn gummy_metadata_json(id: u32) -> Option<String> {
    with_runner(|r| r.metadata_json(id))
}
