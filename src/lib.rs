#![cfg(target_arch = "wasm32")]
//! Browser bindings for zonefx.
//!
//! The JS host owns the render loop (WebXR or `requestAnimationFrame`) and
//! calls [`ZoneFx::frame`] once per frame with the observer position and a
//! monotonic time in milliseconds. Visual output goes to a renderer object,
//! see [`sink::JsVisualSink`] for the methods it must provide.
use glam::Vec3;
use js_sys::{Array, Function, Object, Reflect};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use zonefx_core::{ZoneRegistry, ZoneSystem, ZoneTransition};

mod events;
mod overlay;
mod sink;

use sink::JsVisualSink;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("zonefx-web starting");
    Ok(())
}

fn to_js_error(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

fn event_object(kind: &str, id: &str) -> JsValue {
    let obj = Object::new();
    _ = Reflect::set(&obj, &"type".into(), &kind.into());
    _ = Reflect::set(&obj, &"id".into(), &id.into());
    obj.into()
}

// Callbacks run as microtasks, after `frame` has returned and released the
// `ZoneFx` borrow, so they may call back into the same object.
fn js_zone_callback(callback: Function, what: &'static str) -> impl FnMut(&zonefx_core::Zone) {
    move |zone: &zonefx_core::Zone| {
        let bound = callback.bind1(&JsValue::NULL, &JsValue::from_str(&zone.id));
        match web_sys::window() {
            Some(window) => window.queue_microtask(&bound),
            None => log::error!("{} callback for '{}' dropped: no window", what, zone.id),
        }
    }
}

#[wasm_bindgen]
pub struct ZoneFx {
    system: ZoneSystem,
    sink: JsVisualSink,
    debug_flag: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl ZoneFx {
    /// `config_json` may be absent (e.g. a failed fetch); the experience then
    /// runs without zones.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, renderer: JsValue, seed: u32) -> Result<ZoneFx, JsValue> {
        let sink = JsVisualSink::new(renderer).map_err(to_js_error)?;
        let registry = ZoneRegistry::from_optional_json(config_json.as_deref());
        let debug_flag = Rc::new(Cell::new(false));
        events::wire_debug_toggle_z(debug_flag.clone());
        Ok(ZoneFx {
            system: ZoneSystem::new(registry, seed as u64),
            sink,
            debug_flag,
        })
    }

    /// Advance one frame. Returns `[{type: "enter"|"exit", id}]` for the
    /// transitions of this frame.
    pub fn frame(&mut self, x: f32, y: f32, z: f32, time_ms: f64) -> Array {
        let report = self
            .system
            .frame(Vec3::new(x, y, z), time_ms, &mut self.sink);

        let debug = self.debug_flag.get();
        if debug != self.system.debug_visible() || (debug && !report.transitions.is_empty()) {
            self.system.set_debug_visible(debug);
            self.refresh_overlay();
        }

        let registry = self.system.registry();
        report
            .transitions
            .iter()
            .filter_map(|t| {
                let zone = registry.get(t.index())?;
                let kind = match t {
                    ZoneTransition::Enter(_) => "enter",
                    ZoneTransition::Exit(_) => "exit",
                };
                Some(event_object(kind, &zone.id))
            })
            .collect()
    }

    /// `callback(id)` runs once per enter, queued as a microtask after the
    /// `frame` call that detected it.
    #[wasm_bindgen(js_name = onEnter)]
    pub fn on_enter(&mut self, callback: Function) {
        self.system.on_enter(js_zone_callback(callback, "onEnter"));
    }

    #[wasm_bindgen(js_name = onExit)]
    pub fn on_exit(&mut self, callback: Function) {
        self.system.on_exit(js_zone_callback(callback, "onExit"));
    }

    /// Ids of zones containing a point. The first `frame` already reports
    /// zones around the start position as entered; use this to know earlier,
    /// not to synthesize an enter.
    #[wasm_bindgen(js_name = zonesContaining)]
    pub fn zones_containing(&self, x: f32, y: f32, z: f32) -> Array {
        self.system
            .registry()
            .containing(Vec3::new(x, y, z))
            .map(|zone| JsValue::from_str(&zone.id))
            .collect()
    }

    #[wasm_bindgen(js_name = zoneCenter)]
    pub fn zone_center(&self, id: &str) -> Option<Vec<f32>> {
        self.system
            .registry()
            .find(id)
            .and_then(|z| z.center())
            .map(|c| c.to_array().to_vec())
    }

    #[wasm_bindgen(getter, js_name = flickerIntensity)]
    pub fn flicker_intensity(&self) -> f32 {
        self.system.flicker_intensity()
    }

    #[wasm_bindgen(js_name = toggleDebug)]
    pub fn toggle_debug(&mut self) -> bool {
        let visible = self.system.toggle_debug();
        self.debug_flag.set(visible);
        self.refresh_overlay();
        visible
    }

    /// Zone extents and active flags as JSON, for drawing wireframes.
    #[wasm_bindgen(js_name = debugView)]
    pub fn debug_view(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.system.debug_view())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the zone set; every live effect is torn down first.
    pub fn reload(&mut self, config_json: &str) {
        let registry = ZoneRegistry::from_json(config_json);
        self.system.reload(registry, &mut self.sink);
        self.refresh_overlay();
    }

    pub fn shutdown(&mut self) {
        self.system.shutdown(&mut self.sink);
        self.refresh_overlay();
    }
}

impl ZoneFx {
    fn refresh_overlay(&self) {
        let Some(document) = overlay::document() else {
            return;
        };
        let visible = self.system.debug_visible();
        overlay::set_visible(&document, visible);
        if visible {
            overlay::update(&document, &self.system.debug_view());
        }
    }
}
