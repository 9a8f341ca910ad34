use glam::Vec3;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use zonefx_core::{LightHandle, LightSpec, VisualSink};

/// Visual sink forwarding to a JS renderer object.
///
/// Expected methods on the object (handles are allocated here and passed in):
/// - `createLight(handle, x, y, z, r, g, b, opacity, size)`
/// - `updateLight(handle, x, y, z, r, g, b, opacity)`
/// - `destroyLight(handle)`
/// - `setModifier(name, value)`
///
/// JS exceptions are logged and swallowed so the frame keeps going.
pub struct JsVisualSink {
    renderer: JsValue,
    create_light: Function,
    update_light: Function,
    destroy_light: Function,
    set_modifier: Function,
    next_handle: u32,
}

fn method(renderer: &JsValue, name: &str) -> anyhow::Result<Function> {
    Reflect::get(renderer, &JsValue::from_str(name))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<Function>()
        .map_err(|_| anyhow::anyhow!("renderer.{} is not a function", name))
}

fn numbers(values: &[f64]) -> Array {
    values.iter().map(|v| JsValue::from_f64(*v)).collect()
}

impl JsVisualSink {
    pub fn new(renderer: JsValue) -> anyhow::Result<Self> {
        Ok(Self {
            create_light: method(&renderer, "createLight")?,
            update_light: method(&renderer, "updateLight")?,
            destroy_light: method(&renderer, "destroyLight")?,
            set_modifier: method(&renderer, "setModifier")?,
            renderer,
            next_handle: 0,
        })
    }

    fn apply(&self, f: &Function, what: &str, args: &Array) {
        if let Err(e) = f.apply(&self.renderer, args) {
            log::error!("renderer.{} failed: {:?}", what, e);
        }
    }
}

impl VisualSink for JsVisualSink {
    fn create_light(&mut self, spec: LightSpec) -> LightHandle {
        let handle = LightHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        let args = numbers(&[
            handle.0 as f64,
            spec.position.x as f64,
            spec.position.y as f64,
            spec.position.z as f64,
            spec.color[0] as f64,
            spec.color[1] as f64,
            spec.color[2] as f64,
            spec.opacity as f64,
            spec.size as f64,
        ]);
        self.apply(&self.create_light, "createLight", &args);
        handle
    }

    fn update_light(&mut self, handle: LightHandle, position: Vec3, color: [f32; 3], opacity: f32) {
        let args = numbers(&[
            handle.0 as f64,
            position.x as f64,
            position.y as f64,
            position.z as f64,
            color[0] as f64,
            color[1] as f64,
            color[2] as f64,
            opacity as f64,
        ]);
        self.apply(&self.update_light, "updateLight", &args);
    }

    fn destroy_light(&mut self, handle: LightHandle) {
        if let Err(e) = self
            .destroy_light
            .call1(&self.renderer, &JsValue::from_f64(handle.0 as f64))
        {
            log::error!("renderer.destroyLight failed: {:?}", e);
        }
    }

    fn set_modifier(&mut self, name: &str, value: f32) {
        if let Err(e) = self.set_modifier.call2(
            &self.renderer,
            &JsValue::from_str(name),
            &JsValue::from_f64(value as f64),
        ) {
            log::error!("renderer.setModifier({}) failed: {:?}", name, e);
        }
    }
}
