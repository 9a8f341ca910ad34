//! Opaque visual-effect interface the core writes to.
//!
//! The renderer lives outside this crate. The core only ever asks it to
//! create/update/destroy point-light-like elements and to set named scalar
//! modifiers. Calls are assumed synchronous and non-blocking.

use fnv::FnvHashMap;
use glam::Vec3;

/// Renderer-issued identifier for a created visual element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightHandle(pub u32);

/// Parameters for a new point-light-like element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSpec {
    pub position: Vec3,
    pub color: [f32; 3],
    pub opacity: f32,
    pub size: f32,
}

pub trait VisualSink {
    fn create_light(&mut self, spec: LightSpec) -> LightHandle;
    fn update_light(&mut self, handle: LightHandle, position: Vec3, color: [f32; 3], opacity: f32);
    fn destroy_light(&mut self, handle: LightHandle);
    fn set_modifier(&mut self, name: &str, value: f32);
}

/// In-memory sink keeping the last known state of every live element and
/// modifier. Used by the native harness and by tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    next_handle: u32,
    pub lights: FnvHashMap<LightHandle, LightSpec>,
    pub modifiers: FnvHashMap<String, f32>,
    /// Every value written per modifier, in order.
    pub modifier_log: Vec<(String, f32)>,
    pub created: usize,
    pub destroyed: usize,
    pub updates: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.lights.len()
    }

    pub fn modifier(&self, name: &str) -> Option<f32> {
        self.modifiers.get(name).copied()
    }
}

impl VisualSink for RecordingSink {
    fn create_light(&mut self, spec: LightSpec) -> LightHandle {
        let handle = LightHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.lights.insert(handle, spec);
        self.created += 1;
        handle
    }

    fn update_light(&mut self, handle: LightHandle, position: Vec3, color: [f32; 3], opacity: f32) {
        if let Some(spec) = self.lights.get_mut(&handle) {
            spec.position = position;
            spec.color = color;
            spec.opacity = opacity;
            self.updates += 1;
        }
    }

    fn destroy_light(&mut self, handle: LightHandle) {
        if self.lights.remove(&handle).is_some() {
            self.destroyed += 1;
        }
    }

    fn set_modifier(&mut self, name: &str, value: f32) {
        self.modifiers.insert(name.to_string(), value);
        self.modifier_log.push((name.to_string(), value));
    }
}
