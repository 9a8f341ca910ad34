//! Typed effect configuration and multi-zone aggregation.
//!
//! Effect records are parsed into typed structs once at load time so the
//! aggregation below can rely on well-formed values. Overlap policy:
//! - flicker: the maximum intensity across active zones wins (ties keep the
//!   earlier zone in registry order)
//! - floating lights: every qualifying zone gets its own particle group

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::membership::MembershipTracker;
use crate::registry::ZoneRegistry;
use crate::zone::Zone;

/// Effect kinds the core knows how to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Flickering,
    FloatingLights,
}

impl EffectKind {
    /// Map a document effect name; unrecognized names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "flickering" => Some(EffectKind::Flickering),
            "floatingLights" => Some(EffectKind::FloatingLights),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Flickering => "flickering",
            EffectKind::FloatingLights => "floatingLights",
        }
    }
}

fn default_flicker_amount() -> f32 {
    DEFAULT_FLICKER_AMOUNT
}
fn default_flicker_speed() -> f32 {
    DEFAULT_FLICKER_SPEED
}
fn default_flicker_threshold() -> f32 {
    DEFAULT_FLICKER_THRESHOLD
}
fn default_light_count() -> usize {
    DEFAULT_LIGHT_COUNT
}
fn default_light_speed() -> f32 {
    DEFAULT_LIGHT_SPEED
}
fn default_light_color() -> [f32; 3] {
    DEFAULT_LIGHT_COLOR
}
fn default_light_size() -> f32 {
    DEFAULT_LIGHT_SIZE
}
fn default_light_opacity() -> f32 {
    DEFAULT_LIGHT_OPACITY
}

/// Screen flicker driven by a named modifier on the renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlickerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_flicker_amount")]
    pub flicker_amount: f32,
    #[serde(default = "default_flicker_speed")]
    pub flicker_speed: f32,
    #[serde(default = "default_flicker_threshold")]
    pub threshold: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            flicker_amount: DEFAULT_FLICKER_AMOUNT,
            flicker_speed: DEFAULT_FLICKER_SPEED,
            threshold: DEFAULT_FLICKER_THRESHOLD,
        }
    }
}

/// Drifting point lights spawned inside a zone while the observer is in it.
///
/// Fields:
/// - `count`: number of particles in the group
/// - `speed`: scale of the random drift velocity (vertical component halved)
/// - `color`: base RGB, modulated per frame by a brightness pulse
/// - `size`: point size handed to the renderer at creation
/// - `opacity`: peak opacity before the per-particle pulse
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloatingLightsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_light_count")]
    pub count: usize,
    #[serde(default = "default_light_speed")]
    pub speed: f32,
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
    #[serde(default = "default_light_size")]
    pub size: f32,
    #[serde(default = "default_light_opacity")]
    pub opacity: f32,
}

impl Default for FloatingLightsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: DEFAULT_LIGHT_COUNT,
            speed: DEFAULT_LIGHT_SPEED,
            color: DEFAULT_LIGHT_COLOR,
            size: DEFAULT_LIGHT_SIZE,
            opacity: DEFAULT_LIGHT_OPACITY,
        }
    }
}

/// All recognized effects declared by one zone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoneEffects {
    pub flickering: Option<FlickerConfig>,
    pub floating_lights: Option<FloatingLightsConfig>,
}

impl ZoneEffects {
    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        match kind {
            EffectKind::Flickering => self.flicker().is_some(),
            EffectKind::FloatingLights => self.floating_lights().is_some(),
        }
    }

    /// Flicker config if declared and enabled.
    pub fn flicker(&self) -> Option<&FlickerConfig> {
        self.flickering.as_ref().filter(|c| c.enabled)
    }

    /// Floating-lights config if declared and enabled.
    pub fn floating_lights(&self) -> Option<&FloatingLightsConfig> {
        self.floating_lights.as_ref().filter(|c| c.enabled)
    }
}

/// Resolved flicker state for the current active-zone set.
#[derive(Clone, Copy, Debug)]
pub struct FlickerState<'a> {
    pub active: bool,
    pub intensity: f32,
    pub zone: Option<&'a Zone>,
    pub config: Option<&'a FlickerConfig>,
}

impl FlickerState<'_> {
    pub fn inactive() -> Self {
        Self {
            active: false,
            intensity: 0.0,
            zone: None,
            config: None,
        }
    }
}

/// A zone contributing its own floating-light group.
#[derive(Clone, Copy, Debug)]
pub struct FloatingLightZone<'a> {
    pub zone: &'a Zone,
    pub config: &'a FloatingLightsConfig,
}

/// Read-only view combining the registry with the tracker's active set.
pub struct EffectAggregator<'a> {
    registry: &'a ZoneRegistry,
    tracker: &'a MembershipTracker,
}

impl<'a> EffectAggregator<'a> {
    pub fn new(registry: &'a ZoneRegistry, tracker: &'a MembershipTracker) -> Self {
        Self { registry, tracker }
    }

    /// Zones currently inside, in registry order.
    pub fn active_zones(&self) -> impl Iterator<Item = &'a Zone> + 'a {
        let registry: &'a ZoneRegistry = self.registry;
        let tracker: &'a MembershipTracker = self.tracker;
        tracker.active_indices().filter_map(move |i| registry.get(i))
    }

    /// First active zone (registry order) with `kind` enabled.
    pub fn active_effect(&self, kind: EffectKind) -> Option<&'a Zone> {
        self.active_zones().find(|z| z.effects.is_enabled(kind))
    }

    pub fn flicker_state(&self) -> FlickerState<'a> {
        let mut state = FlickerState::inactive();
        for zone in self.active_zones() {
            let Some(cfg) = zone.effects.flicker() else {
                continue;
            };
            if cfg.flicker_amount > state.intensity {
                state.intensity = cfg.flicker_amount;
                state.zone = Some(zone);
                state.config = Some(cfg);
            }
        }
        state.active = state.intensity > 0.0;
        state
    }

    pub fn floating_light_zones(&self) -> Vec<FloatingLightZone<'a>> {
        self.active_zones()
            .filter_map(|zone| {
                zone.effects
                    .floating_lights()
                    .map(|config| FloatingLightZone { zone, config })
            })
            .collect()
    }
}
