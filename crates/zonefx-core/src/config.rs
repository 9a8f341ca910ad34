//! Zone document format and its conversion into typed zones.
//!
//! The document is JSON:
//!
//! ```json
//! { "zones": [
//!     { "id": "crypt", "type": "box",
//!       "bounds": { "min": [-2, 0, -2], "max": [2, 3, 2] },
//!       "effects": { "flickering": { "enabled": true, "flickerAmount": 0.7 } } },
//!     { "id": "pool", "type": "sphere",
//!       "bounds": { "min": [5, 1, 0], "max": [1.5, 0, 0] } }
//! ] }
//! ```
//!
//! Sphere zones keep the center in `bounds.min` and the radius in
//! `bounds.max[0]`; both become [`ZoneShape::Sphere`] on load. A bare array of
//! zone entries is accepted as well.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::MAX_LIGHT_COUNT;
use crate::effects::{EffectKind, FlickerConfig, FloatingLightsConfig, ZoneEffects};
use crate::zone::{Zone, ZoneShape};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("zone document is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("zone '{id}': bounds contain non-finite values")]
    NonFinite { id: String },
    #[error("zone '{id}': min exceeds max on the {axis} axis")]
    InvertedBox { id: String, axis: char },
    #[error("zone '{id}': sphere radius {radius} is negative")]
    NegativeRadius { id: String, radius: f32 },
    #[error("zone '{id}': {count} floating lights exceeds the limit of {max}")]
    TooManyLights { id: String, count: usize, max: usize },
    #[error("zone '{id}': invalid '{effect}' effect: {source}")]
    Effect {
        id: String,
        effect: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn default_kind() -> String {
    "box".to_string()
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZonesDocument {
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
}

impl ZonesDocument {
    /// Parse either `{ "zones": [...] }` or a bare `[...]`.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if value.is_array() {
            let zones = serde_json::from_value(value)?;
            return Ok(Self { zones });
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ZoneEntry {
    pub id: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub bounds: BoundsEntry,
    #[serde(default)]
    pub effects: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BoundsEntry {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl ZoneEntry {
    /// Validate and convert into an immutable [`Zone`].
    pub fn into_zone(self) -> Result<Zone, ConfigError> {
        let min = Vec3::from(self.bounds.min);
        let max = Vec3::from(self.bounds.max);
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFinite { id: self.id });
        }
        let shape = match self.kind.as_str() {
            "box" => {
                let axes = [('x', min.x, max.x), ('y', min.y, max.y), ('z', min.z, max.z)];
                for (axis, lo, hi) in axes {
                    if lo > hi {
                        return Err(ConfigError::InvertedBox { id: self.id, axis });
                    }
                }
                ZoneShape::Box { min, max }
            }
            "sphere" => {
                let radius = max.x;
                if radius < 0.0 {
                    return Err(ConfigError::NegativeRadius {
                        id: self.id,
                        radius,
                    });
                }
                ZoneShape::Sphere { center: min, radius }
            }
            other => {
                log::warn!(
                    "[zones] zone '{}' has unknown type '{}'; it will never activate",
                    self.id,
                    other
                );
                ZoneShape::Unknown {
                    kind: other.to_string(),
                }
            }
        };
        let effects = parse_effects(&self.id, self.effects)?;
        Ok(Zone {
            id: self.id,
            shape,
            effects,
        })
    }
}

fn parse_effects(id: &str, raw: Map<String, Value>) -> Result<ZoneEffects, ConfigError> {
    let mut effects = ZoneEffects::default();
    for (name, value) in raw {
        match EffectKind::from_name(&name) {
            Some(EffectKind::Flickering) => {
                let cfg: FlickerConfig = serde_json::from_value(value).map_err(|source| {
                    ConfigError::Effect {
                        id: id.to_string(),
                        effect: EffectKind::Flickering.name(),
                        source,
                    }
                })?;
                effects.flickering = Some(cfg);
            }
            Some(EffectKind::FloatingLights) => {
                let cfg: FloatingLightsConfig =
                    serde_json::from_value(value).map_err(|source| ConfigError::Effect {
                        id: id.to_string(),
                        effect: EffectKind::FloatingLights.name(),
                        source,
                    })?;
                if cfg.count > MAX_LIGHT_COUNT {
                    return Err(ConfigError::TooManyLights {
                        id: id.to_string(),
                        count: cfg.count,
                        max: MAX_LIGHT_COUNT,
                    });
                }
                effects.floating_lights = Some(cfg);
            }
            None => log::debug!("[zones] zone '{}': ignoring unknown effect '{}'", id, name),
        }
    }
    Ok(effects)
}
