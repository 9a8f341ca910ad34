//! Read-only debug view over the registry and the current membership.

use serde::Serialize;

use crate::constants::{DEBUG_ACTIVE_COLOR, DEBUG_INACTIVE_COLOR};
use crate::membership::MembershipTracker;
use crate::registry::ZoneRegistry;

/// One zone's extents and state, ready for drawing a wireframe.
///
/// `min`/`max` are the bounding box (for spheres, the cube around the
/// sphere); both are `None` for zones of unknown shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDebugEntry {
    pub id: String,
    pub shape: String,
    pub min: Option<[f32; 3]>,
    pub max: Option<[f32; 3]>,
    pub radius: Option<f32>,
    pub active: bool,
    pub color: [f32; 3],
}

pub fn debug_view(registry: &ZoneRegistry, tracker: &MembershipTracker) -> Vec<ZoneDebugEntry> {
    registry
        .zones()
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let active = tracker.is_inside(i);
            let aabb = zone.shape.aabb();
            let radius = match zone.shape {
                crate::zone::ZoneShape::Sphere { radius, .. } => Some(radius),
                _ => None,
            };
            ZoneDebugEntry {
                id: zone.id.clone(),
                shape: zone.shape.kind().to_string(),
                min: aabb.map(|b| b.min.to_array()),
                max: aabb.map(|b| b.max.to_array()),
                radius,
                active,
                color: if active {
                    DEBUG_ACTIVE_COLOR
                } else {
                    DEBUG_INACTIVE_COLOR
                },
            }
        })
        .collect()
}
