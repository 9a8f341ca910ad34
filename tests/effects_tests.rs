// Host-side tests for multi-zone effect aggregation.

use glam::Vec3;
use zonefx_core::{EffectAggregator, EffectKind, MembershipTracker, ZoneRegistry};

// "dim" and "dark" overlap around x=0; "lights-a" and "lights-b" overlap around x=10.
const DOC: &str = r#"[
    { "id": "dim", "bounds": { "min": [-2,0,-2], "max": [1,2,2] },
      "effects": { "flickering": { "enabled": true, "flickerAmount": 0.3, "flickerSpeed": 1.0 } } },
    { "id": "dark", "bounds": { "min": [-1,0,-2], "max": [2,2,2] },
      "effects": { "flickering": { "enabled": true, "flickerAmount": 0.7, "flickerSpeed": 4.0 } } },
    { "id": "plain", "bounds": { "min": [-1,0,-1], "max": [1,2,1] },
      "effects": { "flickering": { "enabled": false, "flickerAmount": 1.0 } } },
    { "id": "lights-a", "bounds": { "min": [8,0,-1], "max": [11,2,1] },
      "effects": { "floatingLights": { "enabled": true, "count": 3 } } },
    { "id": "lights-b", "type": "sphere", "bounds": { "min": [10,1,0], "max": [2,0,0] },
      "effects": { "floatingLights": { "enabled": true, "count": 7 },
                   "flickering": { "enabled": true } } }
]"#;

fn tracked_at(reg: &ZoneRegistry, p: Vec3) -> MembershipTracker {
    let mut tracker = MembershipTracker::new(reg.len());
    tracker.update(reg, p);
    tracker
}

#[test]
fn effect_names_map_to_kinds() {
    assert_eq!(EffectKind::from_name("flickering"), Some(EffectKind::Flickering));
    assert_eq!(
        EffectKind::from_name("floatingLights"),
        Some(EffectKind::FloatingLights)
    );
    assert_eq!(EffectKind::from_name("ambientSound"), None);
    assert_eq!(EffectKind::FloatingLights.name(), "floatingLights");
}

#[test]
fn overlapping_flicker_takes_the_maximum() {
    let reg = ZoneRegistry::from_json(DOC);
    let tracker = tracked_at(&reg, Vec3::new(0.0, 1.0, 0.0));
    let agg = EffectAggregator::new(&reg, &tracker);
    let state = agg.flicker_state();
    assert!(state.active);
    assert_eq!(state.intensity, 0.7);
    assert_eq!(state.zone.map(|z| z.id.as_str()), Some("dark"));
    assert_eq!(state.config.map(|c| c.flicker_speed), Some(4.0));
}

#[test]
fn single_flicker_zone_uses_its_amount() {
    let reg = ZoneRegistry::from_json(DOC);
    let tracker = tracked_at(&reg, Vec3::new(-1.5, 1.0, 0.0));
    let state = EffectAggregator::new(&reg, &tracker).flicker_state();
    assert!(state.active);
    assert_eq!(state.intensity, 0.3);
}

#[test]
fn flicker_amount_falls_back_to_default() {
    let reg = ZoneRegistry::from_json(DOC);
    // inside lights-b only (sphere), which enables flicker without an amount
    let tracker = tracked_at(&reg, Vec3::new(11.5, 1.0, 0.0));
    let state = EffectAggregator::new(&reg, &tracker).flicker_state();
    assert_eq!(state.intensity, 0.4);
}

#[test]
fn no_active_flicker_means_inactive_and_zero() {
    let reg = ZoneRegistry::from_json(DOC);
    let tracker = tracked_at(&reg, Vec3::new(50.0, 1.0, 0.0));
    let state = EffectAggregator::new(&reg, &tracker).flicker_state();
    assert!(!state.active);
    assert_eq!(state.intensity, 0.0);
    assert!(state.config.is_none());
    assert!(state.zone.is_none());
}

#[test]
fn active_zones_follow_registry_order() {
    let reg = ZoneRegistry::from_json(DOC);
    let tracker = tracked_at(&reg, Vec3::new(0.0, 1.0, 0.0));
    let agg = EffectAggregator::new(&reg, &tracker);
    let ids: Vec<&str> = agg.active_zones().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, ["dim", "dark", "plain"]);
    assert_eq!(
        agg.active_effect(EffectKind::Flickering).map(|z| z.id.as_str()),
        Some("dim")
    );
    assert!(agg.active_effect(EffectKind::FloatingLights).is_none());
}

#[test]
fn floating_lights_are_not_deduplicated() {
    let reg = ZoneRegistry::from_json(DOC);
    let tracker = tracked_at(&reg, Vec3::new(10.0, 1.0, 0.0));
    let zones = EffectAggregator::new(&reg, &tracker).floating_light_zones();
    let found: Vec<(&str, usize)> = zones
        .iter()
        .map(|l| (l.zone.id.as_str(), l.config.count))
        .collect();
    assert_eq!(found, [("lights-a", 3), ("lights-b", 7)]);
}

#[test]
fn equal_flicker_amounts_keep_the_earlier_zone() {
    let reg = ZoneRegistry::from_json(
        r#"[
            { "id": "first", "bounds": { "min": [0,0,0], "max": [2,2,2] },
              "effects": { "flickering": { "enabled": true, "flickerAmount": 0.5, "flickerSpeed": 1.5 } } },
            { "id": "second", "bounds": { "min": [1,0,0], "max": [3,2,2] },
              "effects": { "flickering": { "enabled": true, "flickerAmount": 0.5, "flickerSpeed": 6.0 } } }
        ]"#,
    );
    let tracker = tracked_at(&reg, Vec3::new(1.5, 1.0, 1.0));
    let state = EffectAggregator::new(&reg, &tracker).flicker_state();
    assert_eq!(state.intensity, 0.5);
    assert_eq!(state.zone.map(|z| z.id.as_str()), Some("first"));
    assert_eq!(state.config.map(|c| c.flicker_speed), Some(1.5));
}
