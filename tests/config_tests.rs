// Host-side tests for zone document parsing and registry loading.

use glam::Vec3;
use zonefx_core::{
    ConfigError, ZoneRegistry, ZoneShape, ZonesDocument, DEFAULT_FLICKER_AMOUNT,
    DEFAULT_LIGHT_COUNT, DEFAULT_LIGHT_SPEED, MAX_LIGHT_COUNT,
};

const DOC: &str = r#"{
  "zones": [
    { "id": "hall", "bounds": { "min": [-1, 0, -1], "max": [1, 2, 1] } },
    { "id": "pool", "type": "sphere",
      "bounds": { "min": [4, 1, 0], "max": [2, 0, 0] },
      "effects": { "floatingLights": { "enabled": true } } },
    { "id": "crypt", "type": "box",
      "bounds": { "min": [0, 0, 0], "max": [3, 3, 3] },
      "effects": {
        "flickering": { "enabled": true, "flickerAmount": 0.7, "flickerSpeed": 2.5 },
        "ambientSound": { "enabled": true, "file": "drips.ogg" }
      } }
  ]
}"#;

#[test]
fn loads_zones_in_document_order() {
    let registry = ZoneRegistry::from_json(DOC);
    let ids: Vec<&str> = registry.zones().iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, ["hall", "pool", "crypt"]);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.index_of("crypt"), Some(2));
    assert!(registry.find("missing").is_none());
}

#[test]
fn type_defaults_to_box_and_effects_to_empty() {
    let registry = ZoneRegistry::from_json(DOC);
    let hall = registry.find("hall").unwrap();
    assert_eq!(
        hall.shape,
        ZoneShape::Box {
            min: Vec3::new(-1.0, 0.0, -1.0),
            max: Vec3::new(1.0, 2.0, 1.0),
        }
    );
    assert!(hall.effects.flickering.is_none());
    assert!(hall.effects.floating_lights.is_none());
}

#[test]
fn sphere_bounds_carry_center_and_radius() {
    let registry = ZoneRegistry::from_json(DOC);
    let pool = registry.find("pool").unwrap();
    assert_eq!(
        pool.shape,
        ZoneShape::Sphere {
            center: Vec3::new(4.0, 1.0, 0.0),
            radius: 2.0,
        }
    );
}

#[test]
fn effect_records_get_typed_defaults() {
    let registry = ZoneRegistry::from_json(DOC);
    let lights = registry
        .find("pool")
        .and_then(|z| z.effects.floating_lights())
        .cloned()
        .unwrap();
    assert_eq!(lights.count, DEFAULT_LIGHT_COUNT);
    assert_eq!(lights.speed, DEFAULT_LIGHT_SPEED);

    let crypt = registry.find("crypt").unwrap();
    let flicker = crypt.effects.flicker().unwrap();
    assert_eq!(flicker.flicker_amount, 0.7);
    assert_eq!(flicker.flicker_speed, 2.5);
}

#[test]
fn flicker_amount_defaults_when_unset() {
    let registry = ZoneRegistry::from_json(
        r#"[{ "id": "a", "bounds": { "min": [0,0,0], "max": [1,1,1] },
              "effects": { "flickering": { "enabled": true } } }]"#,
    );
    let cfg = registry.get(0).unwrap().effects.flicker().unwrap();
    assert_eq!(cfg.flicker_amount, DEFAULT_FLICKER_AMOUNT);
}

#[test]
fn disabled_or_missing_enabled_flag_counts_as_off() {
    let registry = ZoneRegistry::from_json(
        r#"[{ "id": "a", "bounds": { "min": [0,0,0], "max": [1,1,1] },
              "effects": { "flickering": { "flickerAmount": 0.9 },
                           "floatingLights": { "enabled": false } } }]"#,
    );
    let effects = &registry.get(0).unwrap().effects;
    assert!(effects.flickering.is_some());
    assert!(effects.flicker().is_none());
    assert!(effects.floating_lights().is_none());
}

#[test]
fn bare_array_documents_are_accepted() {
    let registry =
        ZoneRegistry::from_json(r#"[{ "id": "a", "bounds": { "min": [0,0,0], "max": [1,1,1] } }]"#);
    assert_eq!(registry.len(), 1);
}

#[test]
fn malformed_documents_degrade_to_empty() {
    for text in [
        "",
        "not json",
        "{\"zones\": 3}",
        "{\"zones\": [{\"id\": \"a\"}]}",
        "42",
    ] {
        let registry = ZoneRegistry::from_json(text);
        assert!(registry.is_empty(), "expected empty registry for {text:?}");
    }
    assert!(ZoneRegistry::from_json("{}").is_empty());
    assert!(ZoneRegistry::from_optional_json(None).is_empty());
}

#[test]
fn strict_loader_reports_parse_errors() {
    match ZoneRegistry::try_from_json("{ nope") {
        Err(ConfigError::Parse(_)) => {}
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn invalid_entries_are_skipped_individually() {
    let registry = ZoneRegistry::from_json(
        r#"{ "zones": [
            { "id": "inverted", "bounds": { "min": [1,0,0], "max": [0,1,1] } },
            { "id": "negative", "type": "sphere", "bounds": { "min": [0,0,0], "max": [-1,0,0] } },
            { "id": "bad-effect", "bounds": { "min": [0,0,0], "max": [1,1,1] },
              "effects": { "flickering": { "enabled": "yes" } } },
            { "id": "ok", "bounds": { "min": [0,0,0], "max": [1,1,1] } }
        ] }"#,
    );
    let ids: Vec<&str> = registry.zones().iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, ["ok"]);
}

#[test]
fn entry_errors_name_the_zone() {
    let doc = ZonesDocument::from_json(
        r#"[{ "id": "inverted", "bounds": { "min": [0,5,0], "max": [1,1,1] } }]"#,
    )
    .unwrap();
    let err = doc.zones.into_iter().next().unwrap().into_zone().unwrap_err();
    assert!(matches!(err, ConfigError::InvertedBox { axis: 'y', .. }));
    assert!(err.to_string().contains("inverted"));
}

#[test]
fn unknown_shape_loads_but_never_activates() {
    let registry = ZoneRegistry::from_json(
        r#"[{ "id": "tube", "type": "cylinder", "bounds": { "min": [0,0,0], "max": [1,1,1] } }]"#,
    );
    let tube = registry.find("tube").unwrap();
    assert_eq!(tube.shape.kind(), "cylinder");
    assert!(!tube.contains(Vec3::splat(0.5)));
}

#[test]
fn duplicate_ids_are_kept() {
    let registry = ZoneRegistry::from_json(
        r#"[{ "id": "dup", "bounds": { "min": [0,0,0], "max": [1,1,1] } },
            { "id": "dup", "bounds": { "min": [2,0,0], "max": [3,1,1] } }]"#,
    );
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.index_of("dup"), Some(0));
}

#[test]
fn containing_lists_zones_in_registry_order() {
    let registry = ZoneRegistry::from_json(DOC);
    let ids: Vec<&str> = registry
        .containing(Vec3::new(0.5, 1.0, 0.5))
        .map(|z| z.id.as_str())
        .collect();
    assert_eq!(ids, ["hall", "crypt"]);
}

#[test]
fn oversized_light_counts_are_rejected_per_entry() {
    let registry = ZoneRegistry::from_json(
        r#"[
            { "id": "flood", "bounds": { "min": [0,0,0], "max": [1,1,1] },
              "effects": { "floatingLights": { "enabled": true, "count": 18446744073709551615 } } },
            { "id": "ok", "bounds": { "min": [0,0,0], "max": [1,1,1] },
              "effects": { "floatingLights": { "enabled": true, "count": 4 } } }
        ]"#,
    );
    let ids: Vec<&str> = registry.zones().iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, ["ok"]);

    let doc = ZonesDocument::from_json(&format!(
        r#"[{{ "id": "flood", "bounds": {{ "min": [0,0,0], "max": [1,1,1] }},
              "effects": {{ "floatingLights": {{ "enabled": true, "count": {} }} }} }}]"#,
        MAX_LIGHT_COUNT + 1
    ))
    .unwrap();
    let err = doc.zones.into_iter().next().unwrap().into_zone().unwrap_err();
    assert!(matches!(err, ConfigError::TooManyLights { count, .. } if count == MAX_LIGHT_COUNT + 1));
}

#[test]
fn light_count_at_the_limit_loads() {
    let registry = ZoneRegistry::from_json(&format!(
        r#"[{{ "id": "busy", "bounds": {{ "min": [0,0,0], "max": [1,1,1] }},
              "effects": {{ "floatingLights": {{ "enabled": true, "count": {} }} }} }}]"#,
        MAX_LIGHT_COUNT
    ));
    let lights = registry.zones()[0].effects.floating_lights().unwrap();
    assert_eq!(lights.count, MAX_LIGHT_COUNT);
}
