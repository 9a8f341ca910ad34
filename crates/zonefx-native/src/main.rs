use std::cell::Cell;
use std::rc::Rc;

use anyhow::Context;
use glam::Vec3;

use zonefx_core::{LightHandle, LightSpec, RecordingSink, VisualSink, ZoneRegistry, ZoneSystem};

static DEMO_ZONES: &str = include_str!("../assets/zones.json");

const SEED: u64 = 42;
const FRAME_MS: f64 = 1000.0 / 60.0;
const WALK_SPEED: f32 = 1.5; // world units per second
const EYE_HEIGHT: f32 = 1.6;

/// Records like [`RecordingSink`] and logs every call at debug level so the
/// run can be inspected with `RUST_LOG=debug`.
#[derive(Default)]
struct LoggingSink {
    inner: RecordingSink,
}

impl VisualSink for LoggingSink {
    fn create_light(&mut self, spec: LightSpec) -> LightHandle {
        let handle = self.inner.create_light(spec);
        log::debug!(
            "[visual] create {:?} at ({:.2},{:.2},{:.2})",
            handle,
            spec.position.x,
            spec.position.y,
            spec.position.z
        );
        handle
    }

    fn update_light(&mut self, handle: LightHandle, position: Vec3, color: [f32; 3], opacity: f32) {
        log::trace!("[visual] update {:?} opacity={:.2}", handle, opacity);
        self.inner.update_light(handle, position, color, opacity);
    }

    fn destroy_light(&mut self, handle: LightHandle) {
        log::debug!("[visual] destroy {:?}", handle);
        self.inner.destroy_light(handle);
    }

    fn set_modifier(&mut self, name: &str, value: f32) {
        log::debug!("[visual] {} = {:.3}", name, value);
        self.inner.set_modifier(name, value);
    }
}

/// Waypoints: start outside everything, visit each zone center in registry
/// order, finish outside again.
fn build_path(registry: &ZoneRegistry) -> Vec<Vec3> {
    let centers: Vec<Vec3> = registry.zones().iter().filter_map(|z| z.center()).collect();
    let (Some(first), Some(last)) = (centers.first(), centers.last()) else {
        return vec![Vec3::new(0.0, EYE_HEIGHT, 0.0)];
    };
    let margin = Vec3::new(10.0, 0.0, 0.0);
    let mut path = Vec::with_capacity(centers.len() + 2);
    path.push(Vec3::new(first.x, EYE_HEIGHT, first.z) - margin);
    path.extend(centers.iter().copied());
    path.push(Vec3::new(last.x, EYE_HEIGHT, last.z) + margin);
    path
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading zone document {path}"))?,
        None => DEMO_ZONES.to_string(),
    };
    let registry = ZoneRegistry::from_json(&text);
    let path = build_path(&registry);

    let mut system = ZoneSystem::new(registry, SEED);
    let enters = Rc::new(Cell::new(0usize));
    let exits = Rc::new(Cell::new(0usize));
    {
        let enters = enters.clone();
        system.on_enter(move |_| enters.set(enters.get() + 1));
        let exits = exits.clone();
        system.on_exit(move |_| exits.set(exits.get() + 1));
    }

    let mut sink = LoggingSink::default();
    let mut time_ms = 0.0_f64;
    let mut peak_lights = 0usize;
    let mut peak_flicker = 0.0_f32;
    let step = WALK_SPEED * (FRAME_MS / 1000.0) as f32;

    for leg in path.windows(2) {
        let (from, to) = (leg[0], leg[1]);
        let frames = ((from.distance(to) / step).ceil() as usize).max(1);
        for f in 0..frames {
            let observer = from.lerp(to, f as f32 / frames as f32);
            let report = system.frame(observer, time_ms, &mut sink);
            peak_lights = peak_lights.max(sink.inner.live_count());
            peak_flicker = peak_flicker.max(report.flicker_intensity);
            time_ms += FRAME_MS;
        }
    }
    if let Some(end) = path.last() {
        system.frame(*end, time_ms, &mut sink);
    }
    system.shutdown(&mut sink);

    log::info!(
        "[harness] {:.1}s simulated, enters={} exits={} peak_lights={} peak_flicker={:.2} lights_left={}",
        time_ms / 1000.0,
        enters.get(),
        exits.get(),
        peak_lights,
        peak_flicker,
        sink.inner.live_count()
    );
    Ok(())
}
