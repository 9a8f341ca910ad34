//! Per-frame orchestration of zones, effects, particles and the flicker ramp.
//!
//! [`ZoneSystem`] owns every piece of mutable state the subsystem needs, so
//! hosts keep exactly one value around and call [`ZoneSystem::frame`] once
//! per rendered frame. Within a frame the order is fixed:
//! 1. membership update (enter/exit edges)
//! 2. on any edge: aggregation, despawn of exited groups, spawn of newly
//!    active floating-light zones, host callbacks
//! 3. particle advance and flicker ramp step, every frame
//! 4. modifier writes to the visual sink

use glam::Vec3;

use crate::constants::*;
use crate::debug::{debug_view, ZoneDebugEntry};
use crate::effects::EffectAggregator;
use crate::membership::{MembershipTracker, Transitions, ZoneTransition};
use crate::particles::{frame_delta_sec, ParticleManager};
use crate::ramp::IntensityRamp;
use crate::registry::ZoneRegistry;
use crate::visual::VisualSink;
use crate::zone::Zone;

pub type ZoneCallback = Box<dyn FnMut(&Zone)>;

/// What happened during one call to [`ZoneSystem::frame`].
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    pub transitions: Transitions,
    pub flicker_intensity: f32,
    pub active_zones: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FlickerParams {
    speed: f32,
    threshold: f32,
}

pub struct ZoneSystem {
    registry: ZoneRegistry,
    tracker: MembershipTracker,
    particles: ParticleManager,
    flicker: IntensityRamp,
    flicker_params: Option<FlickerParams>,
    written_intensity: Option<f32>,
    last_time_ms: Option<f64>,
    on_enter: Vec<ZoneCallback>,
    on_exit: Vec<ZoneCallback>,
    debug_visible: bool,
}

impl ZoneSystem {
    /// `seed` drives particle placement; the same seed and inputs replay the
    /// same frames.
    pub fn new(registry: ZoneRegistry, seed: u64) -> Self {
        let tracker = MembershipTracker::new(registry.len());
        Self {
            registry,
            tracker,
            particles: ParticleManager::new(seed),
            flicker: IntensityRamp::new(FLICKER_RAMP_RATE_PER_SEC),
            flicker_params: None,
            written_intensity: None,
            last_time_ms: None,
            on_enter: Vec::new(),
            on_exit: Vec::new(),
            debug_visible: false,
        }
    }

    pub fn on_enter(&mut self, callback: impl FnMut(&Zone) + 'static) {
        self.on_enter.push(Box::new(callback));
    }

    pub fn on_exit(&mut self, callback: impl FnMut(&Zone) + 'static) {
        self.on_exit.push(Box::new(callback));
    }

    /// Run one frame for an observer at `observer` at host time `time_ms`.
    pub fn frame<S: VisualSink + ?Sized>(
        &mut self,
        observer: Vec3,
        time_ms: f64,
        sink: &mut S,
    ) -> FrameReport {
        let transitions = self.tracker.update(&self.registry, observer);
        if !transitions.is_empty() {
            self.apply_transitions(&transitions, sink);
        }

        self.particles.update(time_ms, sink);

        let dt_sec = match self.last_time_ms {
            Some(prev) => frame_delta_sec(prev, time_ms),
            None => 0.0,
        };
        if time_ms.is_finite() {
            self.last_time_ms = Some(time_ms);
        }
        let intensity = self.flicker.step(dt_sec);
        self.write_intensity(intensity, sink);

        log::trace!(
            "[zones] frame t={:.1} active={} flicker={:.3}",
            time_ms,
            self.tracker.active_count(),
            intensity
        );
        FrameReport {
            transitions,
            flicker_intensity: intensity,
            active_zones: self.tracker.active_count(),
        }
    }

    fn apply_transitions<S: VisualSink + ?Sized>(&mut self, transitions: &[ZoneTransition], sink: &mut S) {
        let aggregator = EffectAggregator::new(&self.registry, &self.tracker);

        let flicker = aggregator.flicker_state();
        self.flicker.set_target(flicker.intensity);
        let params = flicker.config.map(|c| FlickerParams {
            speed: c.flicker_speed,
            threshold: c.threshold,
        });
        if let Some(p) = params {
            if self.flicker_params != Some(p) {
                sink.set_modifier(MODIFIER_FLICKER_SPEED, p.speed);
                sink.set_modifier(MODIFIER_FLICKER_THRESHOLD, p.threshold);
            }
        }
        self.flicker_params = params;

        for t in transitions.iter().filter(|t| !t.is_enter()) {
            if let Some(zone) = self.registry.get(t.index()) {
                self.particles.remove_for_zone(&zone.id, sink);
            }
        }
        for lights in aggregator.floating_light_zones() {
            if let Some(bounds) = lights.zone.shape.aabb() {
                self.particles
                    .spawn_for_zone(&lights.zone.id, bounds, lights.config, sink);
            }
        }

        for t in transitions {
            let Some(zone) = self.registry.get(t.index()) else {
                continue;
            };
            match t {
                ZoneTransition::Enter(_) => {
                    log::info!("[zones] entered '{}'", zone.id);
                    for cb in self.on_enter.iter_mut() {
                        cb(zone);
                    }
                }
                ZoneTransition::Exit(_) => {
                    log::info!("[zones] exited '{}'", zone.id);
                    for cb in self.on_exit.iter_mut() {
                        cb(zone);
                    }
                }
            }
        }
    }

    fn write_intensity<S: VisualSink + ?Sized>(&mut self, intensity: f32, sink: &mut S) {
        if self.written_intensity != Some(intensity) {
            sink.set_modifier(MODIFIER_FLICKER_INTENSITY, intensity);
            self.written_intensity = Some(intensity);
        }
    }

    /// Tear everything down: particle groups, membership, ramp. Leaves no
    /// live visual elements behind.
    pub fn shutdown<S: VisualSink + ?Sized>(&mut self, sink: &mut S) {
        self.particles.remove_all(sink);
        self.tracker.reset();
        self.flicker.reset();
        self.flicker_params = None;
        self.last_time_ms = None;
        self.write_intensity(0.0, sink);
        log::info!("[zones] shut down");
    }

    /// Swap in a new registry; membership starts over from all-outside.
    pub fn reload<S: VisualSink + ?Sized>(&mut self, registry: ZoneRegistry, sink: &mut S) {
        self.shutdown(sink);
        self.tracker = MembershipTracker::new(registry.len());
        self.registry = registry;
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &MembershipTracker {
        &self.tracker
    }

    pub fn particles(&self) -> &ParticleManager {
        &self.particles
    }

    pub fn aggregator(&self) -> EffectAggregator<'_> {
        EffectAggregator::new(&self.registry, &self.tracker)
    }

    /// Intensity currently applied to the renderer.
    pub fn flicker_intensity(&self) -> f32 {
        self.flicker.current()
    }

    /// Intensity the ramp is heading for.
    pub fn flicker_target(&self) -> f32 {
        self.flicker.target()
    }

    pub fn debug_visible(&self) -> bool {
        self.debug_visible
    }

    pub fn set_debug_visible(&mut self, visible: bool) {
        self.debug_visible = visible;
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug_visible = !self.debug_visible;
        self.debug_visible
    }

    pub fn debug_view(&self) -> Vec<ZoneDebugEntry> {
        debug_view(&self.registry, &self.tracker)
    }
}
