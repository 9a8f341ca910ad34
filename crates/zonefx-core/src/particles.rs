//! Floating-light particle groups tied to zone membership.
//!
//! One group per zone id. Groups are spawned on zone enter, advanced every
//! frame and destroyed on zone exit; the manager is the only owner of
//! particles and of the visual handles they created.

use std::f32::consts::TAU;

use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;

use crate::constants::*;
use crate::effects::FloatingLightsConfig;
use crate::visual::{LightHandle, LightSpec, VisualSink};
use crate::zone::Aabb;

/// A single drifting light. Everything but `base_position` is fixed at spawn.
#[derive(Clone, Debug)]
pub struct Particle {
    pub base_position: Vec3,
    pub velocity: Vec3,
    pub phase: f32,
    pub time_offset_ms: f64,
    pub handle: LightHandle,
}

#[derive(Clone, Debug)]
pub struct ParticleGroup {
    pub zone_id: String,
    pub bounds: Aabb,
    pub color: [f32; 3],
    pub config: FloatingLightsConfig,
    pub particles: Vec<Particle>,
}

impl ParticleGroup {
    fn advance<S: VisualSink + ?Sized>(&mut self, time_ms: f64, dt_sec: f32, sink: &mut S) {
        for p in &mut self.particles {
            p.base_position = wrap_position(p.base_position + p.velocity * dt_sec, &self.bounds);

            let t = ((time_ms + p.time_offset_ms) / 1000.0) as f32;
            let position = p.base_position + drift_offset(t, p.phase);
            let opacity = self.config.opacity
                * (OPACITY_PULSE_BASE
                    + OPACITY_PULSE_SPAN * (t * OPACITY_PULSE_FREQUENCY + p.phase).sin());
            let brightness =
                BRIGHTNESS_BASE + BRIGHTNESS_SPAN * (t * BRIGHTNESS_FREQUENCY + p.phase).sin();
            let color = self.color.map(|c| c * brightness);
            sink.update_light(p.handle, position, color, opacity);
        }
    }

    fn destroy<S: VisualSink + ?Sized>(self, sink: &mut S) {
        for p in self.particles {
            sink.destroy_light(p.handle);
        }
    }
}

/// Three independent sine/cosine terms at different per-axis frequencies.
#[inline]
pub fn drift_offset(t: f32, phase: f32) -> Vec3 {
    Vec3::new(
        (t * DRIFT_FREQUENCY[0] + phase).sin() * DRIFT_AMPLITUDE[0],
        (t * DRIFT_FREQUENCY[1] + phase).cos() * DRIFT_AMPLITUDE[1],
        (t * DRIFT_FREQUENCY[2] + phase * DRIFT_PHASE_SCALE_Z).sin() * DRIFT_AMPLITUDE[2],
    )
}

/// Toroidal wraparound: leaving through one face re-enters at the opposite one.
#[inline]
pub fn wrap_position(p: Vec3, bounds: &Aabb) -> Vec3 {
    #[inline]
    fn wrap_axis(v: f32, lo: f32, hi: f32) -> f32 {
        if v > hi {
            lo
        } else if v < lo {
            hi
        } else {
            v
        }
    }
    Vec3::new(
        wrap_axis(p.x, bounds.min.x, bounds.max.x),
        wrap_axis(p.y, bounds.min.y, bounds.max.y),
        wrap_axis(p.z, bounds.min.z, bounds.max.z),
    )
}

/// Seconds between two host timestamps, clamped to `[0, MAX_FRAME_DELTA_SEC]`.
/// Non-finite input counts as no time passing.
#[inline]
pub fn frame_delta_sec(prev_ms: f64, now_ms: f64) -> f32 {
    let dt = ((now_ms - prev_ms) / 1000.0) as f32;
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DELTA_SEC)
    } else {
        0.0
    }
}

#[inline]
fn lerp_rand(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    lo + (hi - lo) * rng.gen::<f32>()
}

/// Owner of every live particle group.
///
/// Time is always supplied by the caller (monotonic milliseconds), so a given
/// seed and time sequence replays identically.
pub struct ParticleManager {
    groups: FnvHashMap<String, ParticleGroup>,
    rng: StdRng,
    last_time_ms: Option<f64>,
}

impl ParticleManager {
    pub fn new(seed: u64) -> Self {
        Self {
            groups: FnvHashMap::default(),
            rng: StdRng::seed_from_u64(seed),
            last_time_ms: None,
        }
    }

    /// Spawn `config.count` particles inside `bounds` for `zone_id`.
    ///
    /// Idempotent: an existing group for the id is returned untouched.
    pub fn spawn_for_zone<S: VisualSink + ?Sized>(
        &mut self,
        zone_id: &str,
        bounds: Aabb,
        config: &FloatingLightsConfig,
        sink: &mut S,
    ) -> &ParticleGroup {
        if self.groups.contains_key(zone_id) {
            log::trace!("[particles] group for '{}' already live", zone_id);
            return &self.groups[zone_id];
        }

        let count = config.count.min(MAX_LIGHT_COUNT);
        if count < config.count {
            log::warn!(
                "[particles] '{}' asked for {} lights; capping at {}",
                zone_id,
                config.count,
                MAX_LIGHT_COUNT
            );
        }
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let base_position = Vec3::new(
                lerp_rand(&mut self.rng, bounds.min.x, bounds.max.x),
                lerp_rand(&mut self.rng, bounds.min.y, bounds.max.y),
                lerp_rand(&mut self.rng, bounds.min.z, bounds.max.z),
            );
            let mut velocity = Vec3::new(
                lerp_rand(&mut self.rng, -1.0, 1.0),
                lerp_rand(&mut self.rng, -1.0, 1.0),
                lerp_rand(&mut self.rng, -1.0, 1.0),
            ) * config.speed;
            velocity.y *= 0.5;
            let phase = self.rng.gen::<f32>() * TAU;
            let time_offset_ms = self.rng.gen::<f64>() * PARTICLE_TIME_OFFSET_MAX_MS;
            let handle = sink.create_light(LightSpec {
                position: base_position,
                color: config.color,
                opacity: config.opacity,
                size: config.size,
            });
            particles.push(Particle {
                base_position,
                velocity,
                phase,
                time_offset_ms,
                handle,
            });
        }
        log::debug!(
            "[particles] spawned {} light(s) for '{}'",
            particles.len(),
            zone_id
        );

        self.groups
            .entry(zone_id.to_string())
            .or_insert(ParticleGroup {
                zone_id: zone_id.to_string(),
                bounds,
                color: config.color,
                config: config.clone(),
                particles,
            })
    }

    /// Destroy the group for `zone_id` and its visual elements. Returns
    /// whether a group existed.
    pub fn remove_for_zone<S: VisualSink + ?Sized>(&mut self, zone_id: &str, sink: &mut S) -> bool {
        match self.groups.remove(zone_id) {
            Some(group) => {
                log::debug!(
                    "[particles] removing {} light(s) for '{}'",
                    group.particles.len(),
                    zone_id
                );
                group.destroy(sink);
                true
            }
            None => false,
        }
    }

    /// Advance every live group to `time_ms`. A non-finite time is ignored.
    pub fn update<S: VisualSink + ?Sized>(&mut self, time_ms: f64, sink: &mut S) {
        if !time_ms.is_finite() {
            log::debug!("[particles] ignoring non-finite time {}", time_ms);
            return;
        }
        let dt_sec = match self.last_time_ms {
            Some(prev) => frame_delta_sec(prev, time_ms),
            None => 0.0,
        };
        self.last_time_ms = Some(time_ms);
        for group in self.groups.values_mut() {
            group.advance(time_ms, dt_sec, sink);
        }
    }

    /// Tear down every group. Safe to call at any time.
    pub fn remove_all<S: VisualSink + ?Sized>(&mut self, sink: &mut S) {
        for (_, group) in self.groups.drain() {
            group.destroy(sink);
        }
        self.last_time_ms = None;
    }

    pub fn has_group(&self, zone_id: &str) -> bool {
        self.groups.contains_key(zone_id)
    }

    pub fn group(&self, zone_id: &str) -> Option<&ParticleGroup> {
        self.groups.get(zone_id)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Particles owned for `zone_id`; zero when no group is live.
    pub fn particle_count(&self, zone_id: &str) -> usize {
        self.groups.get(zone_id).map_or(0, |g| g.particles.len())
    }

    pub fn total_particles(&self) -> usize {
        self.groups.values().map(|g| g.particles.len()).sum()
    }
}
