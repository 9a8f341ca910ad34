// Shared zone/effect tuning constants used by both web and native frontends.

// Effect defaults applied when a zone document leaves a field out
pub const DEFAULT_FLICKER_AMOUNT: f32 = 0.4;
pub const DEFAULT_FLICKER_SPEED: f32 = 1.0;
pub const DEFAULT_FLICKER_THRESHOLD: f32 = 0.5;

pub const DEFAULT_LIGHT_COUNT: usize = 5;
pub const MAX_LIGHT_COUNT: usize = 512; // per zone; larger documents are rejected at load
pub const DEFAULT_LIGHT_SPEED: f32 = 0.1; // world units per second, before the vertical halving
pub const DEFAULT_LIGHT_COLOR: [f32; 3] = [1.0, 0.85, 0.6]; // warm white
pub const DEFAULT_LIGHT_SIZE: f32 = 0.05;
pub const DEFAULT_LIGHT_OPACITY: f32 = 0.8;

// Flicker ramp: max change of the applied intensity per second
pub const FLICKER_RAMP_RATE_PER_SEC: f32 = 2.0;
// Remaining distances below this snap onto the target
pub const RAMP_SNAP_EPSILON: f32 = 1e-5;

// Particle animation
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1; // clamp after tab suspension / dropped frames
pub const PARTICLE_TIME_OFFSET_MAX_MS: f64 = 10_000.0;
pub const DRIFT_AMPLITUDE: [f32; 3] = [0.3, 0.2, 0.3];
pub const DRIFT_FREQUENCY: [f32; 3] = [0.5, 0.7, 0.3];
pub const DRIFT_PHASE_SCALE_Z: f32 = 1.3;
pub const OPACITY_PULSE_BASE: f32 = 0.6;
pub const OPACITY_PULSE_SPAN: f32 = 0.4;
pub const OPACITY_PULSE_FREQUENCY: f32 = 2.0;
pub const BRIGHTNESS_BASE: f32 = 0.8;
pub const BRIGHTNESS_SPAN: f32 = 0.2;
pub const BRIGHTNESS_FREQUENCY: f32 = 1.5;

// Modifier parameter names written to the visual sink
pub const MODIFIER_FLICKER_INTENSITY: &str = "flickerIntensity";
pub const MODIFIER_FLICKER_SPEED: &str = "flickerSpeed";
pub const MODIFIER_FLICKER_THRESHOLD: &str = "flickerThreshold";

// Debug palette for zone extents
pub const DEBUG_ACTIVE_COLOR: [f32; 3] = [0.2, 0.9, 0.3]; // green-ish
pub const DEBUG_INACTIVE_COLOR: [f32; 3] = [0.9, 0.3, 0.3]; // red-ish
