use crate::constants::RAMP_SNAP_EPSILON;

/// Move `current` toward `target` by at most `max_rate_per_sec * dt_sec`.
///
/// Never overshoots. A remaining distance within float noise of the step size
/// snaps onto the target so a schedule that should land exactly does.
#[inline]
pub fn step_toward(current: f32, target: f32, max_rate_per_sec: f32, dt_sec: f32) -> f32 {
    let max_step = (max_rate_per_sec * dt_sec).max(0.0);
    let delta = target - current;
    if delta.abs() <= max_step + RAMP_SNAP_EPSILON {
        target
    } else {
        current + max_step.copysign(delta)
    }
}

/// Rate-limited scalar. The target is set instantly on zone transitions; the
/// current value is what renderers get to see.
#[derive(Clone, Copy, Debug)]
pub struct IntensityRamp {
    current: f32,
    target: f32,
    max_rate_per_sec: f32,
}

impl IntensityRamp {
    pub fn new(max_rate_per_sec: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            max_rate_per_sec,
        }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance by `dt_sec` and return the new current value.
    pub fn step(&mut self, dt_sec: f32) -> f32 {
        self.current = step_toward(self.current, self.target, self.max_rate_per_sec, dt_sec);
        self.current
    }

    /// Zero both values, e.g. on subsystem shutdown.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.target = 0.0;
    }
}
