//! Frame-driven cosmetic effect state.
//!
//! These oscillators are advanced by the render loop with delta-scaled
//! increments, independent of the simulation tick rate, so the glow and food
//! pulse stay smooth at any speed and keep animating while the game is
//! paused. Nothing here feeds back into the simulation.

use std::f64::consts::TAU;

/// Lifetime of the eat-burst ring, in milliseconds.
pub const EAT_BURST_MS: f64 = 300.0;

const GLOW_MIN: f64 = 0.5;
const GLOW_MAX: f64 = 1.0;
const GLOW_RATE_PER_MS: f64 = 0.003;
const PULSE_RATE_PER_MS: f64 = 0.005;

/// Transient expanding ring shown where food was eaten. `x`/`y` are canvas
/// pixels (the eaten cell's center).
#[derive(Clone, Copy, Debug, Default)]
pub struct EatBurst {
    pub active: bool,
    pub elapsed_ms: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct EffectState {
    /// Snake-head glow intensity, a reflecting triangle wave over
    /// [`GLOW_MIN`, `GLOW_MAX`] once it has climbed into the band.
    pub glow: f64,
    glow_dir: f64,
    /// Food pulse phase, wraps at one full sine cycle.
    pub food_pulse: f64,
    pub eat: EatBurst,
}

impl Default for EffectState {
    fn default() -> Self {
        Self {
            glow: 0.0,
            glow_dir: 1.0,
            food_pulse: 0.0,
            eat: EatBurst::default(),
        }
    }
}

impl EffectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all oscillators by `delta_ms` (time since the previous frame).
    pub fn advance(&mut self, delta_ms: f64) {
        self.glow += GLOW_RATE_PER_MS * self.glow_dir * delta_ms;
        if self.glow > GLOW_MAX {
            self.glow = GLOW_MAX;
            self.glow_dir = -1.0;
        } else if self.glow < GLOW_MIN {
            self.glow = GLOW_MIN;
            self.glow_dir = 1.0;
        }

        self.food_pulse += PULSE_RATE_PER_MS * delta_ms;
        if self.food_pulse > TAU {
            self.food_pulse = 0.0;
        }

        if self.eat.active {
            self.eat.elapsed_ms += delta_ms;
            if self.eat.elapsed_ms > EAT_BURST_MS {
                self.eat.active = false;
            }
        }
    }

    /// Arm the eat burst at a canvas pixel position with zero elapsed time.
    pub fn trigger_eat_burst(&mut self, x: f64, y: f64) {
        self.eat = EatBurst {
            active: true,
            elapsed_ms: 0.0,
            x,
            y,
        };
    }

    /// Scale factor applied to the food radius this frame, in [0.7, 1.0].
    pub fn food_pulse_scale(&self) -> f64 {
        0.85 + 0.15 * self.food_pulse.sin()
    }

    /// Normalized burst progress in [0, 1] while the burst is active.
    pub fn eat_burst_progress(&self) -> Option<f64> {
        if self.eat.active {
            Some((self.eat.elapsed_ms / EAT_BURST_MS).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}
