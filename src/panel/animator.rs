//! Time-driven interpolation of the panel's top edge
//!
//! The animator is advanced by frame deltas on the UI thread. Retargeting a
//! running animator starts the new leg from the current interpolated value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing curves for panel motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Decelerating; the default for settles
    #[default]
    EaseOut,
    EaseIn,
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// Interpolates a single value from `from` to `to` over `duration`
#[derive(Debug, Clone)]
pub struct Animator {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Animator {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            // Zero-length legs still wait for one frame before landing.
            return if self.elapsed.is_zero() { self.from } else { self.to };
        }
        if self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        if self.duration.is_zero() {
            !self.elapsed.is_zero()
        } else {
            self.elapsed >= self.duration
        }
    }

    /// Advance by one frame, returning the new value
    pub fn advance(&mut self, dt: Duration) -> f32 {
        // A zero dt frame still counts as a frame for zero-length legs.
        self.elapsed = (self.elapsed + dt.max(Duration::from_nanos(1))).min(
            self.duration.max(Duration::from_nanos(1)),
        );
        self.value()
    }

    /// Replace this leg with a new one starting from the current value
    pub fn retarget(&mut self, to: f32, duration: Duration) {
        let current = self.value();
        *self = Self::new(current, to, duration, self.easing);
    }
}
