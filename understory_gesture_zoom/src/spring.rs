// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-dimensional damped spring.
//!
//! The spring integrates `m·x'' = -k·(x - target) - c·x'` with semi-implicit
//! Euler over fixed 1 ms substeps. A single call simulates at most 256 of
//! them; a longer frame places the value on the target instead, so the
//! integrator never runs past its stability limit. Once both the displacement and the speed drop below the
//! configured rest thresholds the value is placed exactly on the target.
//!
//! With [`SpringConfig::overshoot_clamping`] enabled the spring also stops the
//! moment it reaches or crosses the target, which gives a monotone approach
//! even for under-damped parameters.

use crate::config::SpringConfig;

/// Substep length in seconds.
const SUBSTEP: f64 = 0.001;
/// Upper bound on substeps per call.
const MAX_SUBSTEPS: f64 = 256.0;

/// A damped spring pulling one scalar toward a target.
///
/// ```rust
/// use understory_gesture_zoom::{Spring, SpringConfig};
///
/// let config = SpringConfig::default();
/// let mut spring = Spring::at_rest(0.0);
/// spring.retarget(100.0);
/// while !spring.is_at_rest() {
///     spring.step(1.0 / 60.0, &config);
/// }
/// assert_eq!(spring.value(), 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    /// Whether the value started above the target; used for overshoot clamping.
    approach_from_above: bool,
    at_rest: bool,
}

impl Spring {
    /// Creates a spring resting at `value`.
    #[must_use]
    pub const fn at_rest(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            approach_from_above: false,
            at_rest: true,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity, in units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is pulling toward.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Returns `true` once the spring has settled on its target.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Starts pulling toward `target`, keeping the current value and velocity.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
        self.approach_from_above = self.value > target;
        self.at_rest = self.value == target && self.velocity == 0.0;
    }

    /// Jumps onto the target and stops.
    pub fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Advances the simulation by `dt` seconds and returns the new value.
    pub fn step(&mut self, dt: f64, config: &SpringConfig) -> f64 {
        if self.at_rest || dt <= 0.0 {
            return self.value;
        }
        if dt > SUBSTEP * MAX_SUBSTEPS {
            self.settle();
            return self.value;
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            remaining -= h;

            let displacement = self.value - self.target;
            let force = -config.stiffness * displacement - config.damping * self.velocity;
            self.velocity += force / config.mass * h;
            self.value += self.velocity * h;

            if self.should_rest(config) {
                self.settle();
                break;
            }
        }
        self.value
    }

    fn should_rest(&self, config: &SpringConfig) -> bool {
        let displacement = self.value - self.target;
        if config.overshoot_clamping {
            let crossed = if self.approach_from_above {
                displacement <= 0.0
            } else {
                displacement >= 0.0
            };
            if crossed {
                return true;
            }
        }
        displacement.abs() < config.rest_displacement && self.velocity.abs() < config.rest_speed
    }
}
