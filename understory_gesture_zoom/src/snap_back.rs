// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::bounds::{RestTarget, SnapBackReason};
use crate::config::SpringConfig;
use crate::spring::Spring;
use crate::state::TransformState;

/// Animates the live fields of a [`TransformState`] toward a valid rest target.
///
/// Scheduling a snap-back commits the target immediately, so a gesture that
/// starts mid-animation composes onto the correct baseline. The animation
/// itself only moves the live fields and is purely cosmetic.
///
/// State machine: `Idle` → ([`animate_to`](Self::animate_to)) → `Animating`
/// → (all springs at rest, or [`cancel`](Self::cancel)) → `Idle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapBackAnimator {
    config: SpringConfig,
    scale: Spring,
    x: Spring,
    y: Spring,
    reason: Option<SnapBackReason>,
}

impl SnapBackAnimator {
    /// Creates an idle animator using `config` for all three channels.
    #[must_use]
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            scale: Spring::at_rest(1.0),
            x: Spring::at_rest(0.0),
            y: Spring::at_rest(0.0),
            reason: None,
        }
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.reason.is_some()
    }

    /// Why the current animation was started, if one is running.
    #[must_use]
    pub fn reason(&self) -> Option<SnapBackReason> {
        self.reason
    }

    /// Commits `target` and starts animating the live fields toward it.
    ///
    /// If an animation is already running its velocity carries over.
    pub fn animate_to(&mut self, state: &mut TransformState, target: RestTarget) {
        if !self.is_animating() {
            self.scale = Spring::at_rest(state.scale);
            self.x = Spring::at_rest(state.translation.x);
            self.y = Spring::at_rest(state.translation.y);
        }
        self.scale.retarget(target.scale);
        self.x.retarget(target.translation.x);
        self.y.retarget(target.translation.y);
        state.commit_to(target.scale, target.translation);

        if self.all_at_rest() {
            self.finish(state);
        } else {
            self.reason = Some(target.reason);
        }
    }

    /// Advances the animation by `dt` seconds, writing the live fields.
    ///
    /// Returns `true` if more frames are needed.
    pub fn step(&mut self, state: &mut TransformState, dt: f64) -> bool {
        if !self.is_animating() {
            return false;
        }
        state.scale = self.scale.step(dt, &self.config);
        state.translation = Vec2::new(
            self.x.step(dt, &self.config),
            self.y.step(dt, &self.config),
        );
        if self.all_at_rest() {
            self.finish(state);
            return false;
        }
        true
    }

    /// Stops the animation where it is, without touching the state.
    ///
    /// Returns `true` if an animation was running.
    pub fn cancel(&mut self) -> bool {
        self.reason.take().is_some()
    }

    fn all_at_rest(&self) -> bool {
        self.scale.is_at_rest() && self.x.is_at_rest() && self.y.is_at_rest()
    }

    fn finish(&mut self, state: &mut TransformState) {
        self.scale.settle();
        self.x.settle();
        self.y.settle();
        state.scale = self.scale.value();
        state.translation = Vec2::new(self.x.value(), self.y.value());
        self.reason = None;
    }
}
