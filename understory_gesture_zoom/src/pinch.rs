// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch lifecycle: focal-anchored scaling composed onto the committed baseline.
//!
//! ## Anchor math
//!
//! With transform origin at the surface center, a surface point `p` (relative
//! to that center) lands at `scale * p + translation` in viewport-centered
//! coordinates. At `begin` the focal point `a` covers the surface point
//! `(a - t0) / s0`, where `s0` / `t0` are the committed baseline at `begin`.
//! Choosing
//!
//! ```text
//! t1 = t0 - (a - t0) / s0 * (s1 - s0)
//! ```
//!
//! keeps that surface point under `a` at the new scale `s1`. The baseline is
//! snapshotted at `begin` and used for the whole lifecycle, so a concurrent
//! pan that commits mid-pinch does not move the pinch's contribution.

use kurbo::{Point, Vec2};

use crate::config::ZoomConfig;
use crate::state::TransformState;

/// Outcome of a single pinch `change` event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchUpdate {
    /// The new scale was accepted and the translation re-anchored.
    Applied {
        /// Live scale after the update.
        scale: f64,
    },
    /// The resulting scale would meet or exceed the ceiling; state is unchanged.
    AtCeiling {
        /// Scale the event would have produced.
        attempted: f64,
    },
    /// The resulting scale was not a positive finite number; state is unchanged.
    Invalid {
        /// Scale the event would have produced.
        attempted: f64,
    },
}

/// Applies pinch lifecycle events to a [`TransformState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchHandler {
    config: ZoomConfig,
}

impl PinchHandler {
    /// Creates a handler using the pinch tunables from `config`.
    #[must_use]
    pub fn new(config: &ZoomConfig) -> Self {
        Self { config: *config }
    }

    /// Opens a pinch lifecycle at `focal`, given in viewport coordinates.
    ///
    /// Records the anchor relative to `viewport_center`, snapshots the
    /// committed baseline, and resets the live scale to it.
    pub fn begin(&self, state: &mut TransformState, focal: Point, viewport_center: Point) {
        state.anchor = Some((focal - viewport_center).to_point());
        state.pinch_base = (state.committed_scale, state.committed_translation);
        state.pinch_offset = Vec2::ZERO;
        state.scale = state.committed_scale;
        state.refresh_translation();
    }

    /// Applies a cumulative raw pinch scale (relative to the gesture start).
    ///
    /// If no lifecycle is open, `focal` opens one first.
    pub fn change(
        &self,
        state: &mut TransformState,
        raw_scale: f64,
        focal: Point,
        viewport_center: Point,
    ) -> PinchUpdate {
        let anchor = match state.anchor {
            Some(anchor) => anchor,
            None => {
                self.begin(state, focal, viewport_center);
                (focal - viewport_center).to_point()
            }
        };

        let (prior_scale, prior_translation) = state.pinch_base;
        let new_scale = prior_scale * self.config.damped_scale(raw_scale);

        if !(new_scale.is_finite() && new_scale > 0.0) {
            return PinchUpdate::Invalid {
                attempted: new_scale,
            };
        }
        if new_scale >= self.config.max_scale {
            return PinchUpdate::AtCeiling {
                attempted: new_scale,
            };
        }

        let offset = (anchor.to_vec2() - prior_translation) / prior_scale;
        state.pinch_offset = -offset * (new_scale - prior_scale);
        state.scale = new_scale;
        state.refresh_translation();
        PinchUpdate::Applied { scale: new_scale }
    }

    /// Closes the pinch lifecycle and folds its result into the committed slot.
    ///
    /// Returns `false` if no pinch was open.
    pub fn end(&self, state: &mut TransformState) -> bool {
        if state.anchor.take().is_none() {
            return false;
        }
        state.committed_scale = state.scale;
        state.committed_translation += state.pinch_offset;
        state.pinch_offset = Vec2::ZERO;
        state.refresh_translation();
        true
    }
}
