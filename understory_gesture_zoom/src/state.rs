// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Scale and translation of one zoomable surface.
///
/// The record keeps two slots:
/// - the *committed* baseline, confirmed when a gesture ends (or immediately
///   when a snap-back is scheduled), which the next gesture composes onto;
/// - the *live* values the renderer sees this frame, which include the
///   in-flight contributions of active gestures or the animated position of a
///   snap-back.
///
/// Translation is the offset of the surface center from the viewport center,
/// in viewport units. Pinch and pan contributions are kept separately and
/// summed, so neither handler reads the other's uncommitted values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    pub(crate) scale: f64,
    pub(crate) translation: Vec2,
    pub(crate) committed_scale: f64,
    pub(crate) committed_translation: Vec2,
    pub(crate) pinch_offset: Vec2,
    pub(crate) pan_offset: Vec2,
    pub(crate) anchor: Option<Point>,
    /// Committed scale and translation when the open pinch began.
    pub(crate) pinch_base: (f64, Vec2),
    pub(crate) pan_active: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformState {
    /// Creates the identity state: scale `1`, no translation, no gesture.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
            committed_scale: 1.0,
            committed_translation: Vec2::ZERO,
            pinch_offset: Vec2::ZERO,
            pan_offset: Vec2::ZERO,
            anchor: None,
            pinch_base: (1.0, Vec2::ZERO),
            pan_active: false,
        }
    }

    /// Live uniform scale factor. Always `> 0`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Live translation of the surface center from the viewport center.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Scale confirmed at the end of the last gesture.
    #[must_use]
    pub fn committed_scale(&self) -> f64 {
        self.committed_scale
    }

    /// Translation confirmed at the end of the last gesture.
    #[must_use]
    pub fn committed_translation(&self) -> Vec2 {
        self.committed_translation
    }

    /// Focal point of the active pinch, relative to the viewport center.
    ///
    /// `None` when no pinch is active.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Returns `true` while a pinch lifecycle is open.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.anchor.is_some()
    }

    /// Returns `true` while a pan lifecycle is open.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_active
    }

    /// Returns `true` if both the live and committed slots are the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0
            && self.committed_scale == 1.0
            && self.translation == Vec2::ZERO
            && self.committed_translation == Vec2::ZERO
    }

    /// Recomputes the live translation from the baseline and in-flight offsets.
    pub(crate) fn refresh_translation(&mut self) {
        self.translation = self.committed_translation + self.pinch_offset + self.pan_offset;
    }

    /// Rebuilds every live field from the committed slot and in-flight gestures.
    ///
    /// Used when a handler takes over from a snap-back: whatever the animation
    /// had drawn is overwritten.
    pub(crate) fn sync_live(&mut self) {
        if !self.is_pinching() {
            self.scale = self.committed_scale;
        }
        self.refresh_translation();
    }

    /// Moves the committed slot to a settled target; live fields are untouched.
    pub(crate) fn commit_to(&mut self, scale: f64, translation: Vec2) {
        self.committed_scale = scale;
        self.committed_translation = translation;
    }

    /// Drops any in-flight gesture contributions and closes both lifecycles.
    pub(crate) fn abandon_gestures(&mut self) {
        self.pinch_offset = Vec2::ZERO;
        self.pan_offset = Vec2::ZERO;
        self.anchor = None;
        self.pan_active = false;
    }
}

/// What is currently driving a surface's transform.
///
/// Exactly one phase holds at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No gesture is active and nothing is animating.
    Idle,
    /// Only a pinch is active.
    Pinching,
    /// Only a pan is active.
    Panning,
    /// A pinch and a pan are active at the same time.
    PinchingAndPanning,
    /// A snap-back animation is bringing the live fields to rest.
    SnappingBack,
}

impl GesturePhase {
    /// Derives the phase from lifecycle flags.
    ///
    /// Active gestures take precedence over animation, since a handler always
    /// supersedes an in-flight snap-back.
    #[must_use]
    pub fn from_flags(pinching: bool, panning: bool, animating: bool) -> Self {
        match (pinching, panning) {
            (true, true) => Self::PinchingAndPanning,
            (true, false) => Self::Pinching,
            (false, true) => Self::Panning,
            (false, false) if animating => Self::SnappingBack,
            (false, false) => Self::Idle,
        }
    }

    /// Returns `true` if any gesture lifecycle is open.
    #[must_use]
    pub fn is_gesturing(self) -> bool {
        matches!(
            self,
            Self::Pinching | Self::Panning | Self::PinchingAndPanning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_identity() {
        let state = TransformState::new();
        assert!(state.is_identity());
        assert!(!state.is_pinching());
        assert!(!state.is_panning());
        assert_eq!(state.anchor(), None);
    }

    #[test]
    fn live_translation_sums_baseline_and_offsets() {
        let mut state = TransformState::new();
        state.committed_translation = Vec2::new(10.0, 0.0);
        state.pinch_offset = Vec2::new(-3.0, 4.0);
        state.pan_offset = Vec2::new(1.0, 1.0);
        state.refresh_translation();
        assert_eq!(state.translation(), Vec2::new(8.0, 5.0));
    }

    #[test]
    fn sync_live_keeps_pinch_scale_but_resets_otherwise() {
        let mut state = TransformState::new();
        state.committed_scale = 2.0;
        state.scale = 1.4;
        state.sync_live();
        assert_eq!(state.scale(), 2.0);

        state.anchor = Some(Point::ZERO);
        state.scale = 3.0;
        state.sync_live();
        assert_eq!(state.scale(), 3.0);
    }

    #[test]
    fn phase_prefers_gestures_over_animation() {
        assert_eq!(
            GesturePhase::from_flags(false, false, false),
            GesturePhase::Idle
        );
        assert_eq!(
            GesturePhase::from_flags(false, false, true),
            GesturePhase::SnappingBack
        );
        assert_eq!(
            GesturePhase::from_flags(true, false, true),
            GesturePhase::Pinching
        );
        assert_eq!(
            GesturePhase::from_flags(false, true, false),
            GesturePhase::Panning
        );
        assert_eq!(
            GesturePhase::from_flags(true, true, false),
            GesturePhase::PinchingAndPanning
        );
        assert!(GesturePhase::PinchingAndPanning.is_gesturing());
        assert!(!GesturePhase::SnappingBack.is_gesturing());
    }
}
