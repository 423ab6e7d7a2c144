// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

use crate::config::ZoomConfig;
use crate::state::TransformState;

/// Outcome of a single pan `change` event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanUpdate {
    /// The translation was applied.
    Applied {
        /// Live translation after the update.
        translation: Vec2,
    },
    /// The pointer count is outside the accepted range; state is unchanged.
    Gated {
        /// Number of contact points reported with the event.
        pointers: usize,
    },
}

/// Applies two-finger pan lifecycle events to a [`TransformState`].
///
/// Pan deltas are cumulative from the gesture start, so each `change` replaces
/// the in-flight pan offset rather than adding to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanHandler {
    min_pointers: usize,
    max_pointers: usize,
}

impl PanHandler {
    /// Creates a handler gated by the pointer range in `config`.
    #[must_use]
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            min_pointers: config.pan_min_pointers,
            max_pointers: config.pan_max_pointers,
        }
    }

    /// Applies a cumulative pan `translation` reported with `pointers` contacts.
    ///
    /// The first accepted event opens the lifecycle.
    pub fn change(
        &self,
        state: &mut TransformState,
        translation: Vec2,
        pointers: usize,
    ) -> PanUpdate {
        if pointers < self.min_pointers || pointers > self.max_pointers {
            return PanUpdate::Gated { pointers };
        }
        state.pan_active = true;
        state.pan_offset = translation;
        state.refresh_translation();
        PanUpdate::Applied {
            translation: state.translation,
        }
    }

    /// Closes the pan lifecycle and folds its offset into the committed slot.
    ///
    /// Returns `false` if no pan was open.
    pub fn end(&self, state: &mut TransformState) -> bool {
        if !state.pan_active {
            return false;
        }
        state.pan_active = false;
        state.committed_translation += state.pan_offset;
        state.pan_offset = Vec2::ZERO;
        state.refresh_translation();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> PanHandler {
        PanHandler::new(&ZoomConfig::default())
    }

    #[test]
    fn deltas_are_cumulative_from_gesture_start() {
        let mut state = TransformState::new();
        state.committed_translation = Vec2::new(5.0, 5.0);
        state.refresh_translation();

        let pan = handler();
        pan.change(&mut state, Vec2::new(10.0, 0.0), 2);
        pan.change(&mut state, Vec2::new(25.0, -5.0), 2);
        assert_eq!(state.translation(), Vec2::new(30.0, 0.0));
        assert!(state.is_panning());
    }

    #[test]
    fn wrong_pointer_counts_are_gated() {
        let mut state = TransformState::new();
        let pan = handler();

        let one = pan.change(&mut state, Vec2::new(40.0, 40.0), 1);
        assert_eq!(one, PanUpdate::Gated { pointers: 1 });
        let three = pan.change(&mut state, Vec2::new(40.0, 40.0), 3);
        assert_eq!(three, PanUpdate::Gated { pointers: 3 });

        assert!(!state.is_panning());
        assert_eq!(state.translation(), Vec2::ZERO);
    }

    #[test]
    fn end_commits_and_closes() {
        let mut state = TransformState::new();
        let pan = handler();
        pan.change(&mut state, Vec2::new(12.0, -7.0), 2);

        assert!(pan.end(&mut state));
        assert!(!state.is_panning());
        assert_eq!(state.committed_translation(), Vec2::new(12.0, -7.0));
        assert_eq!(state.translation(), Vec2::new(12.0, -7.0));

        assert!(!pan.end(&mut state));
    }

    #[test]
    fn pan_and_pinch_offsets_add() {
        let mut state = TransformState::new();
        state.pinch_offset = Vec2::new(-4.0, 2.0);
        handler().change(&mut state, Vec2::new(10.0, 10.0), 2);
        assert_eq!(state.translation(), Vec2::new(6.0, 12.0));
    }
}
