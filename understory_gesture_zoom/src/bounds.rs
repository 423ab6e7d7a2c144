// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size, Vec2};

/// Why a surface needs to snap back after a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapBackReason {
    /// The surface rests below native size; it is fully reset to identity.
    UnderScale,
    /// The surface no longer covers the viewport on at least one axis.
    OutOfBounds,
    /// The host requested a reset.
    Reset,
}

/// A valid resting configuration to animate toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestTarget {
    /// Scale to rest at.
    pub scale: f64,
    /// Translation to rest at.
    pub translation: Vec2,
    /// Why the target differs from the current state.
    pub reason: SnapBackReason,
}

impl RestTarget {
    /// The identity transform, reached for `reason`.
    #[must_use]
    pub fn identity(reason: SnapBackReason) -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
            reason,
        }
    }
}

/// Bounds rule: the scaled surface must always cover the viewport.
///
/// For a viewport of size `w × h` and scale `s`, the valid translations are
/// `|x| <= w * (s - 1) / 2` and `|y| <= h * (s - 1) / 2`. At or below native
/// size the only valid translation is zero.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_gesture_zoom::BoundsPolicy;
///
/// let viewport = Size::new(400.0, 800.0);
/// // At 2x the surface may slide 200 units horizontally.
/// let fix = BoundsPolicy::evaluate(2.0, Vec2::new(260.0, 0.0), viewport);
/// assert_eq!(fix, Some(Vec2::new(-60.0, 0.0)));
/// assert_eq!(BoundsPolicy::evaluate(2.0, Vec2::new(150.0, 0.0), viewport), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundsPolicy;

impl BoundsPolicy {
    /// Half of the per-axis slack available at `scale`; never negative.
    #[must_use]
    pub fn slack(scale: f64, viewport: Size) -> Vec2 {
        let grow = (scale - 1.0).max(0.0) / 2.0;
        Vec2::new(viewport.width * grow, viewport.height * grow)
    }

    /// The rectangle of valid translations at `scale`, centered on the origin.
    #[must_use]
    pub fn allowed_region(scale: f64, viewport: Size) -> Rect {
        let slack = Self::slack(scale, viewport);
        Rect::new(-slack.x, -slack.y, slack.x, slack.y)
    }

    /// Returns the correction that brings `translation` back into bounds.
    ///
    /// Each axis is corrected independently: an over-dragged axis is pulled to
    /// its nearest bound and an in-bounds axis contributes zero. `None` means
    /// the translation is already valid.
    #[must_use]
    pub fn evaluate(scale: f64, translation: Vec2, viewport: Size) -> Option<Vec2> {
        let slack = Self::slack(scale, viewport);
        let dx = axis_correction(translation.x, slack.x);
        let dy = axis_correction(translation.y, slack.y);
        if dx == 0.0 && dy == 0.0 {
            None
        } else {
            Some(Vec2::new(dx, dy))
        }
    }

    /// Returns where a surface resting at `scale` / `translation` must go.
    ///
    /// Under-scale always resets to identity, regardless of translation.
    /// Otherwise an out-of-bounds translation is corrected per axis. `None`
    /// means the state is already a valid resting state.
    #[must_use]
    pub fn rest_target(scale: f64, translation: Vec2, viewport: Size) -> Option<RestTarget> {
        if scale < 1.0 {
            return Some(RestTarget::identity(SnapBackReason::UnderScale));
        }
        Self::evaluate(scale, translation, viewport)?;
        // Clamp rather than add the correction so the target lands exactly on the bound.
        let slack = Self::slack(scale, viewport);
        Some(RestTarget {
            scale,
            translation: Vec2::new(
                translation.x.clamp(-slack.x, slack.x),
                translation.y.clamp(-slack.y, slack.y),
            ),
            reason: SnapBackReason::OutOfBounds,
        })
    }
}

fn axis_correction(value: f64, bound: f64) -> f64 {
    if value > bound {
        bound - value
    } else if value < -bound {
        -bound - value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 800.0);

    #[test]
    fn native_scale_only_allows_zero_translation() {
        assert_eq!(BoundsPolicy::evaluate(1.0, Vec2::ZERO, VIEWPORT), None);
        assert_eq!(
            BoundsPolicy::evaluate(1.0, Vec2::new(3.0, -4.0), VIEWPORT),
            Some(Vec2::new(-3.0, 4.0))
        );
        let region = BoundsPolicy::allowed_region(1.0, VIEWPORT);
        assert_eq!(region.area(), 0.0);
    }

    #[test]
    fn slack_is_proportional_to_excess_scale() {
        assert_eq!(BoundsPolicy::slack(2.0, VIEWPORT), Vec2::new(200.0, 400.0));
        assert_eq!(BoundsPolicy::slack(3.0, VIEWPORT), Vec2::new(400.0, 800.0));
        assert_eq!(BoundsPolicy::slack(0.5, VIEWPORT), Vec2::ZERO);
    }

    #[test]
    fn correction_is_axis_independent() {
        let fix = BoundsPolicy::evaluate(2.0, Vec2::new(-350.0, 120.0), VIEWPORT);
        assert_eq!(fix, Some(Vec2::new(150.0, 0.0)));

        let fix = BoundsPolicy::evaluate(2.0, Vec2::new(250.0, -500.0), VIEWPORT);
        assert_eq!(fix, Some(Vec2::new(-50.0, 100.0)));
    }

    #[test]
    fn boundary_values_are_valid() {
        assert_eq!(
            BoundsPolicy::evaluate(2.0, Vec2::new(200.0, -400.0), VIEWPORT),
            None
        );
    }

    #[test]
    fn rest_target_resets_under_scale() {
        let target = BoundsPolicy::rest_target(0.8, Vec2::new(40.0, 10.0), VIEWPORT);
        assert_eq!(
            target,
            Some(RestTarget::identity(SnapBackReason::UnderScale))
        );
    }

    #[test]
    fn rest_target_clamps_out_of_bounds() {
        let target = BoundsPolicy::rest_target(2.0, Vec2::new(300.0, 10.0), VIEWPORT).unwrap();
        assert_eq!(target.scale, 2.0);
        assert_eq!(target.translation, Vec2::new(200.0, 10.0));
        assert_eq!(target.reason, SnapBackReason::OutOfBounds);

        assert_eq!(
            BoundsPolicy::rest_target(2.0, Vec2::new(100.0, 10.0), VIEWPORT),
            None
        );
    }
}
