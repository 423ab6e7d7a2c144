// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace hooks for observing controller decisions.
//!
//! The controller never logs on its own. Instead it reports what it did to a
//! [`ZoomTrace`] sink chosen by the embedder. `()` ignores everything and is
//! the default; with the `log` feature, [`LogTrace`] forwards each hook to the
//! `log` crate.

use kurbo::{Point, Vec2};

use crate::bounds::SnapBackReason;

/// Which gesture lifecycle a hook refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// Two-finger pinch.
    Pinch,
    /// Two-finger pan.
    Pan,
}

/// A callback sink for controller events.
///
/// Every method has an empty default, so implementors override only what they
/// care about.
pub trait ZoomTrace {
    /// A pinch lifecycle opened with its anchor relative to the viewport center.
    fn pinch_began(&mut self, anchor: Point) {
        let _ = anchor;
    }

    /// A pinch update was dropped because it would reach the scale ceiling or
    /// produce an invalid scale.
    fn scale_rejected(&mut self, attempted: f64, ceiling: f64) {
        let _ = (attempted, ceiling);
    }

    /// A pan update was ignored because of its pointer count.
    fn pan_rejected(&mut self, pointers: usize) {
        let _ = pointers;
    }

    /// A gesture ended and its result was folded into the committed slot.
    fn gesture_committed(&mut self, kind: GestureKind, scale: f64, translation: Vec2) {
        let _ = (kind, scale, translation);
    }

    /// A snap-back was scheduled toward `scale` / `translation`.
    fn snap_back_started(&mut self, reason: SnapBackReason, scale: f64, translation: Vec2) {
        let _ = (reason, scale, translation);
    }

    /// A snap-back reached its target.
    fn snap_back_finished(&mut self) {}

    /// A snap-back was interrupted by a new gesture.
    fn snap_back_superseded(&mut self, by: GestureKind) {
        let _ = by;
    }
}

impl ZoomTrace for () {}

impl<T: ZoomTrace + ?Sized> ZoomTrace for &mut T {
    fn pinch_began(&mut self, anchor: Point) {
        (**self).pinch_began(anchor);
    }

    fn scale_rejected(&mut self, attempted: f64, ceiling: f64) {
        (**self).scale_rejected(attempted, ceiling);
    }

    fn pan_rejected(&mut self, pointers: usize) {
        (**self).pan_rejected(pointers);
    }

    fn gesture_committed(&mut self, kind: GestureKind, scale: f64, translation: Vec2) {
        (**self).gesture_committed(kind, scale, translation);
    }

    fn snap_back_started(&mut self, reason: SnapBackReason, scale: f64, translation: Vec2) {
        (**self).snap_back_started(reason, scale, translation);
    }

    fn snap_back_finished(&mut self) {
        (**self).snap_back_finished();
    }

    fn snap_back_superseded(&mut self, by: GestureKind) {
        (**self).snap_back_superseded(by);
    }
}

/// Trace sink that forwards every hook to the `log` crate.
///
/// Lifecycle events go to `debug`, per-event rejections to `trace`.
#[cfg(feature = "log")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

#[cfg(feature = "log")]
impl ZoomTrace for LogTrace {
    fn pinch_began(&mut self, anchor: Point) {
        log::debug!("pinch began at anchor ({}, {})", anchor.x, anchor.y);
    }

    fn scale_rejected(&mut self, attempted: f64, ceiling: f64) {
        log::trace!("pinch update dropped: scale {attempted} (ceiling {ceiling})");
    }

    fn pan_rejected(&mut self, pointers: usize) {
        log::trace!("pan update ignored with {pointers} pointers");
    }

    fn gesture_committed(&mut self, kind: GestureKind, scale: f64, translation: Vec2) {
        log::debug!(
            "{kind:?} committed: scale {scale}, translation ({}, {})",
            translation.x,
            translation.y
        );
    }

    fn snap_back_started(&mut self, reason: SnapBackReason, scale: f64, translation: Vec2) {
        log::debug!(
            "snap-back ({reason:?}) toward scale {scale}, translation ({}, {})",
            translation.x,
            translation.y
        );
    }

    fn snap_back_finished(&mut self) {
        log::debug!("snap-back settled");
    }

    fn snap_back_superseded(&mut self, by: GestureKind) {
        log::debug!("snap-back superseded by {by:?}");
    }
}
