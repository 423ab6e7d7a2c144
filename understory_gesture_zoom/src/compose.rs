// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame output: the transform a renderer applies each tick.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::{Affine, Point, Size, Vec2};

use crate::state::TransformState;

/// Scale and translation applied to the surface for one frame.
///
/// The transform origin is the surface center: a surface point `p` in
/// viewport layout coordinates lands at
/// `center + translate + scale * (p - center)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTransform {
    /// Horizontal scale factor.
    pub scale_x: f64,
    /// Vertical scale factor. Equal to `scale_x`; zoom is uniform.
    pub scale_y: f64,
    /// Horizontal offset of the surface center from the viewport center.
    pub translate_x: f64,
    /// Vertical offset of the surface center from the viewport center.
    pub translate_y: f64,
}

impl Default for FrameTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FrameTransform {
    /// No scaling and no translation.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Translation as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    /// Builds the affine map for a viewport of the given size.
    ///
    /// Renderers that position the surface in viewport coordinates with the
    /// origin at the top-left can apply this directly.
    #[must_use]
    pub fn to_affine(&self, viewport: Size) -> Affine {
        let center = viewport.to_vec2() / 2.0;
        Affine::translate(center + self.translation())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate(-center)
    }

    /// Maps a surface point in viewport layout coordinates to the screen.
    #[must_use]
    pub fn map_point(&self, pt: Point, viewport: Size) -> Point {
        self.to_affine(viewport) * pt
    }
}

/// Composes the live fields of a [`TransformState`] into a [`FrameTransform`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformComposer;

impl TransformComposer {
    /// Reads the live fields; no side effects.
    #[must_use]
    pub fn current_transform(state: &TransformState) -> FrameTransform {
        let t = state.translation();
        FrameTransform {
            scale_x: state.scale(),
            scale_y: state.scale(),
            translate_x: t.x,
            translate_y: t.y,
        }
    }
}

#[derive(Debug)]
struct FrameSlots {
    // scale_x, scale_y, translate_x, translate_y as `f64` bits.
    fields: [AtomicU64; 4],
}

impl FrameSlots {
    fn new(frame: FrameTransform) -> Self {
        Self {
            fields: [
                AtomicU64::new(frame.scale_x.to_bits()),
                AtomicU64::new(frame.scale_y.to_bits()),
                AtomicU64::new(frame.translate_x.to_bits()),
                AtomicU64::new(frame.translate_y.to_bits()),
            ],
        }
    }
}

/// Read side of a surface's published frame transform.
///
/// Readers can live on a render thread while the controller is driven from
/// the gesture thread. Each field is written atomically, but a read may see a
/// newly written field next to one from the previous publish; the next
/// publish brings them back in step.
///
/// ```rust
/// use understory_gesture_zoom::GestureZoom;
/// use kurbo::Size;
///
/// let zoom = GestureZoom::new(Size::new(400.0, 800.0));
/// let reader = zoom.frame_reader();
/// std::thread::spawn(move || {
///     let frame = reader.current_transform();
///     assert_eq!(frame.scale_x, 1.0);
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct FrameReader {
    slots: Arc<FrameSlots>,
}

impl FrameReader {
    /// Reads the most recently published transform.
    #[must_use]
    pub fn current_transform(&self) -> FrameTransform {
        let [sx, sy, tx, ty] = &self.slots.fields;
        FrameTransform {
            scale_x: f64::from_bits(sx.load(Ordering::Acquire)),
            scale_y: f64::from_bits(sy.load(Ordering::Acquire)),
            translate_x: f64::from_bits(tx.load(Ordering::Acquire)),
            translate_y: f64::from_bits(ty.load(Ordering::Acquire)),
        }
    }
}

/// Write side of the frame cell, owned by the controller.
#[derive(Debug)]
pub(crate) struct FramePublisher {
    slots: Arc<FrameSlots>,
}

impl FramePublisher {
    pub(crate) fn new(frame: FrameTransform) -> Self {
        Self {
            slots: Arc::new(FrameSlots::new(frame)),
        }
    }

    pub(crate) fn publish(&self, frame: FrameTransform) {
        let [sx, sy, tx, ty] = &self.slots.fields;
        sx.store(frame.scale_x.to_bits(), Ordering::Release);
        sy.store(frame.scale_y.to_bits(), Ordering::Release);
        tx.store(frame.translate_x.to_bits(), Ordering::Release);
        ty.store(frame.translate_y.to_bits(), Ordering::Release);
    }

    pub(crate) fn reader(&self) -> FrameReader {
        FrameReader {
            slots: Arc::clone(&self.slots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(400.0, 800.0);

    #[test]
    fn identity_affine_is_identity() {
        let affine = FrameTransform::IDENTITY.to_affine(VIEWPORT);
        let pt = Point::new(13.0, 77.0);
        assert_eq!(affine * pt, pt);
    }

    #[test]
    fn scaling_keeps_viewport_center_fixed() {
        let frame = FrameTransform {
            scale_x: 3.0,
            scale_y: 3.0,
            translate_x: 0.0,
            translate_y: 0.0,
        };
        let center = Point::new(200.0, 400.0);
        assert_eq!(frame.map_point(center, VIEWPORT), center);
        assert_eq!(
            frame.map_point(Point::new(210.0, 400.0), VIEWPORT),
            Point::new(230.0, 400.0)
        );
    }

    #[test]
    fn translation_moves_the_center() {
        let frame = FrameTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            translate_x: -50.0,
            translate_y: 25.0,
        };
        assert_eq!(
            frame.map_point(Point::new(200.0, 400.0), VIEWPORT),
            Point::new(150.0, 425.0)
        );
    }

    #[test]
    fn composer_reads_live_fields() {
        let mut state = TransformState::new();
        state.scale = 1.5;
        state.translation = Vec2::new(4.0, -2.0);
        let frame = TransformComposer::current_transform(&state);
        assert_eq!(frame.scale_x, 1.5);
        assert_eq!(frame.scale_y, 1.5);
        assert_eq!(frame.translation(), Vec2::new(4.0, -2.0));
        assert_eq!(frame, TransformComposer::current_transform(&state));
    }

    #[test]
    fn publisher_and_reader_share_slots() {
        let publisher = FramePublisher::new(FrameTransform::IDENTITY);
        let reader = publisher.reader();
        assert_eq!(reader.current_transform(), FrameTransform::IDENTITY);

        let frame = FrameTransform {
            scale_x: 2.5,
            scale_y: 2.5,
            translate_x: 10.0,
            translate_y: -10.0,
        };
        publisher.publish(frame);
        assert_eq!(reader.current_transform(), frame);
        assert_eq!(reader.clone().current_transform(), frame);
    }
}
