// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Size, Vec2};

use crate::bounds::{BoundsPolicy, RestTarget, SnapBackReason};
use crate::compose::{FramePublisher, FrameReader, FrameTransform, TransformComposer};
use crate::config::{ConfigError, ZoomConfig};
use crate::pan::{PanHandler, PanUpdate};
use crate::pinch::{PinchHandler, PinchUpdate};
use crate::snap_back::SnapBackAnimator;
use crate::state::{GesturePhase, TransformState};
use crate::trace::{GestureKind, ZoomTrace};

/// A recognizer callback, expressed as a value.
///
/// Coordinates are in viewport space with the origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomEvent {
    /// A pinch started centered on `focal`.
    PinchBegin {
        /// Midpoint of the two contacts.
        focal: Point,
    },
    /// The pinch changed; `scale` is cumulative since the pinch began.
    PinchChange {
        /// Raw finger-distance ratio relative to the gesture start.
        scale: f64,
        /// Current midpoint of the two contacts.
        focal: Point,
    },
    /// The pinch ended.
    PinchEnd,
    /// The pan changed; `translation` is cumulative since the pan began.
    PanChange {
        /// Movement of the contact centroid since the gesture start.
        translation: Vec2,
        /// Number of contacts currently down.
        pointers: usize,
    },
    /// The pan ended.
    PanEnd,
}

/// Gesture-to-transform controller for one zoomable surface.
///
/// `GestureZoom` owns the surface's [`TransformState`] and routes pinch and
/// pan lifecycles through their handlers. When the last active gesture ends it
/// asks [`BoundsPolicy`] for a valid resting state and, if needed, starts a
/// spring snap-back that the host advances with [`GestureZoom::tick`].
///
/// The composed transform is available directly through
/// [`GestureZoom::current_transform`] and, for a renderer on another thread,
/// through a [`FrameReader`].
///
/// ```rust
/// use core::time::Duration;
/// use kurbo::{Point, Size, Vec2};
/// use understory_gesture_zoom::{GesturePhase, GestureZoom};
///
/// let mut zoom = GestureZoom::new(Size::new(400.0, 800.0));
///
/// // Pinch out around the viewport center: 1 + (3 - 1) / 2 = 2x.
/// zoom.pinch_begin(Point::new(200.0, 400.0));
/// zoom.pinch_change(3.0, Point::new(200.0, 400.0));
/// zoom.pinch_end();
/// assert_eq!(zoom.current_transform().scale_x, 2.0);
///
/// // Drag too far right; at 2x the limit is 200.
/// zoom.pan_change(Vec2::new(260.0, 0.0), 2);
/// zoom.pan_end();
/// assert_eq!(zoom.phase(), GesturePhase::SnappingBack);
///
/// while zoom.tick(Duration::from_millis(16)) {}
/// assert_eq!(zoom.current_transform().translate_x, 200.0);
/// ```
pub struct GestureZoom<T = ()> {
    config: ZoomConfig,
    viewport: Size,
    state: TransformState,
    pinch: PinchHandler,
    pan: PanHandler,
    animator: SnapBackAnimator,
    frame: FramePublisher,
    trace: T,
    on_pinch_begin: Option<Box<dyn FnMut() + Send>>,
}

impl<T: fmt::Debug> fmt::Debug for GestureZoom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureZoom")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("state", &self.state)
            .field("animator", &self.animator)
            .field("trace", &self.trace)
            .field("on_pinch_begin", &self.on_pinch_begin.is_some())
            .finish_non_exhaustive()
    }
}

impl GestureZoom {
    /// Creates a controller for a viewport of `viewport` size with the default
    /// configuration.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, ZoomConfig::default())
    }

    /// Creates a controller with a custom configuration.
    pub fn try_new(viewport: Size, config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(viewport, config))
    }

    fn with_config(viewport: Size, config: ZoomConfig) -> Self {
        Self {
            pinch: PinchHandler::new(&config),
            pan: PanHandler::new(&config),
            animator: SnapBackAnimator::new(config.spring),
            frame: FramePublisher::new(FrameTransform::IDENTITY),
            state: TransformState::new(),
            config,
            viewport,
            trace: (),
            on_pinch_begin: None,
        }
    }
}

impl<T: ZoomTrace> GestureZoom<T> {
    /// Replaces the trace sink.
    #[must_use]
    pub fn with_trace<U: ZoomTrace>(self, trace: U) -> GestureZoom<U> {
        GestureZoom {
            config: self.config,
            viewport: self.viewport,
            state: self.state,
            pinch: self.pinch,
            pan: self.pan,
            animator: self.animator,
            frame: self.frame,
            trace,
            on_pinch_begin: self.on_pinch_begin,
        }
    }

    /// Sets a host notification fired once each time a pinch begins.
    ///
    /// The callback has no influence on the transform.
    pub fn set_on_pinch_begin(&mut self, callback: impl FnMut() + Send + 'static) {
        self.on_pinch_begin = Some(Box::new(callback));
    }

    /// Removes the pinch-begin notification.
    pub fn clear_on_pinch_begin(&mut self) {
        self.on_pinch_begin = None;
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// The transform state.
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// The viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// The trace sink.
    #[must_use]
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// The trace sink, mutably.
    pub fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// What is currently driving the transform.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        GesturePhase::from_flags(
            self.state.is_pinching(),
            self.state.is_panning(),
            self.animator.is_animating(),
        )
    }

    /// Returns `true` while a snap-back needs more frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// The transform to render this frame.
    #[must_use]
    pub fn current_transform(&self) -> FrameTransform {
        TransformComposer::current_transform(&self.state)
    }

    /// Returns a handle that reads the published transform from any thread.
    #[must_use]
    pub fn frame_reader(&self) -> FrameReader {
        self.frame.reader()
    }

    /// Dispatches a recognizer event.
    pub fn handle(&mut self, event: ZoomEvent) {
        match event {
            ZoomEvent::PinchBegin { focal } => self.pinch_begin(focal),
            ZoomEvent::PinchChange { scale, focal } => self.pinch_change(scale, focal),
            ZoomEvent::PinchEnd => self.pinch_end(),
            ZoomEvent::PanChange {
                translation,
                pointers,
            } => self.pan_change(translation, pointers),
            ZoomEvent::PanEnd => self.pan_end(),
        }
    }

    /// Opens a pinch lifecycle centered on `focal`.
    ///
    /// A second `begin` while a pinch is already open is ignored.
    pub fn pinch_begin(&mut self, focal: Point) {
        if self.state.is_pinching() {
            return;
        }
        self.supersede(GestureKind::Pinch);
        let center = self.viewport_center();
        self.pinch.begin(&mut self.state, focal, center);
        if let Some(callback) = self.on_pinch_begin.as_mut() {
            callback();
        }
        if let Some(anchor) = self.state.anchor() {
            self.trace.pinch_began(anchor);
        }
        self.publish();
    }

    /// Applies a cumulative pinch scale.
    ///
    /// Without an open pinch, `focal` first opens one as [`Self::pinch_begin`]
    /// would.
    pub fn pinch_change(&mut self, scale: f64, focal: Point) {
        if !self.state.is_pinching() {
            self.pinch_begin(focal);
        }
        let center = self.viewport_center();
        match self.pinch.change(&mut self.state, scale, focal, center) {
            PinchUpdate::Applied { .. } => self.publish(),
            PinchUpdate::AtCeiling { attempted } | PinchUpdate::Invalid { attempted } => {
                self.trace.scale_rejected(attempted, self.config.max_scale);
            }
        }
    }

    /// Closes the pinch lifecycle.
    pub fn pinch_end(&mut self) {
        if !self.pinch.end(&mut self.state) {
            return;
        }
        self.trace.gesture_committed(
            GestureKind::Pinch,
            self.state.committed_scale(),
            self.state.committed_translation(),
        );
        if !self.state.is_panning() {
            self.settle();
        }
        self.publish();
    }

    /// Applies a cumulative pan translation reported with `pointers` contacts.
    pub fn pan_change(&mut self, translation: Vec2, pointers: usize) {
        if self.config.accepts_pan_pointers(pointers) {
            self.supersede(GestureKind::Pan);
        }
        match self.pan.change(&mut self.state, translation, pointers) {
            PanUpdate::Applied { .. } => self.publish(),
            PanUpdate::Gated { pointers } => self.trace.pan_rejected(pointers),
        }
    }

    /// Closes the pan lifecycle.
    pub fn pan_end(&mut self) {
        if !self.pan.end(&mut self.state) {
            return;
        }
        self.trace.gesture_committed(
            GestureKind::Pan,
            self.state.committed_scale(),
            self.state.committed_translation(),
        );
        if !self.state.is_pinching() {
            self.settle();
        }
        self.publish();
    }

    /// Advances the snap-back animation by one frame.
    ///
    /// Returns `true` if another frame is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.animator.is_animating() {
            return false;
        }
        let more = self.animator.step(&mut self.state, dt.as_secs_f64());
        if !more {
            self.trace.snap_back_finished();
        }
        self.publish();
        more
    }

    /// Updates the viewport size.
    ///
    /// When no gesture is active the committed state is re-checked against the
    /// new bounds and snaps back if it no longer fits.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if !self.phase().is_gesturing() {
            self.settle();
            self.publish();
        }
    }

    /// Abandons any active gesture and animates back to the identity transform.
    pub fn reset(&mut self) {
        self.state.abandon_gestures();
        self.start_snap_back(RestTarget::identity(SnapBackReason::Reset));
        self.publish();
    }

    fn viewport_center(&self) -> Point {
        self.viewport.to_rect().center()
    }

    /// Hands control back to the gesture handlers if a snap-back is running.
    fn supersede(&mut self, by: GestureKind) {
        if self.animator.cancel() {
            self.state.sync_live();
            self.trace.snap_back_superseded(by);
        }
    }

    /// Moves the committed state to a valid rest position if it is not one.
    fn settle(&mut self) {
        let target = BoundsPolicy::rest_target(
            self.state.committed_scale(),
            self.state.committed_translation(),
            self.viewport,
        );
        if let Some(target) = target {
            self.start_snap_back(target);
        }
    }

    fn start_snap_back(&mut self, target: RestTarget) {
        self.trace
            .snap_back_started(target.reason, target.scale, target.translation);
        self.animator.animate_to(&mut self.state, target);
        if !self.animator.is_animating() {
            self.trace.snap_back_finished();
        }
    }

    fn publish(&self) {
        self.frame.publish(self.current_transform());
    }
}
