// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture_zoom --heading-base-level=0

//! Understory Gesture Zoom: pinch and pan gestures to a surface transform.
//!
//! This crate turns continuous two-finger gesture input into a single uniform
//! scale plus translation for one visual surface. It focuses on:
//! - Focal-anchored pinch zoom: the point under the fingers stays put.
//! - Two-finger panning that may run at the same time as the pinch.
//! - Rubber-banding: the surface may leave its bounds during a gesture and is
//!   brought back when the gesture ends.
//! - Spring snap-back from an invalid resting state to the nearest valid one.
//!
//! It does **not** recognize gestures or render anything. Callers are
//! expected to:
//! - Feed pinch `begin` / `change` / `end` and pan `change` / `end` callbacks
//!   from their gesture recognizer into [`GestureZoom`] (directly, or as
//!   [`ZoomEvent`] values).
//! - Call [`GestureZoom::tick`] once per frame while it reports that a
//!   snap-back is running.
//! - Apply [`GestureZoom::current_transform`] (or a [`FrameReader`] on a
//!   render thread) to the surface, for example through
//!   [`FrameTransform::to_affine`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size};
//! use understory_gesture_zoom::GestureZoom;
//!
//! let mut zoom = GestureZoom::new(Size::new(400.0, 800.0));
//!
//! // Pinch in below native size...
//! zoom.pinch_begin(Point::new(120.0, 300.0));
//! zoom.pinch_change(0.6, Point::new(120.0, 300.0));
//! zoom.pinch_end();
//!
//! // ...and the surface springs back to the identity transform.
//! while zoom.tick(Duration::from_millis(16)) {}
//! let frame = zoom.current_transform();
//! assert_eq!((frame.scale_x, frame.translate_x, frame.translate_y), (1.0, 0.0, 0.0));
//! ```
//!
//! ## Model
//!
//! [`TransformState`] keeps a *committed* slot (confirmed at the end of each
//! gesture) and a *live* slot (what is drawn this frame). Each gesture
//! composes onto the committed slot only, so a simultaneous pinch and pan
//! never feed back into each other. Translation is measured from the viewport
//! center to the surface center; the transform origin is the surface center.
//!
//! - [`PinchHandler`] scales by `committed * (1 + (raw - 1) / damping)`,
//!   drops updates that reach the ceiling, and re-anchors the translation.
//! - [`PanHandler`] applies cumulative deltas, gated on the pointer count.
//! - [`BoundsPolicy`] requires the scaled surface to cover the viewport and
//!   corrects each axis independently; below native size it resets fully.
//! - [`SnapBackAnimator`] commits the target at once and animates the live
//!   slot with a [`Spring`] per channel.
//! - [`TransformComposer`] reads the live slot into a [`FrameTransform`].
//!
//! Any new gesture supersedes a running snap-back; no explicit cancel is
//! needed.
//!
//! ## Tracing
//!
//! Implement [`ZoomTrace`] to observe what the controller decides (pinch
//! starts, dropped updates, commits, snap-backs). With the `log` feature,
//! `LogTrace` forwards these to the `log` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod compose;
mod config;
mod controller;
mod pan;
mod pinch;
mod snap_back;
mod spring;
mod state;
mod trace;

pub use bounds::{BoundsPolicy, RestTarget, SnapBackReason};
pub use compose::{FrameReader, FrameTransform, TransformComposer};
pub use config::{
    ConfigError, DEFAULT_MAX_SCALE, DEFAULT_PAN_POINTERS, DEFAULT_SCALE_DAMPING, SpringConfig,
    ZoomConfig,
};
pub use controller::{GestureZoom, ZoomEvent};
pub use pan::{PanHandler, PanUpdate};
pub use pinch::{PinchHandler, PinchUpdate};
pub use snap_back::SnapBackAnimator;
pub use spring::Spring;
pub use state::{GesturePhase, TransformState};
#[cfg(feature = "log")]
pub use trace::LogTrace;
pub use trace::{GestureKind, ZoomTrace};
