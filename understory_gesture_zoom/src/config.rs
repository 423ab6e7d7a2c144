// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the gesture controller and its snap-back spring.

use core::fmt;

/// Default divisor applied to the raw pinch scale before it is composed.
///
/// A raw pinch scale `s` becomes `1 + (s - 1) / DEFAULT_SCALE_DAMPING`, so larger
/// values make pinching weaker.
pub const DEFAULT_SCALE_DAMPING: f64 = 2.0;

/// Default hard ceiling for the surface scale.
///
/// A pinch update whose resulting scale would meet or exceed this value is dropped.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Default number of contact points a pan requires.
pub const DEFAULT_PAN_POINTERS: usize = 2;

/// Parameters of the damped spring used for snap-back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Mass of the simulated body.
    pub mass: f64,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Distance from the target below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
    /// Stop at the target instead of oscillating past it.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 12.0,
            stiffness: 80.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
            overshoot_clamping: true,
        }
    }
}

impl SpringConfig {
    /// Checks that every parameter describes a physically meaningful spring.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::SpringMass(self.mass));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ConfigError::SpringStiffness(self.stiffness));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ConfigError::SpringDamping(self.damping));
        }
        if !(self.rest_displacement.is_finite() && self.rest_displacement > 0.0) {
            return Err(ConfigError::RestThreshold(self.rest_displacement));
        }
        if !(self.rest_speed.is_finite() && self.rest_speed > 0.0) {
            return Err(ConfigError::RestThreshold(self.rest_speed));
        }
        Ok(())
    }
}

/// Configuration for a [`GestureZoom`](crate::GestureZoom) controller.
///
/// The defaults are the documented tunables: a pinch damping divisor of `2`,
/// a scale ceiling of `5.0`, two-finger panning, and a `1 / 12 / 80`
/// (mass / damping / stiffness) spring.
///
/// ```rust
/// use understory_gesture_zoom::ZoomConfig;
///
/// let config = ZoomConfig {
///     max_scale: 8.0,
///     ..ZoomConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.damped_scale(3.0), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Divisor weakening raw pinch-scale sensitivity. Must be `>= 1`.
    pub scale_damping: f64,
    /// Exclusive upper bound on the surface scale. Must be `> 1`.
    pub max_scale: f64,
    /// Fewest simultaneous contact points that may drive a pan.
    pub pan_min_pointers: usize,
    /// Most simultaneous contact points that may drive a pan.
    pub pan_max_pointers: usize,
    /// Snap-back spring parameters.
    pub spring: SpringConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scale_damping: DEFAULT_SCALE_DAMPING,
            max_scale: DEFAULT_MAX_SCALE,
            pan_min_pointers: DEFAULT_PAN_POINTERS,
            pan_max_pointers: DEFAULT_PAN_POINTERS,
            spring: SpringConfig::default(),
        }
    }
}

impl ZoomConfig {
    /// Checks the configuration, returning the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // A damping of at least 1 keeps every positive raw scale positive.
        if !(self.scale_damping.is_finite() && self.scale_damping >= 1.0) {
            return Err(ConfigError::ScaleDamping(self.scale_damping));
        }
        if !(self.max_scale.is_finite() && self.max_scale > 1.0) {
            return Err(ConfigError::MaxScale(self.max_scale));
        }
        if self.pan_min_pointers == 0 || self.pan_min_pointers > self.pan_max_pointers {
            return Err(ConfigError::PanPointers {
                min: self.pan_min_pointers,
                max: self.pan_max_pointers,
            });
        }
        self.spring.validate()
    }

    /// Applies the damping divisor to a raw, cumulative pinch scale.
    #[must_use]
    pub fn damped_scale(&self, raw_scale: f64) -> f64 {
        1.0 + (raw_scale - 1.0) / self.scale_damping
    }

    /// Returns `true` if a pan with `pointers` contacts may move the surface.
    #[must_use]
    pub fn accepts_pan_pointers(&self, pointers: usize) -> bool {
        (self.pan_min_pointers..=self.pan_max_pointers).contains(&pointers)
    }
}

/// Error returned when a [`ZoomConfig`] or [`SpringConfig`] is invalid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// The pinch damping divisor is not finite or is below `1`.
    ScaleDamping(f64),
    /// The scale ceiling is not finite or is not above `1`.
    MaxScale(f64),
    /// The pan pointer range is empty or starts at zero.
    PanPointers {
        /// Requested minimum pointer count.
        min: usize,
        /// Requested maximum pointer count.
        max: usize,
    },
    /// The spring mass is not finite and positive.
    SpringMass(f64),
    /// The spring stiffness is not finite and positive.
    SpringStiffness(f64),
    /// The spring damping is not finite and non-negative.
    SpringDamping(f64),
    /// A rest threshold is not finite and positive.
    RestThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScaleDamping(v) => write!(f, "scale damping must be finite and >= 1, got {v}"),
            Self::MaxScale(v) => write!(f, "max scale must be finite and > 1, got {v}"),
            Self::PanPointers { min, max } => {
                write!(f, "pan pointer range {min}..={max} is empty or starts at zero")
            }
            Self::SpringMass(v) => write!(f, "spring mass must be finite and > 0, got {v}"),
            Self::SpringStiffness(v) => {
                write!(f, "spring stiffness must be finite and > 0, got {v}")
            }
            Self::SpringDamping(v) => write!(f, "spring damping must be finite and >= 0, got {v}"),
            Self::RestThreshold(v) => write!(f, "rest thresholds must be finite and > 0, got {v}"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ZoomConfig::default().validate(), Ok(()));
        assert_eq!(SpringConfig::default().validate(), Ok(()));
    }

    #[test]
    fn damping_weakens_raw_scale() {
        let config = ZoomConfig::default();
        assert!((config.damped_scale(1.1) - 1.05).abs() < 1e-12);
        assert!((config.damped_scale(0.5) - 0.75).abs() < 1e-12);
        assert_eq!(config.damped_scale(1.0), 1.0);
    }

    #[test]
    fn pan_gate_defaults_to_exactly_two_pointers() {
        let config = ZoomConfig::default();
        assert!(!config.accepts_pan_pointers(1));
        assert!(config.accepts_pan_pointers(2));
        assert!(!config.accepts_pan_pointers(3));
    }

    #[test]
    fn rejects_invalid_fields() {
        let bad_damping = ZoomConfig {
            scale_damping: 0.5,
            ..ZoomConfig::default()
        };
        assert_eq!(bad_damping.validate(), Err(ConfigError::ScaleDamping(0.5)));

        let bad_ceiling = ZoomConfig {
            max_scale: 1.0,
            ..ZoomConfig::default()
        };
        assert_eq!(bad_ceiling.validate(), Err(ConfigError::MaxScale(1.0)));

        let bad_pointers = ZoomConfig {
            pan_min_pointers: 3,
            pan_max_pointers: 2,
            ..ZoomConfig::default()
        };
        assert_eq!(
            bad_pointers.validate(),
            Err(ConfigError::PanPointers { min: 3, max: 2 })
        );

        let bad_spring = ZoomConfig {
            spring: SpringConfig {
                stiffness: f64::NAN,
                ..SpringConfig::default()
            },
            ..ZoomConfig::default()
        };
        assert!(matches!(
            bad_spring.validate(),
            Err(ConfigError::SpringStiffness(_))
        ));
    }

    #[test]
    fn error_messages_name_the_field() {
        let msg = ConfigError::MaxScale(0.5).to_string();
        assert!(msg.contains("max scale"), "unexpected message: {msg}");
    }
}
