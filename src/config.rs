//! Editor session configuration and builder
//!
//! This module provides the fixed, per-session knobs of the planet editor:
//! mesh resolution, ramp width, scheduling intervals and camera limits.
//! Noise parameters live in [`ShapeSettings`](crate::ShapeSettings) instead,
//! since those are edited live.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PlanetError, Result};

/// Grid points per cube face edge used when nothing else is configured
pub const DEFAULT_FACE_RESOLUTION: usize = 100;

/// Number of texels in the synthesized gradient ramp
pub const DEFAULT_RAMP_WIDTH: usize = 256;

/// Configuration for one planet editing session
///
/// The configuration is fixed for the lifetime of a [`PlanetEditor`](crate::PlanetEditor);
/// a different resolution or interval means a new session.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
/// use std::time::Duration;
///
/// let config = EditorConfigBuilder::new()
///     .face_resolution(32)
///     .debounce(Duration::from_millis(50))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.face_resolution, 32);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Grid points per cube face edge (at least 2)
    ///
    /// Every face emits `6 * (resolution - 1)^2` vertices, so the cost of a
    /// regeneration grows quadratically with this value.
    pub face_resolution: usize,

    /// Number of samples in the gradient ramp image (at least 1)
    pub ramp_width: usize,

    /// Quiet period after the last edit before regeneration runs
    pub debounce: Duration,

    /// Steady redraw tick, independent of edits
    pub redraw_interval: Duration,

    /// Closest allowed camera distance
    pub min_zoom: f32,

    /// Farthest allowed camera distance
    pub max_zoom: f32,

    /// Camera distance at session start
    pub initial_zoom: f32,

    /// Pitch limit in degrees; the camera's X rotation stays in `[-limit, limit]`
    pub pitch_limit_degrees: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfigBuilder::new().finish()
    }
}

/// Builder for creating EditorConfig with validation
///
/// Resolution and ramp width are clamped at build time. Intervals and the
/// camera limits are structural, so nonsensical values are rejected with
/// `InvalidConfig`.
#[derive(Debug, Clone)]
pub struct EditorConfigBuilder {
    face_resolution: usize,
    ramp_width: usize,
    debounce: Duration,
    redraw_interval: Duration,
    min_zoom: f32,
    max_zoom: f32,
    initial_zoom: f32,
    pitch_limit_degrees: f32,
}

impl EditorConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - face_resolution: 100
    /// - ramp_width: 256
    /// - debounce: 100ms
    /// - redraw_interval: 10ms
    /// - zoom range: [0.5, 40], starting at 5
    /// - pitch limit: 85 degrees
    pub fn new() -> Self {
        Self {
            face_resolution: DEFAULT_FACE_RESOLUTION,
            ramp_width: DEFAULT_RAMP_WIDTH,
            debounce: Duration::from_millis(100),
            redraw_interval: Duration::from_millis(10),
            min_zoom: 0.5,
            max_zoom: 40.0,
            initial_zoom: 5.0,
            pitch_limit_degrees: 85.0,
        }
    }

    /// Set the grid resolution of each cube face
    ///
    /// Values below 2 are raised to 2 when the config is built.
    pub fn face_resolution(mut self, resolution: usize) -> Self {
        self.face_resolution = resolution;
        self
    }

    /// Set the number of samples in the gradient ramp
    ///
    /// A width of 0 is raised to 1 when the config is built.
    pub fn ramp_width(mut self, width: usize) -> Self {
        self.ramp_width = width;
        self
    }

    /// Set the debounce quiet period
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the period is zero
    pub fn debounce(mut self, quiet: Duration) -> Result<Self> {
        if quiet.is_zero() {
            return Err(PlanetError::InvalidConfig(
                "debounce period must be greater than zero".to_string(),
            ));
        }
        self.debounce = quiet;
        Ok(self)
    }

    /// Set the redraw tick interval
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the interval is zero
    pub fn redraw_interval(mut self, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PlanetError::InvalidConfig(
                "redraw interval must be greater than zero".to_string(),
            ));
        }
        self.redraw_interval = interval;
        Ok(self)
    }

    /// Set the allowed camera distance range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min <= 0` or `min > max`
    pub fn zoom_range(mut self, min: f32, max: f32) -> Result<Self> {
        if !(min > 0.0) || !(min <= max) || !max.is_finite() {
            return Err(PlanetError::InvalidConfig(format!(
                "zoom range must satisfy 0 < min <= max (got [{}, {}])",
                min, max
            )));
        }
        self.min_zoom = min;
        self.max_zoom = max;
        Ok(self)
    }

    /// Set the starting camera distance
    ///
    /// The value is clamped into the zoom range when the config is built.
    pub fn initial_zoom(mut self, distance: f32) -> Self {
        self.initial_zoom = distance;
        self
    }

    /// Set the camera pitch limit in degrees
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the limit is outside (0, 90]
    pub fn pitch_limit_degrees(mut self, limit: f32) -> Result<Self> {
        if !(limit > 0.0 && limit <= 90.0) {
            return Err(PlanetError::InvalidConfig(format!(
                "pitch limit must be in (0, 90] degrees (got {})",
                limit
            )));
        }
        self.pitch_limit_degrees = limit;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<EditorConfig> {
        Ok(self.finish())
    }

    fn finish(self) -> EditorConfig {
        let face_resolution = if self.face_resolution < 2 {
            warn!(
                requested = self.face_resolution,
                "face resolution below 2, clamping to 2"
            );
            2
        } else {
            self.face_resolution
        };

        let ramp_width = if self.ramp_width == 0 {
            warn!("ramp width of 0, clamping to 1");
            1
        } else {
            self.ramp_width
        };

        let initial_zoom = if self.initial_zoom.is_finite() {
            self.initial_zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.min_zoom
        };

        EditorConfig {
            face_resolution,
            ramp_width,
            debounce: self.debounce,
            redraw_interval: self.redraw_interval,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            initial_zoom,
            pitch_limit_degrees: self.pitch_limit_degrees,
        }
    }
}

impl Default for EditorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
