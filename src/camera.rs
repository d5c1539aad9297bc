//! Orbit camera driven by pointer drag and wheel input

use glam::{Mat4, Vec3};
use tracing::trace;

use crate::config::EditorConfig;

/// Wrap an angle beyond one full turn, then clamp it into `[min, max]`
///
/// All values are in degrees. An inverted range resolves to `max`.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    let wrapped = if angle.abs() > 360.0 {
        angle % 360.0
    } else {
        angle
    };
    wrapped.max(min).min(max)
}

/// Camera orbiting the planet center
///
/// `rotation_x` is the pitch, kept inside the pitch limit so the camera never
/// flips over a pole. `rotation_y` is the unconstrained yaw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    rotation_x: f32,
    rotation_y: f32,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    pitch_limit: f32,
}

impl OrbitCamera {
    /// Camera at the configured initial distance, facing the planet head-on
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance: config.initial_zoom.max(config.min_zoom).min(config.max_zoom),
            min_distance: config.min_zoom,
            max_distance: config.max_zoom,
            pitch_limit: config.pitch_limit_degrees,
        }
    }

    /// Pitch in degrees
    #[inline]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Yaw in degrees
    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Distance from the planet center
    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Apply a pointer drag, deltas in pointer units (one unit per degree)
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.rotation_y -= dx;
        self.rotation_x = clamp_angle(self.rotation_x - dy, -self.pitch_limit, self.pitch_limit);
        trace!(
            rotation_x = self.rotation_x,
            rotation_y = self.rotation_y,
            "camera rotated"
        );
    }

    /// Apply a wheel movement; 100 wheel units move the camera one unit
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.distance = (self.distance + wheel_delta / 100.0)
            .max(self.min_distance)
            .min(self.max_distance);
        trace!(distance = self.distance, "camera zoomed");
    }

    /// Camera position in world space, looking at the origin
    pub fn eye_position(&self) -> Vec3 {
        let pitch = self.rotation_x.to_radians();
        let yaw = self.rotation_y.to_radians();

        Vec3::new(
            self.distance * pitch.cos() * yaw.sin(),
            self.distance * pitch.sin(),
            self.distance * pitch.cos() * yaw.cos(),
        )
    }

    /// Right-handed view matrix looking at the planet center
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), Vec3::ZERO, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}
