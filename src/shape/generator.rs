//! Shape generator: unit direction to displaced surface point

use std::sync::Arc;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::noise::{layer_ceiling, NoiseField};
use crate::shape::ShapeSettings;

/// Result of evaluating the planet surface in one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSample {
    /// Displaced point, `direction * (radius + elevation)`
    pub point: Vec3,
    /// Raw elevation added to the base radius (>= 0)
    pub elevation: f32,
    /// Elevation scaled into `[0, 1]` against the configured ceiling
    ///
    /// This is the coordinate used to index the gradient ramp.
    pub normalized: f32,
}

/// Observed range of elevations
///
/// Starts empty and widens as values are included.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRange {
    /// Smallest value seen
    pub min: f32,
    /// Largest value seen
    pub max: f32,
}

impl Default for ElevationRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl ElevationRange {
    /// A range containing nothing
    pub const EMPTY: Self = Self {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// Whether no value was included yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Widen the range to contain `value`
    #[inline]
    pub fn include(&mut self, value: f32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Union of two ranges
    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Position of `value` inside the range, clamped to `[0, 1]`
    ///
    /// Empty and zero-width ranges map everything to 0.
    pub fn normalize(&self, value: f32) -> f32 {
        let width = self.max - self.min;
        if self.is_empty() || width <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / width).clamp(0.0, 1.0)
    }
}

/// Maps unit directions onto the displaced planet surface
///
/// The generator owns a shared, immutable settings snapshot. Replacing the
/// snapshot through [`on_noise_settings_change`](Self::on_noise_settings_change)
/// swaps it as a whole; nothing derived from the old snapshot is kept.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let generator = ShapeGenerator::new(ShapeSettings::default());
/// let sample = generator.evaluate(Vec3::Y);
/// assert!(sample.point.length() >= generator.settings().radius());
/// ```
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    settings: Arc<ShapeSettings>,
    field: NoiseField,
    ceiling: f32,
}

impl ShapeGenerator {
    /// Create a generator for an initial snapshot
    pub fn new(settings: impl Into<Arc<ShapeSettings>>) -> Self {
        let settings = settings.into();
        let (settings, field, ceiling) = Self::prepare(settings);
        Self {
            settings,
            field,
            ceiling,
        }
    }

    /// Swap in a new settings snapshot
    ///
    /// Everything derived from the previous snapshot (noise seed, elevation
    /// ceiling) is recomputed before this returns.
    pub fn on_noise_settings_change(&mut self, settings: impl Into<Arc<ShapeSettings>>) {
        let (settings, field, ceiling) = Self::prepare(settings.into());
        debug!(
            layers = settings.layers().len(),
            radius = settings.radius(),
            ceiling,
            "shape settings swapped"
        );
        self.settings = settings;
        self.field = field;
        self.ceiling = ceiling;
    }

    fn prepare(settings: Arc<ShapeSettings>) -> (Arc<ShapeSettings>, NoiseField, f32) {
        // Deserialized or hand-built snapshots may skip clamping
        let clean = settings.sanitized();
        let settings = if clean == *settings {
            settings
        } else {
            Arc::new(clean)
        };
        let ceiling = settings
            .layers()
            .iter()
            .filter(|layer| layer.enabled)
            .map(layer_ceiling)
            .sum();
        let field = NoiseField::new(settings.seed());
        (settings, field, ceiling)
    }

    /// Current settings snapshot
    #[inline]
    pub fn settings(&self) -> &Arc<ShapeSettings> {
        &self.settings
    }

    /// Largest elevation the enabled layers can nominally produce
    #[inline]
    pub fn elevation_ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Evaluate the surface along a unit direction
    ///
    /// A pure function of `direction` and the current snapshot. With every
    /// layer disabled the point lies exactly on the base sphere.
    pub fn evaluate(&self, direction: Vec3) -> ElevationSample {
        let elevation = self.field.evaluate(direction, &self.settings);
        let normalized = if self.ceiling > 0.0 {
            (elevation / self.ceiling).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ElevationSample {
            point: direction * (self.settings.radius() + elevation),
            elevation,
            normalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::NoiseLayer;

    fn flat_settings(radius: f32) -> ShapeSettings {
        ShapeSettings::new(
            radius,
            0,
            vec![NoiseLayer {
                enabled: false,
                ..NoiseLayer::default()
            }],
        )
    }

    #[test]
    fn test_flat_planet_is_a_sphere() {
        let generator = ShapeGenerator::new(flat_settings(2.5));

        for direction in [Vec3::X, Vec3::NEG_Y, Vec3::new(0.6, 0.0, 0.8)] {
            let sample = generator.evaluate(direction);
            assert_eq!(sample.elevation, 0.0);
            assert_eq!(sample.normalized, 0.0);
            assert!((sample.point.length() - 2.5).abs() < 1e-5);
        }
        assert_eq!(generator.elevation_ceiling(), 0.0);
    }

    #[test]
    fn test_evaluate_deterministic() {
        let generator = ShapeGenerator::new(ShapeSettings::default().scatter_centers(3));
        let direction = Vec3::new(-0.2, 0.9, 0.1).normalize();

        let a = generator.evaluate(direction);
        let b = generator.evaluate(direction);

        assert_eq!(a.point.to_array().map(f32::to_bits), b.point.to_array().map(f32::to_bits));
        assert_eq!(a.elevation.to_bits(), b.elevation.to_bits());
    }

    #[test]
    fn test_point_along_direction() {
        let generator = ShapeGenerator::new(ShapeSettings::default());
        let direction = Vec3::new(0.3, 0.4, 0.866).normalize();
        let sample = generator.evaluate(direction);

        let expected = direction * (1.0 + sample.elevation);
        assert!((sample.point - expected).length() < 1e-6);
        assert!((0.0..=1.0).contains(&sample.normalized));
    }

    #[test]
    fn test_settings_swap_changes_output() {
        let mut generator = ShapeGenerator::new(flat_settings(1.0));
        let direction = Vec3::new(0.5, 0.5, 0.7071).normalize();
        let before = generator.evaluate(direction);

        let rough = ShapeSettings::new(
            1.0,
            0,
            vec![NoiseLayer {
                min_value: 0.0,
                strength: 1.0,
                ..NoiseLayer::default()
            }],
        );
        generator.on_noise_settings_change(rough);
        let after = generator.evaluate(direction);

        assert_eq!(before.elevation, 0.0);
        assert!(after.elevation > 0.0);
        assert!(generator.elevation_ceiling() > 0.0);
    }

    #[test]
    fn test_shared_snapshot_kept_when_clean() {
        let settings = Arc::new(ShapeSettings::default());
        let generator = ShapeGenerator::new(settings.clone());
        assert!(Arc::ptr_eq(&settings, generator.settings()));
    }

    #[test]
    fn test_elevation_range() {
        let mut range = ElevationRange::default();
        assert!(range.is_empty());
        assert_eq!(range.normalize(1.0), 0.0);

        range.include(2.0);
        range.include(-1.0);
        range.include(0.5);
        assert_eq!((range.min, range.max), (-1.0, 2.0));
        assert!((range.normalize(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(range.normalize(10.0), 1.0);

        let merged = range.merge(ElevationRange { min: -3.0, max: 0.0 });
        assert_eq!((merged.min, merged.max), (-3.0, 2.0));
    }
}
