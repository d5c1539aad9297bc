//! Noise layer parameters and the planet shape snapshot

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound on octaves per noise layer
pub const MAX_OCTAVES: u32 = 16;

/// Smallest value accepted for parameters that must stay strictly positive
pub const MIN_POSITIVE: f32 = 1e-4;

/// Half-extent of the cube from which scattered layer centers are drawn
const CENTER_SCATTER: f32 = 1000.0;

/// Parameters of one fractal noise layer
///
/// Values outside their documented ranges are not errors; [`sanitized`](Self::sanitized)
/// clamps them and [`ShapeSettings`] only ever stores sanitized layers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseLayer {
    /// Disabled layers are skipped entirely
    pub enabled: bool,
    /// Weight of this layer's contribution (>= 0)
    pub strength: f32,
    /// Number of octaves (1 to [`MAX_OCTAVES`])
    pub num_layers: u32,
    /// Frequency of the first octave (> 0)
    pub base_roughness: f32,
    /// Frequency multiplier per octave (> 0)
    pub roughness: f32,
    /// Amplitude multiplier per octave, in (0, 1]
    pub persistence: f32,
    /// Floor subtracted from the octave sum before clamping at zero
    ///
    /// Raising it flattens low areas into "sea level".
    pub min_value: f32,
    /// Offset of the sampling position, moves features around the sphere
    pub center: Vec3,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            strength: 0.15,
            num_layers: 4,
            base_roughness: 1.0,
            roughness: 2.0,
            persistence: 0.5,
            min_value: 1.0,
            center: Vec3::ZERO,
        }
    }
}

#[inline]
fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl NoiseLayer {
    /// Copy of this layer with every parameter clamped into its valid range
    ///
    /// Non-finite values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            enabled: self.enabled,
            strength: finite_or(self.strength, defaults.strength).max(0.0),
            num_layers: self.num_layers.clamp(1, MAX_OCTAVES),
            base_roughness: finite_or(self.base_roughness, defaults.base_roughness)
                .max(MIN_POSITIVE),
            roughness: finite_or(self.roughness, defaults.roughness).max(MIN_POSITIVE),
            persistence: finite_or(self.persistence, defaults.persistence).clamp(MIN_POSITIVE, 1.0),
            min_value: finite_or(self.min_value, defaults.min_value),
            center: if self.center.is_finite() {
                self.center
            } else {
                Vec3::ZERO
            },
        }
    }
}

/// Immutable snapshot of everything that shapes the planet
///
/// Edits never patch a snapshot in place: the editing surface builds a new
/// one and hands it over wholesale, so a regeneration reading the old
/// snapshot can never see half an edit.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let settings = ShapeSettingsBuilder::new()
///     .radius(2.0)
///     .seed(7)
///     .layer(NoiseLayer::default())
///     .build();
///
/// assert_eq!(settings.radius(), 2.0);
/// assert_eq!(settings.layers().len(), 1);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSettings {
    radius: f32,
    seed: u32,
    layers: Vec<NoiseLayer>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self::new(1.0, 0, vec![NoiseLayer::default()])
    }
}

impl ShapeSettings {
    /// Create a snapshot, clamping the radius and every layer
    pub fn new(radius: f32, seed: u32, layers: Vec<NoiseLayer>) -> Self {
        Self {
            radius,
            seed,
            layers,
        }
        .sanitized()
    }

    /// Base radius of the undisplaced sphere
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Seed feeding the noise field
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Noise layers in evaluation order
    #[inline]
    pub fn layers(&self) -> &[NoiseLayer] {
        &self.layers
    }

    /// Whether every layer is disabled (the planet is a plain sphere)
    pub fn is_flat(&self) -> bool {
        self.layers.iter().all(|layer| !layer.enabled)
    }

    /// Copy with the radius and all layers clamped into valid ranges
    pub fn sanitized(&self) -> Self {
        let clean = Self {
            radius: finite_or(self.radius, 1.0).max(MIN_POSITIVE),
            seed: self.seed,
            layers: self.layers.iter().map(NoiseLayer::sanitized).collect(),
        };
        if clean != *self {
            debug!("shape settings clamped into valid ranges");
        }
        clean
    }

    /// New snapshot with a different radius
    pub fn with_radius(&self, radius: f32) -> Self {
        Self::new(radius, self.seed, self.layers.clone())
    }

    /// New snapshot with layer `index` replaced
    ///
    /// Out-of-range indices leave the layers untouched.
    pub fn with_layer(&self, index: usize, layer: NoiseLayer) -> Self {
        let mut layers = self.layers.clone();
        if let Some(slot) = layers.get_mut(index) {
            *slot = layer;
        }
        Self::new(self.radius, self.seed, layers)
    }

    /// New snapshot whose layer centers are drawn from `seed`
    ///
    /// The same seed always scatters the centers to the same places.
    pub fn scatter_centers(&self, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layers = self
            .layers
            .iter()
            .map(|layer| NoiseLayer {
                center: Vec3::new(
                    rng.gen_range(-CENTER_SCATTER..CENTER_SCATTER),
                    rng.gen_range(-CENTER_SCATTER..CENTER_SCATTER),
                    rng.gen_range(-CENTER_SCATTER..CENTER_SCATTER),
                ),
                ..*layer
            })
            .collect();
        Self::new(self.radius, self.seed, layers)
    }
}

/// Builder for ShapeSettings
///
/// Nothing here can fail: out-of-range values are clamped by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ShapeSettingsBuilder {
    radius: f32,
    seed: Option<u32>,
    layers: Vec<NoiseLayer>,
}

impl ShapeSettingsBuilder {
    /// Create a builder for a unit sphere with seed 0 and no layers
    pub fn new() -> Self {
        Self {
            radius: 1.0,
            seed: Some(0),
            layers: Vec::new(),
        }
    }

    /// Set the base radius
    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the noise seed
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw the noise seed from thread_rng when building
    pub fn random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Append a noise layer
    pub fn layer(mut self, layer: NoiseLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Build the snapshot
    pub fn build(self) -> ShapeSettings {
        let seed = self.seed.unwrap_or_else(rand::random);
        ShapeSettings::new(self.radius, seed, self.layers)
    }
}

impl Default for ShapeSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults_are_valid() {
        let layer = NoiseLayer::default();
        assert_eq!(layer, layer.sanitized());
    }

    #[test]
    fn test_layer_clamping() {
        let layer = NoiseLayer {
            enabled: true,
            strength: -2.0,
            num_layers: 0,
            base_roughness: -1.0,
            roughness: 0.0,
            persistence: 3.0,
            min_value: -0.5,
            center: Vec3::ONE,
        }
        .sanitized();

        assert_eq!(layer.strength, 0.0);
        assert_eq!(layer.num_layers, 1);
        assert_eq!(layer.base_roughness, MIN_POSITIVE);
        assert_eq!(layer.roughness, MIN_POSITIVE);
        assert_eq!(layer.persistence, 1.0);
        assert_eq!(layer.min_value, -0.5);
        assert_eq!(layer.center, Vec3::ONE);
    }

    #[test]
    fn test_octave_count_capped() {
        let layer = NoiseLayer {
            num_layers: 1_000,
            ..NoiseLayer::default()
        };
        assert_eq!(layer.sanitized().num_layers, MAX_OCTAVES);
    }

    #[test]
    fn test_non_finite_values_fall_back() {
        let layer = NoiseLayer {
            strength: f32::NAN,
            persistence: f32::INFINITY,
            center: Vec3::new(f32::NAN, 0.0, 0.0),
            ..NoiseLayer::default()
        }
        .sanitized();

        assert_eq!(layer.strength, NoiseLayer::default().strength);
        assert_eq!(layer.persistence, NoiseLayer::default().persistence);
        assert_eq!(layer.center, Vec3::ZERO);

        let settings = ShapeSettings::new(f32::NAN, 0, vec![]);
        assert_eq!(settings.radius(), 1.0);
    }

    #[test]
    fn test_radius_clamped_positive() {
        assert_eq!(ShapeSettings::new(-3.0, 0, vec![]).radius(), MIN_POSITIVE);
    }

    #[test]
    fn test_with_layer_replaces_wholesale() {
        let original = ShapeSettings::default();
        let replaced = original.with_layer(
            0,
            NoiseLayer {
                strength: 0.5,
                ..NoiseLayer::default()
            },
        );

        assert_eq!(original.layers()[0].strength, NoiseLayer::default().strength);
        assert_eq!(replaced.layers()[0].strength, 0.5);

        let untouched = original.with_layer(5, NoiseLayer::default());
        assert_eq!(untouched, original);
    }

    #[test]
    fn test_is_flat() {
        let flat = ShapeSettings::new(
            1.0,
            0,
            vec![NoiseLayer {
                enabled: false,
                ..NoiseLayer::default()
            }],
        );
        assert!(flat.is_flat());
        assert!(!ShapeSettings::default().is_flat());
        assert!(ShapeSettings::new(1.0, 0, vec![]).is_flat());
    }

    #[test]
    fn test_scatter_centers_deterministic() {
        let base = ShapeSettingsBuilder::new()
            .layer(NoiseLayer::default())
            .layer(NoiseLayer::default())
            .build();

        let a = base.scatter_centers(42);
        let b = base.scatter_centers(42);
        let c = base.scatter_centers(43);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a.layers()[0].center, a.layers()[1].center);
        for layer in a.layers() {
            assert!(layer.center.abs().max_element() <= CENTER_SCATTER);
        }
    }

    #[test]
    fn test_builder_seed() {
        let settings = ShapeSettingsBuilder::new().seed(99).build();
        assert_eq!(settings.seed(), 99);
        assert!(settings.layers().is_empty());

        // Random seeds are just drawn, never rejected
        let _ = ShapeSettingsBuilder::new().random_seed().build();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_settings_serialization() {
        let settings = ShapeSettingsBuilder::new()
            .radius(3.0)
            .seed(5)
            .layer(NoiseLayer::default())
            .build();

        let json = serde_json::to_string(&settings).unwrap();
        let restored: ShapeSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, restored);
    }
}
