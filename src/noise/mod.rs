//! Layered noise field
//!
//! Turns a unit direction and a [`ShapeSettings`] snapshot into a scalar
//! elevation by summing fractal Perlin noise layers.

mod perlin;

pub use perlin::{perlin_3d, perlin_3d_unit};

use glam::Vec3;

use crate::shape::{NoiseLayer, ShapeSettings};

/// Scalar displacement field over the unit sphere
///
/// The field holds nothing but the noise seed, so evaluation is a pure
/// function of `(direction, settings)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoiseField {
    seed: u32,
}

impl NoiseField {
    /// Create a field sampling Perlin noise with the given seed
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed feeding the Perlin lattice hash
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Evaluate one noise layer at a unit direction
    ///
    /// Octave `i` samples at `direction * base_roughness * roughness^i + center`
    /// with weight `persistence^i`. The octave sum is shifted down by
    /// `min_value`, floored at zero and scaled by `strength`.
    ///
    /// Every octave is evaluated, even when its weight has decayed to nothing.
    /// The layer is expected to be sanitized already.
    pub fn evaluate_layer(&self, direction: Vec3, layer: &NoiseLayer) -> f32 {
        let mut sum = 0.0;
        let mut frequency = layer.base_roughness;
        let mut amplitude = 1.0;

        for _ in 0..layer.num_layers {
            sum += perlin_3d_unit(direction * frequency + layer.center, self.seed) * amplitude;
            frequency *= layer.roughness;
            amplitude *= layer.persistence;
        }

        (sum - layer.min_value).max(0.0) * layer.strength
    }

    /// Sum of all enabled layers at a unit direction, in settings order
    pub fn evaluate(&self, direction: Vec3, settings: &ShapeSettings) -> f32 {
        settings
            .layers()
            .iter()
            .filter(|layer| layer.enabled)
            .map(|layer| self.evaluate_layer(direction, layer))
            .sum()
    }
}

/// Upper bound of a layer's contribution
///
/// Each octave samples in `[0, 1]`, so the octave sum is at most the sum of
/// the amplitudes.
pub fn layer_ceiling(layer: &NoiseLayer) -> f32 {
    let mut amplitude = 1.0;
    let mut total = 0.0;
    for _ in 0..layer.num_layers {
        total += amplitude;
        amplitude *= layer.persistence;
    }
    (total - layer.min_value).max(0.0) * layer.strength
}
