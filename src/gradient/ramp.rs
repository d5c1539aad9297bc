//! Dense gradient ramp synthesis and PNG export

use std::time::Instant;

use glam::Vec3;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use tracing::debug;

use super::{GradientKey, GradientKeySet};
use crate::error::Result;

/// A one-row image of interpolated gradient colors
///
/// Texel `i` holds the gradient evaluated at `i / (width - 1)`, or at 0 when
/// the ramp is a single texel wide.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientRampImage {
    texels: Vec<Vec3>,
}

impl GradientRampImage {
    /// Number of texels (at least 1)
    #[inline]
    pub fn width(&self) -> usize {
        self.texels.len()
    }

    /// Row of linear RGB texels
    #[inline]
    pub fn texels(&self) -> &[Vec3] {
        &self.texels
    }

    /// Nearest texel for a ramp coordinate, `t` clamped to `[0, 1]`
    pub fn sample(&self, t: f32) -> Vec3 {
        let last = self.texels.len().saturating_sub(1);
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let index = (t * last as f32).round() as usize;
        self.texels
            .get(index.min(last))
            .copied()
            .unwrap_or(Vec3::ZERO)
    }

    /// Texels quantized to 8-bit RGB, row-major
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.texels
            .iter()
            .flat_map(|c| {
                let c = (c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
                [c.x as u8, c.y as u8, c.z as u8]
            })
            .collect()
    }

    /// Encode the ramp as a `width x 1` RGB PNG
    ///
    /// # Errors
    ///
    /// Returns `Encode` if the PNG encoder fails
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let rgb = self.to_rgb8();
        let mut bytes = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut bytes, CompressionType::Default, FilterType::Adaptive);
        encoder.write_image(&rgb, self.width() as u32, 1, ExtendedColorType::Rgb8)?;
        Ok(bytes)
    }
}

/// Color at `t` for keys already sorted by position
///
/// When several keys share the position `t`, the first of them in sorted
/// order wins, wherever the tie sits on the ramp.
pub(super) fn evaluate_sorted(sorted: &[GradientKey], t: f32) -> Vec3 {
    let Some(last) = sorted.last() else {
        return Vec3::ZERO;
    };
    if t.is_nan() {
        return sorted[0].color();
    }

    // First key at or after t
    let upper = sorted.partition_point(|key| key.position() < t);
    if upper == sorted.len() {
        return last.color();
    }
    let b = sorted[upper];
    if upper == 0 || b.position() == t {
        return b.color();
    }
    let a = sorted[upper - 1];

    let span = b.position() - a.position();
    if span <= f32::EPSILON {
        return a.color();
    }
    a.color().lerp(b.color(), (t - a.position()) / span)
}

/// Build a ramp image of `width` texels from a key set
///
/// The output is a pure function of the keys and width. `width` below 1 is
/// treated as 1.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let keys = GradientKeySet::from_keys(vec![
///     GradientKey::new(0.0, Vec3::ZERO),
///     GradientKey::new(1.0, Vec3::ONE),
/// ])
/// .unwrap();
/// let ramp = synthesize(&keys, 3);
/// assert_eq!(ramp.texels()[1], Vec3::splat(0.5));
/// ```
pub fn synthesize(keys: &GradientKeySet, width: usize) -> GradientRampImage {
    let start = Instant::now();
    let width = width.max(1);
    let sorted = keys.sorted();

    let texels = (0..width)
        .map(|i| {
            let t = if width == 1 {
                0.0
            } else {
                i as f32 / (width - 1) as f32
            };
            evaluate_sorted(&sorted, t)
        })
        .collect();

    debug!(
        keys = sorted.len(),
        width,
        elapsed = ?start.elapsed(),
        "gradient ramp synthesized"
    );
    GradientRampImage { texels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(entries: &[(f32, Vec3)]) -> GradientKeySet {
        GradientKeySet::from_keys(
            entries
                .iter()
                .map(|&(position, color)| GradientKey::new(position, color))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_black_to_white() {
        let ramp = synthesize(&keys(&[(0.0, Vec3::ZERO), (1.0, Vec3::ONE)]), 3);
        assert_eq!(ramp.texels(), &[Vec3::ZERO, Vec3::splat(0.5), Vec3::ONE]);
    }

    #[test]
    fn test_single_key_is_constant() {
        let color = Vec3::new(0.2, 0.4, 0.6);
        let ramp = synthesize(&keys(&[(0.5, color)]), 16);

        assert_eq!(ramp.width(), 16);
        assert!(ramp.texels().iter().all(|&c| c == color));
    }

    #[test]
    fn test_clamps_outside_keys() {
        let ramp = synthesize(&keys(&[(0.25, Vec3::X), (0.75, Vec3::Y)]), 5);
        assert_eq!(ramp.texels()[0], Vec3::X);
        assert_eq!(ramp.texels()[1], Vec3::X);
        assert_eq!(ramp.texels()[3], Vec3::Y);
        assert_eq!(ramp.texels()[4], Vec3::Y);
        assert!((ramp.texels()[2] - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_unsorted_keys_sorted_before_sampling() {
        let a = synthesize(&keys(&[(1.0, Vec3::ONE), (0.0, Vec3::ZERO)]), 9);
        let b = synthesize(&keys(&[(0.0, Vec3::ZERO), (1.0, Vec3::ONE)]), 9);
        assert_eq!(a, b);
    }

    #[test]
    fn test_coincident_keys_step() {
        let ramp = synthesize(
            &keys(&[(0.0, Vec3::ZERO), (0.5, Vec3::X), (0.5, Vec3::Y), (1.0, Vec3::Z)]),
            101,
        );
        // Below the tie the lerp ends on the first key, above it starts from the second
        assert!((ramp.texels()[49] - Vec3::X * 0.98).length() < 1e-4);
        assert_eq!(ramp.texels()[50], Vec3::X);
        assert!((ramp.texels()[51] - Vec3::new(0.0, 0.98, 0.02)).length() < 1e-4);
    }

    #[test]
    fn test_ties_resolve_to_first_key_everywhere() {
        let leading = keys(&[(0.0, Vec3::X), (0.0, Vec3::Y), (1.0, Vec3::Z)]);
        let interior = keys(&[(0.0, Vec3::ZERO), (0.5, Vec3::X), (0.5, Vec3::Y), (1.0, Vec3::Z)]);
        let trailing = keys(&[(0.0, Vec3::ZERO), (1.0, Vec3::X), (1.0, Vec3::Y)]);

        assert_eq!(leading.evaluate(0.0), Vec3::X);
        assert_eq!(interior.evaluate(0.5), Vec3::X);
        assert_eq!(trailing.evaluate(1.0), Vec3::X);
    }

    #[test]
    fn test_near_coincident_keys_use_lower_key() {
        let ulps = |x: f32, n: u32| f32::from_bits(x.to_bits() + n);

        // One ULP apart: t on the lower key picks it, not its neighbour
        let set = keys(&[
            (0.0, Vec3::ZERO),
            (0.5, Vec3::X),
            (ulps(0.5, 1), Vec3::Y),
            (1.0, Vec3::Z),
        ]);
        assert_eq!(synthesize(&set, 3).texels()[1], Vec3::X);

        // Strictly inside a sub-epsilon interval
        let set = keys(&[(0.25, Vec3::X), (ulps(0.25, 3), Vec3::Y), (1.0, Vec3::Z)]);
        assert_eq!(set.evaluate(ulps(0.25, 1)), Vec3::X);
    }

    #[test]
    fn test_synthesis_is_bit_identical() {
        let set = GradientKeySet::default();
        let a = synthesize(&set, 256);
        let b = synthesize(&set, 256);

        let bits = |ramp: &GradientRampImage| -> Vec<u32> {
            ramp.texels()
                .iter()
                .flat_map(|c| c.to_array().map(f32::to_bits))
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_width_one_and_zero() {
        let set = keys(&[(0.0, Vec3::X), (1.0, Vec3::Y)]);
        assert_eq!(synthesize(&set, 1).texels(), &[Vec3::X]);
        assert_eq!(synthesize(&set, 0).width(), 1);
    }

    #[test]
    fn test_sample_nearest() {
        let ramp = synthesize(&keys(&[(0.0, Vec3::ZERO), (1.0, Vec3::ONE)]), 3);
        assert_eq!(ramp.sample(-1.0), Vec3::ZERO);
        assert_eq!(ramp.sample(0.45), Vec3::splat(0.5));
        assert_eq!(ramp.sample(0.9), Vec3::ONE);
        assert_eq!(ramp.sample(f32::NAN), Vec3::ZERO);
    }

    #[test]
    fn test_to_rgb8() {
        let ramp = synthesize(&keys(&[(0.0, Vec3::ZERO), (1.0, Vec3::ONE)]), 3);
        assert_eq!(ramp.to_rgb8(), vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn test_encode_png() {
        let ramp = synthesize(&GradientKeySet::default(), 64);
        let png = ramp.encode_png().unwrap();

        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (64, 1));
        assert_eq!(decoded.as_raw(), &ramp.to_rgb8());
    }
}
