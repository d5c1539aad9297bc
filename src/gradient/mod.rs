//! Gradient keys and elevation coloring
//!
//! A [`GradientKeySet`] is the sparse, user-edited description of the
//! elevation palette; [`synthesize`] turns it into the dense
//! [`GradientRampImage`] the renderer samples.

mod ramp;

pub use ramp::{synthesize, GradientRampImage};

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlanetError, Result};

/// RGBA vertex color
pub type Rgba = [f32; 4];

/// One (position, color) anchor of the gradient
///
/// Position and color components are clamped to `[0, 1]` on every write.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientKey {
    position: f32,
    color: Vec3,
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn clamp_color(color: Vec3) -> Vec3 {
    Vec3::new(clamp_unit(color.x), clamp_unit(color.y), clamp_unit(color.z))
}

impl GradientKey {
    /// Create a key, clamping position and color into `[0, 1]`
    pub fn new(position: f32, color: Vec3) -> Self {
        Self {
            position: clamp_unit(position),
            color: clamp_color(color),
        }
    }

    /// Position along the ramp, in `[0, 1]`
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Linear RGB color, components in `[0, 1]`
    #[inline]
    pub fn color(&self) -> Vec3 {
        self.color
    }
}

/// The user's gradient keys, never empty
///
/// Keys are kept in insertion order, which is also the tie-break when two
/// keys share a position. Operations that would remove the last key are
/// rejected and leave the set untouched.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let mut keys = GradientKeySet::single(GradientKey::new(0.0, Vec3::ZERO));
/// let white = keys.add_key(1.0);
/// keys.set_color(white, Vec3::ONE);
///
/// assert!(keys.remove_key(0));
/// assert!(!keys.remove_key(0));
/// assert_eq!(keys.key_count(), 1);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<GradientKey>", into = "Vec<GradientKey>")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct GradientKeySet {
    keys: Vec<GradientKey>,
}

impl Default for GradientKeySet {
    /// Five-stop terrain palette: deep water, shallows, sand, grass, snow
    fn default() -> Self {
        Self {
            keys: vec![
                GradientKey::new(0.0, Vec3::new(0.05, 0.10, 0.35)),
                GradientKey::new(0.25, Vec3::new(0.10, 0.35, 0.65)),
                GradientKey::new(0.40, Vec3::new(0.85, 0.80, 0.55)),
                GradientKey::new(0.60, Vec3::new(0.20, 0.55, 0.20)),
                GradientKey::new(1.0, Vec3::new(0.95, 0.95, 0.97)),
            ],
        }
    }
}

impl TryFrom<Vec<GradientKey>> for GradientKeySet {
    type Error = PlanetError;

    fn try_from(keys: Vec<GradientKey>) -> Result<Self> {
        Self::from_keys(keys)
    }
}

impl From<GradientKeySet> for Vec<GradientKey> {
    fn from(set: GradientKeySet) -> Self {
        set.keys
    }
}

impl GradientKeySet {
    /// Set holding exactly one key
    pub fn single(key: GradientKey) -> Self {
        Self { keys: vec![key] }
    }

    /// Build a set from keys in insertion order
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `keys` is empty
    pub fn from_keys(keys: Vec<GradientKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(PlanetError::InvalidConfig(
                "a gradient needs at least one key".to_string(),
            ));
        }
        // Keys may arrive from outside the constructor (deserialization)
        let keys = keys
            .into_iter()
            .map(|key| GradientKey::new(key.position, key.color))
            .collect();
        Ok(Self { keys })
    }

    /// Keys in insertion order
    #[inline]
    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Number of keys (always at least 1)
    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Key at `index` in insertion order
    #[inline]
    pub fn get(&self, index: usize) -> Option<&GradientKey> {
        self.keys.get(index)
    }

    /// Keys ordered by position; ties keep insertion order
    pub fn sorted(&self) -> Vec<GradientKey> {
        let mut sorted = self.keys.clone();
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
        sorted
    }

    /// Append a black key at `position` (clamped) and return its index
    pub fn add_key(&mut self, position: f32) -> usize {
        self.keys.push(GradientKey::new(position, Vec3::ZERO));
        self.keys.len() - 1
    }

    /// Recolor a key; returns false for an unknown index
    pub fn set_color(&mut self, index: usize, color: Vec3) -> bool {
        match self.keys.get_mut(index) {
            Some(key) => {
                key.color = clamp_color(color);
                true
            }
            None => false,
        }
    }

    /// Move a key to an absolute position (clamped); returns false for an unknown index
    pub fn set_position(&mut self, index: usize, position: f32) -> bool {
        match self.keys.get_mut(index) {
            Some(key) => {
                key.position = clamp_unit(position);
                true
            }
            None => false,
        }
    }

    /// Shift a key by `delta` along the ramp, clamped to `[0, 1]`
    ///
    /// This is the drag gesture: `delta` is the pointer movement as a
    /// fraction of the ramp's width.
    pub fn move_key(&mut self, index: usize, delta: f32) -> bool {
        match self.keys.get(index) {
            Some(key) => {
                let target = key.position + delta;
                self.set_position(index, target)
            }
            None => false,
        }
    }

    /// Remove one key
    ///
    /// Returns false, leaving the set unchanged, when `index` is unknown or
    /// the key is the last one.
    pub fn remove_key(&mut self, index: usize) -> bool {
        if self.keys.len() <= 1 {
            debug!(index, "refusing to remove the last gradient key");
            return false;
        }
        if index >= self.keys.len() {
            debug!(index, count = self.keys.len(), "no gradient key at index");
            return false;
        }
        self.keys.remove(index);
        true
    }

    /// Drop every key but the first
    ///
    /// Returns false when there was nothing to drop.
    pub fn clear(&mut self) -> bool {
        if self.keys.len() <= 1 {
            debug!("gradient already holds a single key");
            return false;
        }
        self.keys.truncate(1);
        true
    }

    /// Interpolated color at `t` (clamped to the outermost keys)
    pub fn evaluate(&self, t: f32) -> Vec3 {
        ramp::evaluate_sorted(&self.sorted(), t)
    }
}

/// Maps a normalized elevation to a vertex color
pub trait ColorMapper {
    /// Map an elevation in `[0, 1]` to an RGBA color
    fn map_color(&self, normalized_elevation: f32) -> Rgba;
}

impl ColorMapper for GradientKeySet {
    fn map_color(&self, normalized_elevation: f32) -> Rgba {
        self.evaluate(normalized_elevation).extend(1.0).to_array()
    }
}

impl ColorMapper for GradientRampImage {
    fn map_color(&self, normalized_elevation: f32) -> Rgba {
        self.sample(normalized_elevation).extend(1.0).to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn black_white() -> GradientKeySet {
        GradientKeySet::from_keys(vec![
            GradientKey::new(0.0, Vec3::ZERO),
            GradientKey::new(1.0, Vec3::ONE),
        ])
        .unwrap()
    }

    #[test]
    fn test_key_clamping() {
        let key = GradientKey::new(1.5, Vec3::new(-1.0, 0.5, 2.0));
        assert_eq!(key.position(), 1.0);
        assert_eq!(key.color(), Vec3::new(0.0, 0.5, 1.0));
        assert_eq!(GradientKey::new(f32::NAN, Vec3::ZERO).position(), 0.0);
    }

    #[test]
    fn test_from_keys_rejects_empty() {
        assert!(GradientKeySet::from_keys(vec![]).is_err());
    }

    #[test]
    fn test_add_key_is_black_and_clamped() {
        let mut keys = black_white();
        let index = keys.add_key(-0.2);
        assert_eq!(index, 2);
        assert_eq!(keys.get(index).unwrap().position(), 0.0);
        assert_eq!(keys.get(index).unwrap().color(), Vec3::ZERO);
    }

    #[test]
    fn test_move_key_clamped() {
        let mut keys = black_white();
        assert!(keys.move_key(0, 0.3));
        assert!((keys.get(0).unwrap().position() - 0.3).abs() < 1e-6);

        assert!(keys.move_key(0, 5.0));
        assert_eq!(keys.get(0).unwrap().position(), 1.0);

        assert!(keys.move_key(1, -7.0));
        assert_eq!(keys.get(1).unwrap().position(), 0.0);

        assert!(!keys.move_key(9, 0.1));
    }

    #[test]
    fn test_set_color_and_position() {
        let mut keys = black_white();
        assert!(keys.set_color(0, Vec3::new(0.2, 2.0, 0.4)));
        assert_eq!(keys.get(0).unwrap().color(), Vec3::new(0.2, 1.0, 0.4));
        assert!(keys.set_position(1, 0.75));
        assert_eq!(keys.get(1).unwrap().position(), 0.75);
        assert!(!keys.set_color(2, Vec3::ONE));
        assert!(!keys.set_position(2, 0.5));
    }

    #[traced_test]
    #[test]
    fn test_remove_last_key_is_noop() {
        let mut keys = GradientKeySet::single(GradientKey::new(0.5, Vec3::X));
        assert!(!keys.remove_key(0));
        assert_eq!(keys.key_count(), 1);
        assert!(logs_contain("refusing to remove the last gradient key"));
    }

    #[test]
    fn test_remove_key() {
        let mut keys = black_white();
        assert!(!keys.remove_key(5));
        assert!(keys.remove_key(0));
        assert_eq!(keys.key_count(), 1);
        assert_eq!(keys.get(0).unwrap().color(), Vec3::ONE);
        assert!(!keys.remove_key(0));
    }

    #[test]
    fn test_clear_keeps_first_key() {
        let mut keys = GradientKeySet::default();
        let first = *keys.get(0).unwrap();

        assert!(keys.clear());
        assert_eq!(keys.key_count(), 1);
        assert_eq!(*keys.get(0).unwrap(), first);
        assert!(!keys.clear());
        assert_eq!(keys.key_count(), 1);
    }

    #[test]
    fn test_sorted_is_stable_on_ties() {
        let keys = GradientKeySet::from_keys(vec![
            GradientKey::new(0.8, Vec3::X),
            GradientKey::new(0.2, Vec3::Y),
            GradientKey::new(0.2, Vec3::Z),
        ])
        .unwrap();

        let sorted = keys.sorted();
        assert_eq!(sorted[0].color(), Vec3::Y);
        assert_eq!(sorted[1].color(), Vec3::Z);
        assert_eq!(sorted[2].color(), Vec3::X);
    }

    #[test]
    fn test_color_mapper() {
        let keys = black_white();
        let color = keys.map_color(0.5);
        assert!((color[0] - 0.5).abs() < 1e-6);
        assert_eq!(color[3], 1.0);

        let ramp = synthesize(&keys, 3);
        assert_eq!(ramp.map_color(1.0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_key_set_serialization() {
        let keys = GradientKeySet::default();
        let json = serde_json::to_string(&keys).unwrap();
        let restored: GradientKeySet = serde_json::from_str(&json).unwrap();
        assert_eq!(keys, restored);

        let empty: std::result::Result<GradientKeySet, _> = serde_json::from_str("[]");
        assert!(empty.is_err());
    }
}
