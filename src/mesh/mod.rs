//! Planet mesh assembly
//!
//! Collects the six [`TerrainFace`] outputs into one engine-agnostic buffer
//! set, in the same flat layout any rasterizer expects:
//! - Bevy: insert as `ATTRIBUTE_POSITION` / `ATTRIBUTE_NORMAL` on a `TriangleList` mesh
//! - wgpu / WebGL: upload `position_components()` directly as a vertex buffer

mod face;

pub use face::{CubeFace, FaceVertices, TerrainFace};

use std::time::Instant;

use tracing::{debug, trace};

use crate::gradient::{ColorMapper, Rgba};
use crate::shape::{ElevationRange, ShapeGenerator};

/// Accumulated planet geometry, non-indexed
///
/// Buffers are only exposed read-only. The one way to change them is
/// [`clear`](Self::clear) followed by [`push_mesh`](Self::push_mesh) for every
/// face; there is no per-face update.
#[derive(Debug, Clone, Default)]
pub struct PlanetMesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    elevations: Vec<f32>,
    range: ElevationRange,
}

impl PlanetMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty all buffers and reset the elevation range
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.elevations.clear();
        self.range = ElevationRange::default();
    }

    /// Append one face's triangle list
    pub fn push_mesh(&mut self, face: &FaceVertices) {
        debug_assert_eq!(face.positions.len(), face.normals.len());
        debug_assert_eq!(face.positions.len(), face.elevations.len());

        self.positions
            .extend(face.positions.iter().map(|p| p.to_array()));
        self.normals.extend(face.normals.iter().map(|n| n.to_array()));
        self.elevations.extend_from_slice(&face.elevations);
        self.range = self.range.merge(face.range);
    }

    /// Clear and rebuild from all six cube faces
    pub fn rebuild(&mut self, generator: &ShapeGenerator, resolution: usize) {
        let total_start = Instant::now();
        self.clear();

        for cube_face in CubeFace::all() {
            let face_start = Instant::now();
            let vertices = TerrainFace::new(resolution, cube_face, generator).make_vertices();
            self.push_mesh(&vertices);
            trace!(
                face = cube_face.short_name(),
                vertices = vertices.vertex_count(),
                elapsed = ?face_start.elapsed(),
                "face built"
            );
        }

        debug!(
            resolution,
            vertices = self.vertex_count(),
            min_elevation = self.range.min,
            max_elevation = self.range.max,
            elapsed = ?total_start.elapsed(),
            "planet mesh rebuilt"
        );
    }

    /// Vertex positions, three per triangle
    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Positions as one flat `x, y, z, x, y, z, ...` slice
    #[inline]
    pub fn position_components(&self) -> &[f32] {
        self.positions.as_flattened()
    }

    /// Unit normals, parallel to `positions`
    #[inline]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Normals as one flat slice
    #[inline]
    pub fn normal_components(&self) -> &[f32] {
        self.normals.as_flattened()
    }

    /// Normalized elevation per vertex, the gradient ramp coordinate
    #[inline]
    pub fn elevations(&self) -> &[f32] {
        &self.elevations
    }

    /// Raw elevation range observed over every face grid
    #[inline]
    pub fn elevation_range(&self) -> ElevationRange {
        self.range
    }

    /// Per-vertex colors from the normalized elevations
    pub fn vertex_colors(&self, mapper: &impl ColorMapper) -> Vec<Rgba> {
        self.elevations
            .iter()
            .map(|&elevation| mapper.map_color(elevation))
            .collect()
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Build a complete planet mesh from a generator
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let generator = ShapeGenerator::new(ShapeSettings::default());
/// let mesh = generate_planet_mesh(&generator, 10);
/// assert_eq!(mesh.triangle_count(), 6 * 2 * 9 * 9);
/// ```
pub fn generate_planet_mesh(generator: &ShapeGenerator, resolution: usize) -> PlanetMesh {
    let mut mesh = PlanetMesh::new();
    mesh.rebuild(generator, resolution);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{NoiseLayer, ShapeSettings};

    #[test]
    fn test_generate_mesh() {
        let generator = ShapeGenerator::new(ShapeSettings::default());
        let mesh = generate_planet_mesh(&generator, 6);

        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 6 * 6 * 25);
        assert_eq!(mesh.position_components().len(), 6 * 18 * 25);
        assert_eq!(mesh.normal_components().len(), mesh.position_components().len());
        assert_eq!(mesh.elevations().len(), mesh.vertex_count());
        assert!(!mesh.elevation_range().is_empty());
    }

    #[test]
    fn test_clear() {
        let generator = ShapeGenerator::new(ShapeSettings::default());
        let mut mesh = generate_planet_mesh(&generator, 4);
        mesh.clear();

        assert!(mesh.is_empty());
        assert!(mesh.normals().is_empty());
        assert!(mesh.elevations().is_empty());
        assert!(mesh.elevation_range().is_empty());
    }

    #[test]
    fn test_rebuild_replaces_instead_of_appending() {
        let generator = ShapeGenerator::new(ShapeSettings::default());
        let mut mesh = generate_planet_mesh(&generator, 5);
        let first = mesh.vertex_count();

        mesh.rebuild(&generator, 5);
        assert_eq!(mesh.vertex_count(), first);
    }

    #[test]
    fn test_push_mesh_appends_faces() {
        let generator = ShapeGenerator::new(ShapeSettings::default());
        let mut mesh = PlanetMesh::new();

        let a = TerrainFace::new(3, CubeFace::PosX, &generator).make_vertices();
        let b = TerrainFace::new(3, CubeFace::NegX, &generator).make_vertices();
        mesh.push_mesh(&a);
        mesh.push_mesh(&b);

        assert_eq!(mesh.vertex_count(), a.vertex_count() + b.vertex_count());
        assert_eq!(mesh.positions()[0], a.positions[0].to_array());
        assert_eq!(mesh.positions()[a.vertex_count()], b.positions[0].to_array());
    }

    #[test]
    fn test_flat_planet_every_vertex_on_radius() {
        let generator = ShapeGenerator::new(ShapeSettings::new(
            4.0,
            0,
            vec![
                NoiseLayer {
                    enabled: false,
                    ..NoiseLayer::default()
                },
                NoiseLayer {
                    enabled: false,
                    strength: 2.0,
                    ..NoiseLayer::default()
                },
            ],
        ));
        let mesh = generate_planet_mesh(&generator, 9);

        for p in mesh.positions() {
            let length = glam::Vec3::from_array(*p).length();
            assert!((length - 4.0).abs() < 1e-5);
        }
        assert_eq!(mesh.elevation_range().max, 0.0);
    }

    #[test]
    fn test_vertex_colors_follow_elevation() {
        use crate::gradient::{synthesize, GradientKey, GradientKeySet};

        let generator = ShapeGenerator::new(ShapeSettings::default().scatter_centers(5));
        let mesh = generate_planet_mesh(&generator, 5);
        let keys = GradientKeySet::from_keys(vec![
            GradientKey::new(0.0, glam::Vec3::ZERO),
            GradientKey::new(1.0, glam::Vec3::ONE),
        ])
        .unwrap();
        let ramp = synthesize(&keys, 256);

        let colors = mesh.vertex_colors(&ramp);
        assert_eq!(colors.len(), mesh.vertex_count());
        for (color, &elevation) in colors.iter().zip(mesh.elevations()) {
            assert!((color[0] - elevation).abs() < 1.0 / 255.0 + 1e-6);
            assert_eq!(color[3], 1.0);
        }
    }

    #[test]
    fn test_mesh_consistency() {
        let generator = ShapeGenerator::new(ShapeSettings::default().scatter_centers(11));

        let mesh1 = generate_planet_mesh(&generator, 6);
        let mesh2 = generate_planet_mesh(&generator, 6);

        assert_eq!(mesh1.positions(), mesh2.positions());
        assert_eq!(mesh1.normals(), mesh2.normals());
    }
}
