//! One cube face projected onto the sphere and displaced by the shape generator

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shape::{ElevationRange, ElevationSample, ShapeGenerator};

/// Identifies which face of the cube a grid belongs to
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face (right)
    PosX = 0,
    /// -X face (left)
    NegX = 1,
    /// +Y face (top)
    PosY = 2,
    /// -Y face (bottom)
    NegY = 3,
    /// +Z face (front)
    PosZ = 4,
    /// -Z face (back)
    NegZ = 5,
}

impl CubeFace {
    /// All six faces, in the order a planet is assembled
    pub const fn all() -> [CubeFace; 6] {
        [
            CubeFace::PosX,
            CubeFace::NegX,
            CubeFace::PosY,
            CubeFace::NegY,
            CubeFace::PosZ,
            CubeFace::NegZ,
        ]
    }

    /// Outward unit axis of this face
    pub const fn direction(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Two axes spanning the face, `axis_a × axis_b` points outward
    pub fn basis(self) -> (Vec3, Vec3) {
        let up = self.direction();
        let axis_a = Vec3::new(up.y, up.z, up.x);
        let axis_b = up.cross(axis_a);
        (axis_a, axis_b)
    }

    /// Short name for the face (e.g. "posx", "negy")
    pub const fn short_name(self) -> &'static str {
        match self {
            CubeFace::PosX => "posx",
            CubeFace::NegX => "negx",
            CubeFace::PosY => "posy",
            CubeFace::NegY => "negy",
            CubeFace::PosZ => "posz",
            CubeFace::NegZ => "negz",
        }
    }
}

/// Displaced vertex data for one face, as a non-indexed triangle list
///
/// Every triangle owns its three vertices; nothing is shared, within the
/// face or across faces.
#[derive(Debug, Clone, Default)]
pub struct FaceVertices {
    /// World-space positions, three per triangle
    pub positions: Vec<Vec3>,
    /// Unit normals, parallel to `positions`
    pub normals: Vec<Vec3>,
    /// Normalized elevation (`[0, 1]`) per vertex, parallel to `positions`
    pub elevations: Vec<f32>,
    /// Raw elevation range over the face grid
    pub range: ElevationRange,
}

impl FaceVertices {
    /// Number of emitted vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of emitted triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// A `resolution × resolution` grid on one cube face
///
/// The face is stateless: every call to [`make_vertices`](Self::make_vertices)
/// rebuilds the whole grid from the generator's current snapshot.
///
/// # Example
///
/// ```rust
/// use rust_cube_planet::*;
///
/// let generator = ShapeGenerator::new(ShapeSettings::default());
/// let face = TerrainFace::new(8, CubeFace::PosY, &generator);
/// let vertices = face.make_vertices();
///
/// assert_eq!(vertices.vertex_count(), 6 * 7 * 7);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TerrainFace<'a> {
    resolution: usize,
    face: CubeFace,
    generator: &'a ShapeGenerator,
}

impl<'a> TerrainFace<'a> {
    /// Create a face grid; resolutions below 2 are raised to 2
    pub fn new(resolution: usize, face: CubeFace, generator: &'a ShapeGenerator) -> Self {
        Self {
            resolution: resolution.max(2),
            face,
            generator,
        }
    }

    /// Grid points per edge
    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Which cube face this grid covers
    #[inline]
    pub fn face(&self) -> CubeFace {
        self.face
    }

    /// Grid points projected onto the unit sphere, before displacement
    ///
    /// Row-major: index `x + y * resolution`.
    pub fn unit_sphere_points(&self) -> Vec<Vec3> {
        let r = self.resolution;
        let up = self.face.direction();
        let (axis_a, axis_b) = self.face.basis();
        let step = 1.0 / (r - 1) as f32;

        let mut points = Vec::with_capacity(r * r);
        for y in 0..r {
            for x in 0..r {
                let u = (x as f32 * step - 0.5) * 2.0;
                let v = (y as f32 * step - 0.5) * 2.0;
                let on_cube = up + axis_a * u + axis_b * v;
                points.push(on_cube.normalize());
            }
        }
        points
    }

    /// Build the displaced triangle list with per-vertex normals
    pub fn make_vertices(&self) -> FaceVertices {
        let r = self.resolution;
        let samples: Vec<ElevationSample> = self
            .unit_sphere_points()
            .into_iter()
            .map(|direction| self.generator.evaluate(direction))
            .collect();

        let mut range = ElevationRange::default();
        for sample in &samples {
            range.include(sample.elevation);
        }

        let normals = grid_normals(&samples, r);

        let cells = (r - 1) * (r - 1);
        let mut out = FaceVertices {
            positions: Vec::with_capacity(cells * 6),
            normals: Vec::with_capacity(cells * 6),
            elevations: Vec::with_capacity(cells * 6),
            range,
        };

        for y in 0..r - 1 {
            for x in 0..r - 1 {
                let i = x + y * r;
                // Counter-clockwise seen from outside the sphere
                for corner in [i, i + r + 1, i + r, i, i + 1, i + r + 1] {
                    out.positions.push(samples[corner].point);
                    out.normals.push(normals[corner]);
                    out.elevations.push(samples[corner].normalized);
                }
            }
        }

        out
    }
}

/// Per-grid-point normals from forward differences
///
/// The last column and row have no forward neighbour, so they reuse the
/// backward difference of the cell before them.
fn grid_normals(samples: &[ElevationSample], r: usize) -> Vec<Vec3> {
    let point = |x: usize, y: usize| samples[x + y * r].point;

    let mut normals = Vec::with_capacity(r * r);
    for y in 0..r {
        for x in 0..r {
            let p = point(x, y);
            let along_a = if x + 1 < r {
                point(x + 1, y) - p
            } else {
                p - point(x - 1, y)
            };
            let along_b = if y + 1 < r {
                point(x, y + 1) - p
            } else {
                p - point(x, y - 1)
            };

            let mut normal = along_a.cross(along_b).normalize_or_zero();
            if normal == Vec3::ZERO {
                normal = p.normalize_or_zero();
            }
            if normal.dot(p) < 0.0 {
                normal = -normal;
            }
            normals.push(normal);
        }
    }
    normals
}
