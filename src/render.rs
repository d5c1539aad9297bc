//! Rendering collaborator seam
//!
//! The editing session pushes geometry and the ramp texture through
//! [`RenderSink`] and never touches a graphics API itself. A real backend
//! (Bevy, wgpu, WebGL) implements the trait; [`HeadlessRenderer`] records
//! what it was asked to do.

use tracing::trace;

use crate::camera::OrbitCamera;
use crate::gradient::GradientRampImage;
use crate::mesh::PlanetMesh;
use crate::shape::ElevationRange;

/// Receives planet data and draw requests from the session
pub trait RenderSink {
    /// Replace the planet geometry with the given mesh
    fn upload_mesh(&mut self, mesh: &PlanetMesh);

    /// Replace the elevation color texture
    fn set_planet_texture(&mut self, ramp: &GradientRampImage);

    /// Draw one frame
    fn render_scene(&mut self, camera: &OrbitCamera, elevation: &ElevationRange);
}

/// Renderer that only counts calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessRenderer {
    /// Number of `upload_mesh` calls
    pub mesh_uploads: usize,
    /// Number of `set_planet_texture` calls
    pub texture_uploads: usize,
    /// Number of `render_scene` calls
    pub frames: usize,
    /// Vertex count of the last uploaded mesh
    pub last_vertex_count: usize,
    /// Width of the last uploaded texture
    pub last_texture_width: usize,
    /// Camera distance at the last frame
    pub last_camera_distance: Option<f32>,
}

impl HeadlessRenderer {
    /// Create a renderer with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for HeadlessRenderer {
    fn upload_mesh(&mut self, mesh: &PlanetMesh) {
        self.mesh_uploads += 1;
        self.last_vertex_count = mesh.vertex_count();
        trace!(vertices = mesh.vertex_count(), "mesh uploaded");
    }

    fn set_planet_texture(&mut self, ramp: &GradientRampImage) {
        self.texture_uploads += 1;
        self.last_texture_width = ramp.width();
        trace!(width = ramp.width(), "planet texture set");
    }

    fn render_scene(&mut self, camera: &OrbitCamera, _elevation: &ElevationRange) {
        self.frames += 1;
        self.last_camera_distance = Some(camera.distance());
    }
}
