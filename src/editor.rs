//! Interactive editing session
//!
//! [`PlanetEditor`] owns everything one open editor needs: the current shape
//! and gradient snapshots, the derived mesh and ramp, the orbit camera, the
//! recompute scheduler and the renderer it draws with. Edits only record new
//! snapshots; [`PlanetEditor::update`] is where regeneration and drawing
//! happen.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use rust_cube_planet::*;
//!
//! let config = EditorConfigBuilder::new().face_resolution(8).build().unwrap();
//! let start = Instant::now();
//! let mut editor = PlanetEditor::new(
//!     config,
//!     ShapeSettings::default(),
//!     GradientKeySet::default(),
//!     HeadlessRenderer::new(),
//!     start,
//! );
//!
//! editor.set_shape_settings(ShapeSettings::default().with_radius(2.0), start);
//! editor.update(start + Duration::from_millis(150));
//! assert_eq!(editor.mesh_generations(), 2);
//! ```

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use tracing::{debug, info};

use crate::camera::OrbitCamera;
use crate::config::EditorConfig;
use crate::error::Result;
use crate::gradient::{synthesize, GradientKeySet, GradientRampImage};
use crate::mesh::PlanetMesh;
use crate::render::RenderSink;
use crate::schedule::RecomputeScheduler;
use crate::shape::{ShapeGenerator, ShapeSettings};

/// What one [`PlanetEditor::update`] call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// The mesh was rebuilt and uploaded
    pub mesh_rebuilt: bool,
    /// The ramp was resynthesized and uploaded
    pub ramp_rebuilt: bool,
    /// A frame was drawn
    pub redrawn: bool,
}

/// One editing session around a single planet
pub struct PlanetEditor<R: RenderSink> {
    config: EditorConfig,

    shape: Arc<ShapeSettings>,
    applied_shape: Arc<ShapeSettings>,
    generator: ShapeGenerator,
    mesh: PlanetMesh,

    keys: Arc<GradientKeySet>,
    applied_keys: Arc<GradientKeySet>,
    selected: Option<usize>,
    ramp: GradientRampImage,

    camera: OrbitCamera,
    scheduler: RecomputeScheduler,
    renderer: R,

    mesh_generations: usize,
    ramp_generations: usize,
    frames: usize,
}

impl<R: RenderSink> PlanetEditor<R> {
    /// Open a session, building and uploading the first mesh and ramp
    pub fn new(
        config: EditorConfig,
        settings: impl Into<Arc<ShapeSettings>>,
        keys: GradientKeySet,
        mut renderer: R,
        now: Instant,
    ) -> Self {
        let shape = settings.into();
        let keys = Arc::new(keys);

        let generator = ShapeGenerator::new(shape.clone());
        let mut mesh = PlanetMesh::new();
        mesh.rebuild(&generator, config.face_resolution);
        renderer.upload_mesh(&mesh);

        let ramp = synthesize(&keys, config.ramp_width);
        renderer.set_planet_texture(&ramp);

        info!(
            resolution = config.face_resolution,
            vertices = mesh.vertex_count(),
            keys = keys.key_count(),
            "planet editor opened"
        );

        Self {
            config,
            applied_shape: shape.clone(),
            shape,
            generator,
            mesh,
            applied_keys: keys.clone(),
            keys,
            selected: None,
            ramp,
            camera: OrbitCamera::new(&config),
            scheduler: RecomputeScheduler::new(&config, now),
            renderer,
            mesh_generations: 1,
            ramp_generations: 1,
            frames: 0,
        }
    }

    /// Replace the shape settings; the mesh follows after the quiet period
    pub fn set_shape_settings(&mut self, settings: impl Into<Arc<ShapeSettings>>, now: Instant) {
        let settings = settings.into();
        if Arc::ptr_eq(&settings, &self.shape) {
            return;
        }
        self.shape = settings;
        self.scheduler.push_shape(self.shape.clone(), now);
    }

    fn edit_keys(&mut self, now: Instant, edit: impl FnOnce(&mut GradientKeySet) -> bool) -> bool {
        let mut next = GradientKeySet::clone(&self.keys);
        if !edit(&mut next) {
            return false;
        }
        self.keys = Arc::new(next);
        self.scheduler.push_gradient(self.keys.clone(), now);
        true
    }

    /// Add a black key and return its index
    pub fn add_key(&mut self, position: f32, now: Instant) -> usize {
        let mut index = 0;
        self.edit_keys(now, |keys| {
            index = keys.add_key(position);
            true
        });
        index
    }

    /// Drag a key along the ramp by `delta`
    pub fn move_key(&mut self, index: usize, delta: f32, now: Instant) -> bool {
        self.edit_keys(now, |keys| keys.move_key(index, delta))
    }

    /// Move a key to an absolute position
    pub fn set_key_position(&mut self, index: usize, position: f32, now: Instant) -> bool {
        self.edit_keys(now, |keys| keys.set_position(index, position))
    }

    /// Recolor a key
    pub fn set_key_color(&mut self, index: usize, color: Vec3, now: Instant) -> bool {
        self.edit_keys(now, |keys| keys.set_color(index, color))
    }

    /// Remove a key; never removes the last one
    pub fn remove_key(&mut self, index: usize, now: Instant) -> bool {
        if !self.edit_keys(now, |keys| keys.remove_key(index)) {
            return false;
        }
        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        true
    }

    /// Remove the selected key and clear the selection
    pub fn remove_selected(&mut self, now: Instant) -> bool {
        match self.selected {
            Some(index) => self.remove_key(index, now),
            None => {
                debug!("no gradient key selected");
                false
            }
        }
    }

    /// Keep only the first key and clear the selection
    pub fn clear_keys(&mut self, now: Instant) -> bool {
        self.selected = None;
        self.edit_keys(now, GradientKeySet::clear)
    }

    /// Select a key for later removal; false for an unknown index
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.keys.key_count() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Clear the key selection
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Rotate the camera by a pointer drag
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.camera.drag(dx, dy);
    }

    /// Zoom the camera by a wheel movement
    pub fn zoom(&mut self, wheel_delta: f32) {
        self.camera.zoom(wheel_delta);
    }

    /// Run everything due at `now`: regenerations first, then the redraw
    pub fn update(&mut self, now: Instant) -> UpdateOutcome {
        let due = self.scheduler.poll(now);
        let mut outcome = UpdateOutcome::default();

        if let Some(shape) = due.shape {
            outcome.mesh_rebuilt = self.regenerate_mesh(shape);
        }
        if let Some(keys) = due.gradient {
            outcome.ramp_rebuilt = self.regenerate_ramp(keys);
        }
        if due.redraw {
            self.renderer
                .render_scene(&self.camera, &self.mesh.elevation_range());
            self.frames += 1;
            outcome.redrawn = true;
        }
        outcome
    }

    fn regenerate_mesh(&mut self, shape: Arc<ShapeSettings>) -> bool {
        if Arc::ptr_eq(&shape, &self.applied_shape) {
            debug!("shape snapshot already applied, skipping mesh rebuild");
            return false;
        }
        self.generator.on_noise_settings_change(shape.clone());
        self.mesh.rebuild(&self.generator, self.config.face_resolution);
        self.renderer.upload_mesh(&self.mesh);
        self.applied_shape = shape;
        self.mesh_generations += 1;
        true
    }

    fn regenerate_ramp(&mut self, keys: Arc<GradientKeySet>) -> bool {
        if Arc::ptr_eq(&keys, &self.applied_keys) {
            debug!("gradient snapshot already applied, skipping ramp synthesis");
            return false;
        }
        self.ramp = synthesize(&keys, self.config.ramp_width);
        self.renderer.set_planet_texture(&self.ramp);
        self.applied_keys = keys;
        self.ramp_generations += 1;
        true
    }

    /// PNG encoding of the current ramp, the still image a UI would preview
    pub fn ramp_png(&self) -> Result<Vec<u8>> {
        self.ramp.encode_png()
    }

    /// Session configuration
    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Latest shape snapshot, possibly not built yet
    #[inline]
    pub fn shape_settings(&self) -> &Arc<ShapeSettings> {
        &self.shape
    }

    /// Generator holding the snapshot the current mesh was built from
    #[inline]
    pub fn generator(&self) -> &ShapeGenerator {
        &self.generator
    }

    /// Mesh from the last applied shape snapshot
    #[inline]
    pub fn mesh(&self) -> &PlanetMesh {
        &self.mesh
    }

    /// Latest key snapshot, possibly not synthesized yet
    #[inline]
    pub fn keys(&self) -> &Arc<GradientKeySet> {
        &self.keys
    }

    /// Currently selected key index
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Ramp from the last applied key snapshot
    #[inline]
    pub fn ramp(&self) -> &GradientRampImage {
        &self.ramp
    }

    /// Orbit camera state
    #[inline]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Renderer the session draws with
    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Whether edits are still waiting for their quiet period
    pub fn has_pending_edits(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Meshes built so far, including the initial one
    #[inline]
    pub fn mesh_generations(&self) -> usize {
        self.mesh_generations
    }

    /// Ramps synthesized so far, including the initial one
    #[inline]
    pub fn ramp_generations(&self) -> usize {
        self.ramp_generations
    }

    /// Frames drawn so far
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Close the session and hand back the renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
