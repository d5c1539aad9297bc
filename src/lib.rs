//! Cube-sphere planet mesh generation
//!
//! A standalone library for building noise-displaced planet meshes from six
//! subdivided cube faces, colored through an editable gradient ramp. It is
//! suitable for use with any engine (Bevy, Godot, wgpu, etc.): geometry is
//! exposed as flat buffers and drawing goes through the [`RenderSink`] trait.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_cube_planet::*;
//!
//! // Describe the shape
//! let settings = ShapeSettingsBuilder::new()
//!     .radius(1.0)
//!     .seed(42)
//!     .layer(NoiseLayer::default())
//!     .build();
//!
//! // Build the mesh
//! let generator = ShapeGenerator::new(settings);
//! let mesh = generate_planet_mesh(&generator, 16);
//!
//! // Color it by elevation
//! let ramp = synthesize(&GradientKeySet::default(), 256);
//! let colors = mesh.vertex_colors(&ramp);
//! assert_eq!(colors.len(), mesh.vertex_count());
//! ```
//!
//! For interactive use, [`PlanetEditor`] wraps all of the above with
//! debounced regeneration, a fixed-rate redraw and an orbit camera.
//!
//! # Features
//!
//! - `serde`: Enables serialization support for settings, gradient keys and configuration

// Modules
pub mod error;
pub mod config;
pub mod noise;
pub mod shape;
pub mod mesh;
pub mod gradient;
pub mod schedule;
pub mod camera;
pub mod render;
pub mod editor;

// Re-export core types for convenience
pub use error::{PlanetError, Result};
pub use config::{EditorConfig, EditorConfigBuilder};
pub use noise::NoiseField;
pub use shape::{ElevationRange, ElevationSample, NoiseLayer, ShapeGenerator, ShapeSettings, ShapeSettingsBuilder};
pub use mesh::{generate_planet_mesh, CubeFace, FaceVertices, PlanetMesh, TerrainFace};
pub use gradient::{synthesize, ColorMapper, GradientKey, GradientKeySet, GradientRampImage, Rgba};
pub use schedule::{Debouncer, DueWork, FixedInterval, RecomputeScheduler};
pub use camera::{clamp_angle, OrbitCamera};
pub use render::{HeadlessRenderer, RenderSink};
pub use editor::{PlanetEditor, UpdateOutcome};

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
