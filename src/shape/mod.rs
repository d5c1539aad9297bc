//! Planet shape: noise layer settings and the generator evaluating them

mod generator;
mod settings;

pub use generator::{ElevationRange, ElevationSample, ShapeGenerator};
pub use settings::{NoiseLayer, ShapeSettings, ShapeSettingsBuilder, MAX_OCTAVES, MIN_POSITIVE};
