//! Error types for planet editing

use thiserror::Error;

/// Errors that can occur while configuring a session or exporting its output
///
/// Noise parameters, gradient key positions and camera input are never
/// rejected; they are clamped where they are written. Only the session
/// configuration and image encoding can fail.
#[derive(Debug, Error)]
pub enum PlanetError {
    /// Session configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The gradient ramp could not be encoded as an image
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type alias for planet editing operations
pub type Result<T> = std::result::Result<T, PlanetError>;
