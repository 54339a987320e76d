//! Noise generation module for paper texture synthesis.
//!
//! Produces the two Gaussian layers (fine "tooth" and coarse "pulp"),
//! the bicubic upsampler used for pulp, and the blend/normalize step.

mod field;
mod gaussian;
mod resample;
mod blend;

use thiserror::Error;

pub use field::NoiseField;
pub use gaussian::{coarse_dimensions, generate_pulp, generate_tooth, sample_gaussian_field, DEFAULT_PULP_FACTOR};
pub use resample::resample_bicubic;
pub use blend::{blend, combine, normalize, BlendWeights, NormalizeRange};

/// Errors that can occur while generating or combining noise fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    #[error("Invalid dimensions {width}x{height}: coarse grid at factor {factor} would be empty")]
    InvalidDimensions { width: u32, height: u32, factor: u32 },
    #[error("Degenerate noise: min ({min}) and max ({max}) leave no range to normalize")]
    DegenerateNoise { min: f32, max: f32 },
    #[error("Field shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: (u32, u32), actual: (u32, u32) },
}
