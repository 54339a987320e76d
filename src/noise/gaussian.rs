//! Gaussian "tooth" and "pulp" field generation.
//!
//! Tooth is per-pixel white noise. Pulp is white noise drawn on a grid
//! `factor` times coarser and bicubically upsampled back to full size,
//! giving low-frequency clumps roughly `factor` pixels across.

use rand::Rng;
use rand_distr::StandardNormal;

use super::field::NoiseField;
use super::resample::resample_bicubic;
use super::NoiseError;

/// Default downscale factor for the coarse pulp grid.
pub const DEFAULT_PULP_FACTOR: u32 = 4;

/// Checks that a `width` x `height` canvas yields a non-empty coarse grid.
///
/// # Returns
/// The coarse grid dimensions `(width / factor, height / factor)`.
pub fn coarse_dimensions(width: u32, height: u32, factor: u32) -> Result<(u32, u32), NoiseError> {
    let invalid = NoiseError::InvalidDimensions {
        width,
        height,
        factor,
    };

    if width == 0 || height == 0 || factor == 0 {
        return Err(invalid);
    }

    let low_w = width / factor;
    let low_h = height / factor;
    if low_w == 0 || low_h == 0 {
        return Err(invalid);
    }

    Ok((low_w, low_h))
}

/// Draws a field of independent standard-normal samples in row-major order.
pub fn sample_gaussian_field<R: Rng + ?Sized>(width: u32, height: u32, rng: &mut R) -> NoiseField {
    let count = (width as usize) * (height as usize);
    let values: Vec<f32> = (0..count).map(|_| rng.sample(StandardNormal)).collect();

    NoiseField {
        width,
        height,
        values,
    }
}

/// Generates the full-resolution, spatially uncorrelated tooth field.
pub fn generate_tooth<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<NoiseField, NoiseError> {
    if width == 0 || height == 0 {
        return Err(NoiseError::InvalidDimensions {
            width,
            height,
            factor: 1,
        });
    }
    Ok(sample_gaussian_field(width, height, rng))
}

/// Generates the pulp field: coarse Gaussian noise upsampled to `width` x `height`.
///
/// # Arguments
/// * `width`, `height` - Output (canvas) dimensions
/// * `factor` - Downscale factor for the coarse grid (floor division)
/// * `rng` - Random source, advanced by `(width / factor) * (height / factor)` draws
pub fn generate_pulp<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    factor: u32,
    rng: &mut R,
) -> Result<NoiseField, NoiseError> {
    let (low_w, low_h) = coarse_dimensions(width, height, factor)?;
    let coarse = sample_gaussian_field(low_w, low_h, rng);
    resample_bicubic(&coarse, width, height)
}
