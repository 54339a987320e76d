//! Separable bicubic resampling of noise fields.
//!
//! Uses the Keys cubic convolution kernel with `a = -0.5`. Output pixel
//! centres are mapped onto the source grid (`(x + 0.5) * in / out`), so
//! non-integer scale ratios stretch correctly. Taps falling outside the
//! source are dropped and the remaining weights renormalised, which keeps
//! constant fields constant right up to the border.

use rayon::prelude::*;

use super::field::NoiseField;
use super::NoiseError;

/// Support radius of the cubic kernel in source pixels (at scale 1).
const CUBIC_SUPPORT: f64 = 2.0;
const CUBIC_A: f64 = -0.5;

/// Keys cubic convolution kernel.
fn cubic(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 {
        ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        (((x - 5.0) * x + 8.0) * x - 4.0) * CUBIC_A
    } else {
        0.0
    }
}

/// Precomputed filter taps for one output coordinate.
#[derive(Debug, Clone)]
struct Taps {
    /// First source index covered by `weights`.
    start: usize,
    weights: Vec<f32>,
}

/// Builds the per-output-pixel taps for resampling `in_size` to `out_size`.
fn compute_taps(in_size: u32, out_size: u32) -> Vec<Taps> {
    let scale = in_size as f64 / out_size as f64;
    // Widen the kernel when reducing so every source pixel contributes.
    let filter_scale = scale.max(1.0);
    let support = CUBIC_SUPPORT * filter_scale;
    let inv_filter_scale = 1.0 / filter_scale;

    (0..out_size)
        .map(|x| {
            let center = (x as f64 + 0.5) * scale;
            let start = ((center - support + 0.5).floor().max(0.0)) as usize;
            let end = ((center + support + 0.5).floor() as usize).min(in_size as usize);

            let mut weights: Vec<f64> = (start..end)
                .map(|i| cubic((i as f64 - center + 0.5) * inv_filter_scale))
                .collect();
            let total: f64 = weights.iter().sum();
            if total != 0.0 {
                for w in &mut weights {
                    *w /= total;
                }
            }

            Taps {
                start,
                weights: weights.into_iter().map(|w| w as f32).collect(),
            }
        })
        .collect()
}

/// Resamples `field` to `width` x `height` with bicubic interpolation.
///
/// Runs a horizontal pass followed by a vertical pass; each pass processes
/// rows in parallel.
///
/// # Errors
/// [`NoiseError::InvalidDimensions`] if either output dimension is zero or
/// `field` has no samples.
pub fn resample_bicubic(field: &NoiseField, width: u32, height: u32) -> Result<NoiseField, NoiseError> {
    if width == 0 || height == 0 || field.width == 0 || field.height == 0 || field.is_empty() {
        return Err(NoiseError::InvalidDimensions {
            width,
            height,
            factor: 1,
        });
    }

    let src_w = field.width as usize;
    let out_w = width as usize;

    // Horizontal pass: src_h rows of out_w samples.
    let x_taps = compute_taps(field.width, width);
    let mut horizontal = vec![0.0f32; out_w * field.height as usize];
    horizontal
        .par_chunks_mut(out_w)
        .zip(field.values.par_chunks(src_w))
        .for_each(|(out_row, src_row)| {
            for (out, taps) in out_row.iter_mut().zip(&x_taps) {
                *out = taps
                    .weights
                    .iter()
                    .enumerate()
                    .map(|(k, w)| src_row[taps.start + k] * w)
                    .sum();
            }
        });

    // Vertical pass: height rows of out_w samples.
    let y_taps = compute_taps(field.height, height);
    let mut values = vec![0.0f32; out_w * height as usize];
    values
        .par_chunks_mut(out_w)
        .zip(y_taps.par_iter())
        .for_each(|(out_row, taps)| {
            for (k, w) in taps.weights.iter().enumerate() {
                let src_start = (taps.start + k) * out_w;
                let src_row = &horizontal[src_start..src_start + out_w];
                for (out, &v) in out_row.iter_mut().zip(src_row) {
                    *out += v * w;
                }
            }
        });

    Ok(NoiseField {
        width,
        height,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_shape() {
        assert_eq!(cubic(0.0), 1.0);
        assert!(cubic(1.0).abs() < 1e-12);
        assert!(cubic(2.0).abs() < 1e-12);
        assert!(cubic(0.5) > 0.0);
        assert!(cubic(1.5) < 0.0, "Lobe between 1 and 2 should be negative");
    }

    #[test]
    fn test_taps_are_normalized() {
        for taps in compute_taps(7, 30) {
            let sum: f32 = taps.weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "Weight sum {} != 1", sum);
        }
    }

    #[test]
    fn test_constant_field_stays_constant() {
        let field = NoiseField::filled(5, 3, 0.75);
        let up = resample_bicubic(&field, 21, 14).unwrap();

        assert_eq!((up.width, up.height), (21, 14));
        for &v in &up.values {
            assert!((v - 0.75).abs() < 1e-5, "Expected 0.75, got {}", v);
        }
    }

    #[test]
    fn test_identity_resample() {
        let values: Vec<f32> = (0..12).map(|i| i as f32 * 0.3 - 1.0).collect();
        let field = NoiseField::from_vec(4, 3, values).unwrap();
        let same = resample_bicubic(&field, 4, 3).unwrap();

        for (a, b) in field.values.iter().zip(&same.values) {
            assert!((a - b).abs() < 1e-5, "Identity resample changed {} to {}", a, b);
        }
    }

    #[test]
    fn test_non_integer_ratio_tracks_linear_ramp() {
        // Cubic convolution reproduces linear functions away from the border.
        let width = 10u32;
        let values: Vec<f32> = (0..width).map(|x| x as f32).collect();
        let field = NoiseField::from_vec(width, 1, values).unwrap();
        let up = resample_bicubic(&field, 37, 1).unwrap();

        let scale = width as f32 / 37.0;
        for x in 8..29u32 {
            let expected = (x as f32 + 0.5) * scale - 0.5;
            let got = up.get(x, 0);
            assert!(
                (got - expected).abs() < 1e-3,
                "At x={} expected {} got {}",
                x,
                expected,
                got
            );
        }
    }

    #[test]
    fn test_zero_sized_requests_are_rejected() {
        let field = NoiseField::filled(4, 4, 1.0);
        assert!(matches!(
            resample_bicubic(&field, 0, 4),
            Err(NoiseError::InvalidDimensions { width: 0, height: 4, .. })
        ));
        assert!(resample_bicubic(&field, 4, 0).is_err());

        let empty = NoiseField::new(0, 0);
        assert!(resample_bicubic(&empty, 4, 4).is_err());
    }

    #[test]
    fn test_upsample_is_smooth() {
        // A single spike should spread to neighbours rather than stay a block.
        let mut field = NoiseField::new(4, 4);
        field.set(1, 1, 1.0);
        let up = resample_bicubic(&field, 16, 16).unwrap();

        let peak = up.get(6, 6);
        let near = up.get(7, 6);
        let far = up.get(9, 6);
        assert!(peak > near && near > far, "{} > {} > {} expected", peak, near, far);
    }
}
