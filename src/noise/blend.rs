//! Weighted tooth/pulp blending and min-max normalization.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::field::NoiseField;
use super::NoiseError;

/// Relative weights of the two noise layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the high-frequency tooth field.
    pub tooth: f32,
    /// Weight of the low-frequency pulp field.
    pub pulp: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            tooth: 0.7,
            pulp: 0.3,
        }
    }
}

/// Target interval for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizeRange {
    /// Map min to -1 and max to 1.
    Symmetric,
    /// Map min to 0 and max to 1.
    Unit,
}

impl NormalizeRange {
    /// Returns the `(low, high)` bounds of the range.
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            NormalizeRange::Symmetric => (-1.0, 1.0),
            NormalizeRange::Unit => (0.0, 1.0),
        }
    }
}

/// Computes `weights.tooth * tooth + weights.pulp * pulp` per pixel.
pub fn blend(tooth: &NoiseField, pulp: &NoiseField, weights: BlendWeights) -> Result<NoiseField, NoiseError> {
    if !tooth.same_shape(pulp) {
        return Err(NoiseError::ShapeMismatch {
            expected: (tooth.width, tooth.height),
            actual: (pulp.width, pulp.height),
        });
    }

    let values: Vec<f32> = tooth
        .values
        .par_iter()
        .zip(pulp.values.par_iter())
        .map(|(&t, &p)| t * weights.tooth + p * weights.pulp)
        .collect();

    Ok(NoiseField {
        width: tooth.width,
        height: tooth.height,
        values,
    })
}

/// Linearly rescales `field` so its minimum and maximum hit the ends of `range`.
///
/// Consumes the field and rescales in place.
///
/// # Errors
/// [`NoiseError::DegenerateNoise`] if the field is empty, constant, contains
/// NaN, or its range is not finite.
pub fn normalize(mut field: NoiseField, range: NormalizeRange) -> Result<NoiseField, NoiseError> {
    if field.is_empty() {
        return Err(NoiseError::DegenerateNoise { min: 0.0, max: 0.0 });
    }

    let (min, max) = field.value_range();
    let span = max - min;
    if !(span.is_finite() && span > 0.0) || field.values.iter().any(|v| v.is_nan()) {
        return Err(NoiseError::DegenerateNoise { min, max });
    }

    let (low, high) = range.bounds();
    let extent = high - low;
    field.values.par_iter_mut().for_each(|v| {
        *v = (*v - min) / span * extent + low;
    });

    Ok(field)
}

/// Blends and normalizes in one step.
pub fn combine(
    tooth: &NoiseField,
    pulp: &NoiseField,
    weights: BlendWeights,
    range: NormalizeRange,
) -> Result<NoiseField, NoiseError> {
    normalize(blend(tooth, pulp, weights)?, range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> NoiseField {
        let values = (0..width * height).map(|i| i as f32 * 0.37 - 3.0).collect();
        NoiseField::from_vec(width, height, values).unwrap()
    }

    #[test]
    fn test_default_weights() {
        let weights = BlendWeights::default();
        assert_eq!(weights.tooth, 0.7);
        assert_eq!(weights.pulp, 0.3);
    }

    #[test]
    fn test_blend_weighted_sum() {
        let tooth = NoiseField::filled(2, 2, 1.0);
        let pulp = NoiseField::filled(2, 2, -2.0);
        let blended = blend(&tooth, &pulp, BlendWeights::default()).unwrap();

        for &v in &blended.values {
            assert!((v - 0.1).abs() < 1e-6, "0.7 * 1 + 0.3 * -2 should be 0.1, got {}", v);
        }
    }

    #[test]
    fn test_blend_shape_mismatch() {
        let tooth = NoiseField::new(4, 4);
        let pulp = NoiseField::new(4, 3);
        assert!(matches!(
            blend(&tooth, &pulp, BlendWeights::default()),
            Err(NoiseError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_normalize_symmetric_spans_range() {
        let normalized = normalize(ramp(5, 4), NormalizeRange::Symmetric).unwrap();
        let (min, max) = normalized.value_range();
        assert!((min + 1.0).abs() < 1e-6);
        assert!((max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_unit_spans_range() {
        let normalized = normalize(ramp(5, 4), NormalizeRange::Unit).unwrap();
        let (min, max) = normalized.value_range();
        assert_eq!(min, 0.0);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(normalized.values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_preserves_order() {
        let normalized = normalize(ramp(3, 3), NormalizeRange::Unit).unwrap();
        for pair in normalized.values.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_constant_field_is_degenerate() {
        let flat = NoiseField::filled(8, 8, 0.42);
        for range in [NormalizeRange::Symmetric, NormalizeRange::Unit] {
            let result = normalize(flat.clone(), range);
            assert!(
                matches!(result, Err(NoiseError::DegenerateNoise { .. })),
                "Zero-variance input must not normalize"
            );
        }
    }

    #[test]
    fn test_combine_degenerate_inputs() {
        let tooth = NoiseField::filled(4, 4, 0.0);
        let pulp = NoiseField::filled(4, 4, 0.0);
        let result = combine(&tooth, &pulp, BlendWeights::default(), NormalizeRange::Symmetric);
        assert!(matches!(result, Err(NoiseError::DegenerateNoise { .. })));
    }

    #[test]
    fn test_non_finite_is_degenerate() {
        let field = NoiseField::from_vec(2, 1, vec![0.0, f32::INFINITY]).unwrap();
        assert!(normalize(field, NormalizeRange::Unit).is_err());
    }
}
