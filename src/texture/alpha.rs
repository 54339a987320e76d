//! Mapping of normalized noise to an 8-bit alpha (density) channel.

use serde::{Deserialize, Serialize};

use crate::noise::NoiseField;

/// How normalized noise becomes opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AlphaMapping {
    /// `base_opacity + noise * variance`, expecting noise in [-1, 1].
    ///
    /// The result is clamped to [0, 255] after quantisation since the
    /// constants alone do not bound it.
    Density { base_opacity: f32, variance: f32 },
    /// `noise` used directly as opacity, expecting noise in [0, 1].
    ///
    /// Not clamped: normalization already bounds the input.
    Direct,
}

impl AlphaMapping {
    /// Density mapping for the OLED overlay: 10% opacity +/- 3%.
    pub fn oled_density() -> Self {
        AlphaMapping::Density {
            base_opacity: 0.10,
            variance: 0.03,
        }
    }

    /// Maps one normalized noise value to an alpha byte.
    #[inline]
    pub fn map(&self, value: f32) -> u8 {
        match *self {
            AlphaMapping::Density {
                base_opacity,
                variance,
            } => {
                let alpha = base_opacity + value * variance;
                (alpha * 255.0).round().clamp(0.0, 255.0) as u8
            }
            AlphaMapping::Direct => (value * 255.0).round() as u8,
        }
    }

    /// Applies the mapping to every sample of `field`.
    pub fn apply(&self, field: &NoiseField) -> AlphaMap {
        AlphaMap {
            width: field.width,
            height: field.height,
            values: field.values.iter().map(|&v| self.map(v)).collect(),
        }
    }
}

/// Per-pixel 8-bit opacity in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<u8>,
}

impl AlphaMap {
    /// Mean opacity as a fraction of 255.
    pub fn mean_opacity(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.values.iter().map(|&v| v as u64).sum();
        sum as f32 / (self.values.len() as f32 * 255.0)
    }

    /// Minimum and maximum alpha values, or `None` if empty.
    pub fn range(&self) -> Option<(u8, u8)> {
        let min = self.values.iter().copied().min()?;
        let max = self.values.iter().copied().max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_endpoints() {
        let mapping = AlphaMapping::oled_density();
        // 0.07 * 255 = 17.85, 0.10 * 255 = 25.5, 0.13 * 255 = 33.15
        assert_eq!(mapping.map(-1.0), 18);
        assert_eq!(mapping.map(0.0), 26);
        assert_eq!(mapping.map(1.0), 33);
    }

    #[test]
    fn test_density_clamps() {
        let mapping = AlphaMapping::Density {
            base_opacity: 0.5,
            variance: 1.0,
        };
        assert_eq!(mapping.map(-1.0), 0);
        assert_eq!(mapping.map(1.0), 255);
    }

    #[test]
    fn test_direct_rounds() {
        let mapping = AlphaMapping::Direct;
        assert_eq!(mapping.map(0.0), 0);
        assert_eq!(mapping.map(1.0), 255);
        assert_eq!(mapping.map(0.5), 128);
        assert_eq!(mapping.map(0.1), 26);
    }

    #[test]
    fn test_apply_keeps_shape_and_input() {
        let field = NoiseField::from_vec(3, 2, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]).unwrap();
        let before = field.clone();
        let alpha = AlphaMapping::Direct.apply(&field);

        assert_eq!((alpha.width, alpha.height), (3, 2));
        assert_eq!(alpha.values, vec![0, 51, 102, 153, 204, 255]);
        assert_eq!(field, before);
        assert_eq!(alpha.range(), Some((0, 255)));
    }

    #[test]
    fn test_mean_opacity() {
        let alpha = AlphaMap {
            width: 2,
            height: 1,
            values: vec![0, 255],
        };
        assert!((alpha.mean_opacity() - 0.5).abs() < 1e-6);
    }
}
