//! Row-major 2D scalar grid used for every intermediate noise stage.

/// A width x height grid of noise samples stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseField {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample values, `values[y * width + x]`.
    pub values: Vec<f32>,
}

impl NoiseField {
    /// Creates a zero-filled field.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Wraps existing row-major samples.
    ///
    /// Returns `None` if `values.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, values: Vec<f32>) -> Option<Self> {
        if values.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    /// Creates a field where every sample equals `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true if both fields have the same width and height.
    pub fn same_shape(&self, other: &NoiseField) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Gets the sample at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }

    /// Sets the sample at (x, y).
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.values[(y * self.width + x) as usize] = value;
    }

    /// Computes the min and max sample values.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for &v in &self.values {
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Arithmetic mean of all samples (0.0 for an empty field).
    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|&v| v as f64).sum();
        (sum / self.values.len() as f64) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(NoiseField::from_vec(3, 2, vec![0.0; 5]).is_none());
        assert!(NoiseField::from_vec(3, 2, vec![0.0; 6]).is_some());
    }

    #[test]
    fn test_get_set_row_major() {
        let mut field = NoiseField::new(4, 3);
        field.set(3, 2, 1.5);
        assert_eq!(field.get(3, 2), 1.5);
        assert_eq!(field.values[2 * 4 + 3], 1.5);
    }

    #[test]
    fn test_value_range_and_mean() {
        let field = NoiseField::from_vec(2, 2, vec![-1.0, 0.5, 2.0, 0.5]).unwrap();
        assert_eq!(field.value_range(), (-1.0, 2.0));
        assert!((field.mean() - 0.5).abs() < 1e-6);
    }
}
