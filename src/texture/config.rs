//! Texture synthesis configuration and the two built-in presets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::noise::{BlendWeights, NormalizeRange, DEFAULT_PULP_FACTOR};
use super::alpha::AlphaMapping;

/// Warm D50-ish paper white used by the overlay.
pub const PAPER_RGB: [u8; 3] = [248, 242, 230];

/// Pure white, for textures tinted at draw time.
pub const WHITE_RGB: [u8; 3] = [255, 255, 255];

/// Default canvas size (1080p).
pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;

/// The built-in texture variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureVariant {
    /// Low-opacity warm paper layer drawn over an OLED UI.
    Overlay,
    /// White grain texture whose alpha carries the full noise range.
    Tintable,
}

impl TextureVariant {
    /// Returns all variants in generation order.
    pub fn all() -> [TextureVariant; 2] {
        [TextureVariant::Overlay, TextureVariant::Tintable]
    }

    /// Human-readable label used in progress output.
    pub fn label(&self) -> &'static str {
        match self {
            TextureVariant::Overlay => "OLED Paper Overlay",
            TextureVariant::Tintable => "Paper Texture",
        }
    }

    /// Returns the preset configuration for this variant.
    pub fn config(&self) -> TextureConfig {
        match self {
            TextureVariant::Overlay => TextureConfig::oled_overlay(),
            TextureVariant::Tintable => TextureConfig::tintable(),
        }
    }
}

/// Parameters for one paper texture synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Downscale factor of the coarse pulp grid.
    pub pulp_factor: u32,
    /// Tooth/pulp blend weights.
    pub weights: BlendWeights,
    /// Interval the blended noise is stretched to.
    pub range: NormalizeRange,
    /// Noise to alpha mapping.
    pub alpha: AlphaMapping,
    /// Constant RGB broadcast over every pixel.
    pub rgb: [u8; 3],
    /// Destination PNG path.
    pub output: PathBuf,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self::oled_overlay()
    }
}

impl TextureConfig {
    /// Overlay preset: warm paper RGB, alpha 0.10 +/- 0.03.
    pub fn oled_overlay() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pulp_factor: DEFAULT_PULP_FACTOR,
            weights: BlendWeights::default(),
            range: NormalizeRange::Symmetric,
            alpha: AlphaMapping::oled_density(),
            rgb: PAPER_RGB,
            output: PathBuf::from("oled_paper_overlay.png"),
        }
    }

    /// Tintable preset: white RGB, alpha spans the full 0-255 range.
    pub fn tintable() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            pulp_factor: DEFAULT_PULP_FACTOR,
            weights: BlendWeights::default(),
            range: NormalizeRange::Unit,
            alpha: AlphaMapping::Direct,
            rgb: WHITE_RGB,
            output: PathBuf::from("assets/paper_texture.png"),
        }
    }

    /// Returns a copy with a different canvas size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns a copy writing to `output`.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Number of pixels on the canvas.
    pub fn pixel_count(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Estimated peak bytes held during synthesis.
    ///
    /// Tooth, pulp and blended f32 fields, the coarse grid, the horizontal
    /// resample buffer, the alpha map and the RGBA buffer.
    pub fn estimated_memory_bytes(&self) -> u64 {
        let pixels = self.pixel_count();
        let factor = self.pulp_factor.max(1) as u64;
        let coarse_w = self.width as u64 / factor;
        let coarse_h = self.height as u64 / factor;

        let full_fields = pixels * 4 * 3;
        let coarse = coarse_w * coarse_h * 4;
        let horizontal = self.width as u64 * coarse_h * 4;
        let alpha = pixels;
        let rgba = pixels * 4;

        full_fields + coarse + horizontal + alpha + rgba
    }
}
