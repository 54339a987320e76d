//! Texture presets and the noise-to-alpha channel mapping.

mod config;
mod alpha;

pub use config::{TextureConfig, TextureVariant, PAPER_RGB, WHITE_RGB, DEFAULT_WIDTH, DEFAULT_HEIGHT};
pub use alpha::{AlphaMap, AlphaMapping};
