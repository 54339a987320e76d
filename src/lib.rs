//! Procedural paper texture synthesis.
//!
//! Blends fine per-pixel "tooth" noise with coarse, bicubically upsampled
//! "pulp" noise into an RGBA image whose alpha channel carries the grain.
//! Two presets are provided: a low-opacity warm overlay and a white texture
//! meant to be tinted by the consumer.

pub mod noise;
pub mod texture;
pub mod export;
pub mod pipeline;

pub use noise::{NoiseError, NoiseField};
pub use texture::{AlphaMap, AlphaMapping, TextureConfig, TextureVariant};
pub use export::{PngExportError, PngExportOptions};
pub use pipeline::{generate_variant, PaperTexture, SynthesisError, Synthesizer};
