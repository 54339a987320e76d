//! Synthesis stages and one-shot pipeline orchestration.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rand::Rng;
use thiserror::Error;

use crate::export::{assemble_rgba, export_rgba_png, PngExportError, PngExportOptions};
use crate::noise::{coarse_dimensions, combine, generate_pulp, generate_tooth, NoiseError, NoiseField};
use crate::texture::{AlphaMap, TextureConfig, TextureVariant};

/// Unique identifier for synthesis stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Full-resolution white noise.
    Tooth,
    /// Coarse noise upsampled to full resolution.
    Pulp,
    /// Weighted blend plus min-max normalization.
    Combine,
    /// Noise to 8-bit alpha.
    Alpha,
    /// RGB + alpha interleaving.
    Assemble,
    /// PNG encode and atomic write.
    Export,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Tooth => "Tooth Noise",
            StageId::Pulp => "Pulp Noise",
            StageId::Combine => "Blend & Normalize",
            StageId::Alpha => "Alpha Mapping",
            StageId::Assemble => "RGBA Assembly",
            StageId::Export => "PNG Export",
        }
    }
}

/// Errors that abort a synthesis run.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Invalid dimensions {width}x{height}: pulp factor {factor} needs at least {factor}x{factor}")]
    InvalidDimensions { width: u32, height: u32, factor: u32 },
    #[error("Degenerate noise (min {min}, max {max}); retry with a fresh seed")]
    DegenerateNoise { min: f32, max: f32 },
    #[error("Noise field shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: (u32, u32), actual: (u32, u32) },
    #[error("Failed to assemble image: {0}")]
    Assembly(#[source] PngExportError),
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: PngExportError,
    },
}

impl From<NoiseError> for SynthesisError {
    fn from(err: NoiseError) -> Self {
        match err {
            NoiseError::InvalidDimensions {
                width,
                height,
                factor,
            } => SynthesisError::InvalidDimensions {
                width,
                height,
                factor,
            },
            NoiseError::DegenerateNoise { min, max } => SynthesisError::DegenerateNoise { min, max },
            NoiseError::ShapeMismatch { expected, actual } => {
                SynthesisError::ShapeMismatch { expected, actual }
            }
        }
    }
}

/// Output of a completed synthesis.
#[derive(Debug, Clone)]
pub struct PaperTexture {
    /// The final RGBA buffer.
    pub image: RgbaImage,
    /// The alpha channel on its own, for inspection.
    pub alpha: AlphaMap,
}

/// Runs the paper texture pipeline for one configuration.
///
/// Every call allocates its own fields and owns them until it returns;
/// nothing is cached between runs. Randomness comes only from the `rng`
/// handed to each call: tooth samples are drawn first, then the coarse
/// pulp grid, both row-major.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: TextureConfig,
    export: PngExportOptions,
}

impl Synthesizer {
    /// Creates a synthesizer for the given configuration.
    pub fn new(config: TextureConfig) -> Self {
        Self {
            config,
            export: PngExportOptions::default(),
        }
    }

    /// Creates a synthesizer for a built-in variant.
    pub fn for_variant(variant: TextureVariant) -> Self {
        Self::new(variant.config())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TextureConfig {
        &self.config
    }

    /// Number of stages reported by [`Self::synthesize_with_callbacks`].
    pub const SYNTHESIS_STAGES: usize = 5;

    /// Number of stages reported by [`Self::generate_with_callbacks`].
    pub const GENERATE_STAGES: usize = 6;

    /// Synthesizes the texture in memory.
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PaperTexture, SynthesisError> {
        self.synthesize_with_callbacks(rng, |_, _, _| {}, |_, _, _| {})
    }

    /// Synthesizes the texture in memory with progress callbacks.
    ///
    /// # Arguments
    /// * `rng` - Random source for both noise layers
    /// * `on_stage_start` - Called with (stage name, index, total) before each stage
    /// * `on_stage_complete` - Called with (stage name, index, total) after each stage
    pub fn synthesize_with_callbacks<R, F1, F2>(
        &self,
        rng: &mut R,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<PaperTexture, SynthesisError>
    where
        R: Rng + ?Sized,
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        self.run_stages(rng, Self::SYNTHESIS_STAGES, &mut on_stage_start, &mut on_stage_complete)
    }

    /// Synthesizes the texture and writes it to the configured output path.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathBuf, SynthesisError> {
        self.generate_with_callbacks(rng, |_, _, _| {}, |_, _, _| {})
    }

    /// Synthesizes and writes the texture with progress callbacks.
    ///
    /// # Returns
    /// The path written on success.
    pub fn generate_with_callbacks<R, F1, F2>(
        &self,
        rng: &mut R,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<PathBuf, SynthesisError>
    where
        R: Rng + ?Sized,
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = Self::GENERATE_STAGES;
        let texture = self.run_stages(rng, total, &mut on_stage_start, &mut on_stage_complete)?;

        let stage = StageId::Export;
        let index = total - 1;
        on_stage_start(stage.name(), index, total);
        let path = self.config.output.clone();
        write_texture(&texture.image, &path, &self.export)?;
        on_stage_complete(stage.name(), index, total);

        Ok(path)
    }

    fn run_stages<R, F1, F2>(
        &self,
        rng: &mut R,
        total: usize,
        on_stage_start: &mut F1,
        on_stage_complete: &mut F2,
    ) -> Result<PaperTexture, SynthesisError>
    where
        R: Rng + ?Sized,
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let config = &self.config;

        // Reject bad canvases before allocating anything.
        coarse_dimensions(config.width, config.height, config.pulp_factor)?;

        let mut index = 0;
        let mut stage = |id: StageId| {
            let i = index;
            index += 1;
            (id, i)
        };

        let (id, i) = stage(StageId::Tooth);
        on_stage_start(id.name(), i, total);
        let tooth = generate_tooth(config.width, config.height, rng)?;
        on_stage_complete(id.name(), i, total);

        let (id, i) = stage(StageId::Pulp);
        on_stage_start(id.name(), i, total);
        let pulp = generate_pulp(config.width, config.height, config.pulp_factor, rng)?;
        on_stage_complete(id.name(), i, total);

        let (id, i) = stage(StageId::Combine);
        on_stage_start(id.name(), i, total);
        let combined: NoiseField = combine(&tooth, &pulp, config.weights, config.range)?;
        drop(tooth);
        drop(pulp);
        on_stage_complete(id.name(), i, total);

        let (id, i) = stage(StageId::Alpha);
        on_stage_start(id.name(), i, total);
        let alpha = config.alpha.apply(&combined);
        drop(combined);
        on_stage_complete(id.name(), i, total);

        let (id, i) = stage(StageId::Assemble);
        on_stage_start(id.name(), i, total);
        let image = assemble_rgba(config.rgb, &alpha).map_err(SynthesisError::Assembly)?;
        on_stage_complete(id.name(), i, total);

        Ok(PaperTexture { image, alpha })
    }
}

fn write_texture(image: &RgbaImage, path: &Path, options: &PngExportOptions) -> Result<(), SynthesisError> {
    export_rgba_png(image, path, options).map_err(|source| SynthesisError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Generates a built-in variant with its preset size and output path.
pub fn generate_variant<R: Rng + ?Sized>(
    variant: TextureVariant,
    rng: &mut R,
) -> Result<PathBuf, SynthesisError> {
    Synthesizer::for_variant(variant).generate(rng)
}
