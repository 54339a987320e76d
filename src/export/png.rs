//! RGBA assembly and PNG export for paper textures.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbaImage};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::texture::AlphaMap;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Unsupported output format for {0}: only .png preserves alpha losslessly")]
    UnsupportedFormat(PathBuf),
    #[error("Alpha map has {actual} values, expected {expected} for {width}x{height}")]
    ShapeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Unix mode given to exported files.
#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o644;

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Interleaves a constant RGB colour with `alpha` into an RGBA buffer.
///
/// # Returns
/// A `height x width x 4` image in R, G, B, A channel order.
pub fn assemble_rgba(rgb: [u8; 3], alpha: &AlphaMap) -> Result<RgbaImage, PngExportError> {
    let expected = (alpha.width as usize) * (alpha.height as usize);
    if alpha.values.len() != expected {
        return Err(PngExportError::ShapeMismatch {
            width: alpha.width,
            height: alpha.height,
            expected,
            actual: alpha.values.len(),
        });
    }

    let mut raw = Vec::with_capacity(expected * 4);
    for &a in &alpha.values {
        raw.extend_from_slice(&[rgb[0], rgb[1], rgb[2], a]);
    }

    // Length was checked above, so from_raw cannot reject the buffer.
    RgbaImage::from_raw(alpha.width, alpha.height, raw).ok_or(PngExportError::ShapeMismatch {
        width: alpha.width,
        height: alpha.height,
        expected,
        actual: alpha.values.len(),
    })
}

/// Returns true if `path` has a `.png` extension (case-insensitive).
fn is_png_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Writes `img` to `path` as an 8-bit RGBA PNG.
///
/// The image is encoded into a temporary file next to `path` and renamed
/// into place once complete, so a failed export never leaves a partial
/// file behind. The parent directory must already exist.
///
/// # Arguments
/// * `img` - The RGBA image to export
/// * `path` - Output file path; must end in `.png`
/// * `options` - Encoder settings
pub fn export_rgba_png(
    img: &RgbaImage,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    if !is_png_path(path) {
        return Err(PngExportError::UnsupportedFormat(path.to_path_buf()));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let encoder = PngEncoder::new_with_quality(&mut writer, options.compression, options.filter);
        encoder.write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        writer.flush()?;
    }

    // NamedTempFile creates 0600; widen to the usual asset mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(OUTPUT_MODE))?;
    }

    tmp.persist(path).map_err(|e| PngExportError::Io(e.error))?;
    Ok(())
}
