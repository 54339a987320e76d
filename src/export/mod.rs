//! Export module for assembling and saving texture images.
//!
//! Writes 8-bit RGBA PNG so the alpha channel round-trips losslessly.

mod png;

pub use png::{assemble_rgba, export_rgba_png, PngExportError, PngExportOptions};
