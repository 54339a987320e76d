//! Pipeline module for running paper texture synthesis end to end.
//!
//! A fixed, linear sequence of stages (tooth, pulp, combine, alpha,
//! assemble, export) with progress callbacks and a single error type.

mod stage;

pub use stage::{generate_variant, PaperTexture, StageId, SynthesisError, Synthesizer};
