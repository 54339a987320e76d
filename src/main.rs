//! Papertex CLI - Procedural paper texture generator.
//!
//! Writes the OLED paper overlay and the tintable paper texture as
//! 1920x1080 RGBA PNGs.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use papertex::pipeline::Synthesizer;
use papertex::texture::TextureVariant;

/// Procedural paper texture generator.
#[derive(Parser)]
#[command(name = "papertex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the warm, low-opacity OLED overlay (oled_paper_overlay.png).
    Overlay {
        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Generate the white, tintable paper texture (assets/paper_texture.png).
    Texture {
        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Generate both textures from one random stream.
    All {
        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Display canvas and memory information for the presets.
    Info,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Overlay { seed } => run_generate(&[TextureVariant::Overlay], seed),
        Commands::Texture { seed } => run_generate(&[TextureVariant::Tintable], seed),
        Commands::All { seed } => run_generate(&TextureVariant::all(), seed),
        Commands::Info => run_info(),
    }
}

fn run_generate(variants: &[TextureVariant], seed: Option<u64>) {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for &variant in variants {
        let synth = Synthesizer::for_variant(variant);
        let config = synth.config();

        println!("Generating {}x{} {}...", config.width, config.height, variant.label());
        println!("  Seed: {}", seed);

        let start = Instant::now();
        let path = synth
            .generate_with_callbacks(
                &mut rng,
                |_, _, _| {},
                |name, i, total| {
                    println!("  [{}/{}] {}", i + 1, total, name);
                },
            )
            .unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });

        println!("  Completed in {:.2?}", start.elapsed());
        println!("Done. Saved to {}", path.display());
    }
}

fn run_info() {
    println!("Papertex - Preset Info");
    println!("======================");

    for variant in TextureVariant::all() {
        let config = variant.config();
        let bytes = config.estimated_memory_bytes();
        let coarse_w = config.width / config.pulp_factor;
        let coarse_h = config.height / config.pulp_factor;

        println!();
        println!("{}:", variant.label());
        println!("  Canvas:      {}x{} ({} pixels)", config.width, config.height, config.pixel_count());
        println!("  Pulp grid:   {}x{} (factor {})", coarse_w, coarse_h, config.pulp_factor);
        println!("  Weights:     tooth {:.2}, pulp {:.2}", config.weights.tooth, config.weights.pulp);
        println!("  Colour:      rgb({}, {}, {})", config.rgb[0], config.rgb[1], config.rgb[2]);
        println!("  Output:      {}", config.output.display());
        println!("  Peak memory: {:>12} bytes ({:.2} MB)", bytes, bytes as f64 / 1024.0 / 1024.0);
    }
}
