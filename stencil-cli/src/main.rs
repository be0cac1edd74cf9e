//! Command-line interface for stencil-core
//!
//! Runs the two-tone stencil engine against image files on disk: decode via
//! `image`, convert with `stencil_core::transform`, encode the raster as a
//! grayscale PNG.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use stencil_core::{transform, FrameModulation, PresetId};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Render a photo into a two-tone stencil raster")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single image to a two-tone stencil PNG
    Render {
        /// Input image file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Preset name (neon-contour, silhouette-etch, industrial-noise, crowd-ghost, topo-stroke)
        #[arg(short, long, default_value = "neon-contour")]
        preset: String,

        /// Oscillation phase for frame modulation (still images: 0.0)
        #[arg(long, default_value = "0.0")]
        phase: f32,

        /// Flow strength for frame modulation (still images: 0.0)
        #[arg(long, default_value = "0.0")]
        flow_strength: f32,

        /// Jitter for frame modulation (still images: 0.0)
        #[arg(long, default_value = "0.0")]
        jitter: f32,

        /// Write a `<output>.stencil.json` telemetry dump alongside the PNG
        #[arg(long)]
        dump: bool,
    },

    /// List the available presets
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render { input, output, preset, phase, flow_strength, jitter, dump } => {
            render_command(input, output, preset, phase, flow_strength, jitter, dump)
        }
        Commands::Presets => presets_command(),
    }
}

#[allow(clippy::too_many_arguments)]
fn render_command(
    input: PathBuf,
    output: PathBuf,
    preset_name: String,
    phase: f32,
    flow_strength: f32,
    jitter: f32,
    dump: bool,
) -> Result<()> {
    log::info!("Loading image: {}", input.display());
    let img = image::open(&input)
        .with_context(|| format!("Failed to open image: {}", input.display()))?
        .to_rgb8();

    let preset_id: PresetId = preset_name.parse().unwrap_or(PresetId::NeonContour);
    let preset = stencil_core::preset_for(preset_id);
    let modulation = FrameModulation { phase, flow_strength, jitter };

    log::info!("Rendering with preset {} ({}x{})", preset_id, img.width(), img.height());
    let start = Instant::now();

    let (binary, metrics) =
        transform(&img, &preset, &modulation).with_context(|| "Stencil rendering failed")?;

    log::info!(
        "Rendered in {:.3}s: white_ratio={:.4} components={}",
        start.elapsed().as_secs_f64(),
        metrics.white_ratio,
        metrics.component_count
    );

    let out_image = image::GrayImage::from_raw(binary.width, binary.height, binary.to_bytes())
        .context("Failed to assemble output raster")?;
    out_image
        .save(&output)
        .with_context(|| format!("Failed to write PNG to: {}", output.display()))?;
    log::info!("Stencil saved to: {}", output.display());

    if dump {
        let dump = stencil_core::telemetry::make_dump(
            &input.display().to_string(),
            binary.width,
            binary.height,
            preset_id,
            preset,
            modulation,
            metrics,
        );
        let dump_path = stencil_core::telemetry::write_json_dump(&output, &dump)
            .with_context(|| "Failed to write telemetry dump")?;
        log::info!("Telemetry dump saved to: {}", dump_path.display());
    }

    Ok(())
}

fn presets_command() -> Result<()> {
    for id in PresetId::all() {
        let preset = stencil_core::preset_for(id);
        println!(
            "{:<18} target={:.3} tolerance={:.3} dither={:?}",
            id.as_str(),
            preset.white_coverage_target,
            preset.coverage_tolerance,
            preset.dither
        );
    }
    Ok(())
}
