//! vat-export - vertex animation texture export tool
//!
//! Bakes sampled mesh frames (JSON frame dumps) into offsets and normals
//! textures (.offsets.bin, .normals.bin) plus a .vat.json sidecar.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vat_common::{plan, PositionMode, WrapMode};

use vat_export::{check_dump, describe_resolution, export_vat, ExportOptions, VatManifest};

#[derive(Parser)]
#[command(name = "vat-export")]
#[command(about = "Vertex animation texture export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a frame dump into VAT textures
    Bake {
        /// Input frame dump (JSON)
        input: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to vat.toml manifest
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Wrap mode: none, wrap or wrap_crop
        #[arg(short, long)]
        wrap: Option<WrapMode>,

        /// Position mode: offsets or absolutes
        #[arg(short, long)]
        position_mode: Option<PositionMode>,

        /// Normalize offsets into [0, 1]
        #[arg(long)]
        normalize: bool,

        /// Keep the top-left origin instead of flipping rows
        #[arg(long)]
        no_flip_y: bool,
    },

    /// Show the texture size for a vertex and frame count
    Plan {
        /// Number of vertices
        #[arg(long)]
        vertices: u32,

        /// Number of frames
        #[arg(long)]
        frames: u32,

        /// Wrap mode: none, wrap or wrap_crop
        #[arg(short, long, default_value = "none")]
        wrap: WrapMode,
    },

    /// Validate a frame dump without baking
    Check {
        /// Input frame dump (JSON)
        input: PathBuf,

        /// Path to vat.toml manifest
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Wrap mode (overrides manifest)
        #[arg(short, long)]
        wrap: Option<WrapMode>,
    },
}

fn load_manifest(config: Option<&PathBuf>) -> Result<VatManifest> {
    match config {
        Some(path) => VatManifest::load(path),
        None => Ok(VatManifest::default()),
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bake {
            input,
            output,
            config,
            wrap,
            position_mode,
            normalize,
            no_flip_y,
        } => {
            let manifest = load_manifest(config.as_ref())?;

            let mut settings = manifest.bake;
            if let Some(wrap) = wrap {
                settings.wrap_mode = wrap;
            }
            if let Some(position_mode) = position_mode {
                settings.position_mode = position_mode;
            }
            if normalize {
                settings.normalize = true;
            }
            if no_flip_y {
                settings.flip_y = false;
            }

            let options = ExportOptions {
                settings,
                frame_range: manifest.frames,
                output_dir: output.or(manifest.output.dir),
                name: manifest.output.name,
            };

            tracing::info!("Baking {:?}", input);
            let metadata = export_vat(&input, &options)?;
            tracing::info!(
                "Wrote {} and {}",
                metadata.offsets_file,
                metadata.normals_file
            );
            tracing::info!("Done!");
        }

        Commands::Plan {
            vertices,
            frames,
            wrap,
        } => {
            let resolution = plan(vertices, frames, wrap)?;
            describe_resolution(&resolution);
        }

        Commands::Check {
            input,
            config,
            wrap,
        } => {
            let manifest = load_manifest(config.as_ref())?;
            let wrap_mode = wrap.unwrap_or(manifest.bake.wrap_mode);
            tracing::info!("Checking {:?}", input);
            check_dump(&input, manifest.frames.as_ref(), wrap_mode)?;
            tracing::info!("Frame dump is valid!");
        }
    }

    Ok(())
}
