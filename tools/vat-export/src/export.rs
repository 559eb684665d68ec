//! Frame dump -> VAT textures

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use vat_common::{plan, BakeSettings, FrameRange, Resolution, WrapMode};

use crate::input::FrameDump;
use crate::limits::check_limits;
use crate::output::{write_baked, OutputPaths, VatMetadata};

/// Everything needed to bake one frame dump
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub settings: BakeSettings,
    /// Frames to keep from the dump; all when `None`
    pub frame_range: Option<FrameRange>,
    /// Output directory; the dump's directory when `None`
    pub output_dir: Option<PathBuf>,
    /// Output file stem; the dump's stem when `None`
    pub name: Option<String>,
}

/// Bake a frame dump and write the textures and metadata
pub fn export_vat(input: &Path, options: &ExportOptions) -> Result<VatMetadata> {
    let dump = FrameDump::load(input)?;
    let frames = dump.to_sequence(options.frame_range.as_ref())?;
    let (vertex_count, frame_count) = frames.validate()?;

    for warning in check_limits(vertex_count, frame_count, options.settings.wrap_mode)? {
        tracing::warn!("{}", warning);
    }

    let baked = vat_common::bake(&frames, &options.settings)
        .with_context(|| format!("Failed to bake {:?}", input))?;

    let output_dir = options
        .output_dir
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let stem = match &options.name {
        Some(name) => name.clone(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .context("Input path has no file name")?,
    };
    let paths = OutputPaths::new(&output_dir, &stem);
    let metadata = write_baked(&baked, &options.settings, &paths)?;

    tracing::info!(
        "Baked {} vertices x {} frames -> {}x{} ({} wraps, {})",
        vertex_count,
        frame_count,
        metadata.width,
        metadata.height,
        metadata.num_wraps,
        options.settings.wrap_mode
    );
    if let Some([min, max]) = metadata.offset_range {
        tracing::info!("Min Offset: {:.4}", min);
        tracing::info!("Max Offset: {:.4}", max);
    }

    Ok(metadata)
}

/// Validate a frame dump without writing anything
pub fn check_dump(
    input: &Path,
    frame_range: Option<&FrameRange>,
    wrap_mode: WrapMode,
) -> Result<Resolution> {
    let dump = FrameDump::load(input)?;
    let frames = dump.to_sequence(frame_range)?;
    let (vertex_count, frame_count) = frames.validate()?;

    for warning in check_limits(vertex_count, frame_count, wrap_mode)? {
        tracing::warn!("{}", warning);
    }

    let resolution = plan(vertex_count, frame_count, wrap_mode)?;
    describe_resolution(&resolution);
    Ok(resolution)
}

/// Log the planned texture size the way the baking panel shows it
pub fn describe_resolution(resolution: &Resolution) {
    tracing::info!(
        "Vertex Count: {}, Frame Count: {}",
        resolution.vertex_count,
        resolution.frame_count
    );
    tracing::info!(
        "Output Size: {} x {}",
        resolution.texture_width(),
        resolution.texture_height()
    );
    if resolution.wrap_mode == WrapMode::Wrap {
        tracing::info!("Y Used: {}", resolution.y_used());
        if resolution.data_rows() > resolution.height as u64 {
            tracing::warn!(
                "Wrapped rows ({}) exceed the texture height, use wrap_crop",
                resolution.data_rows()
            );
        }
    }
    if resolution.wrap_mode.is_wrapped() {
        tracing::info!("Num Wraps: {}", resolution.num_wraps);
    }
}
