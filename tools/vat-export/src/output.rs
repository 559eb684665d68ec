//! Baked texture output
//!
//! Each bake writes three files next to each other:
//! - `<stem>.offsets.bin` - offsets texture, RGBA32F rows, little-endian
//! - `<stem>.normals.bin` - normals texture, same layout
//! - `<stem>.vat.json` - [`VatMetadata`] describing both plus the export UVs
//!
//! Raw rows keep the exact float values so the host's image storage can pick
//! its own container format.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use vat_common::{BakeSettings, BakedTextures, PixelBuffer};

/// Bytes per RGBA32F pixel
pub const PIXEL_SIZE: usize = 16;

/// Sidecar describing a bake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatMetadata {
    pub width: u32,
    pub height: u32,
    pub num_wraps: u32,
    pub vertex_count: u32,
    pub frame_count: u32,
    pub settings: BakeSettings,
    /// Offset value range before normalization (`[min, max]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_range: Option<[f32; 2]>,
    pub offsets_file: String,
    pub normals_file: String,
    /// Export-mesh UVs, by vertex index
    pub uvs: Vec<[f32; 2]>,
}

impl VatMetadata {
    pub fn new(baked: &BakedTextures, settings: &BakeSettings, paths: &OutputPaths) -> Self {
        Self {
            width: baked.width(),
            height: baked.height(),
            num_wraps: baked.resolution.num_wraps,
            vertex_count: baked.resolution.vertex_count,
            frame_count: baked.resolution.frame_count,
            settings: *settings,
            offset_range: baked.offset_range.map(|r| [r.min, r.max]),
            offsets_file: file_name(&paths.offsets),
            normals_file: file_name(&paths.normals),
            uvs: baked.export_uvs(settings.flip_y),
        }
    }

    /// Load metadata from a `.vat.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse metadata: {}", path.display()))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Paths of the three files written for one bake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub offsets: PathBuf,
    pub normals: PathBuf,
    pub metadata: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, stem: &str) -> Self {
        Self {
            offsets: dir.join(format!("{}.offsets.bin", stem)),
            normals: dir.join(format!("{}.normals.bin", stem)),
            metadata: dir.join(format!("{}.vat.json", stem)),
        }
    }
}

/// Write a pixel buffer as little-endian RGBA32F rows
pub fn write_pixel_buffer<W: Write>(w: &mut W, buffer: &PixelBuffer) -> Result<()> {
    for value in buffer.as_floats() {
        w.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

/// Read a pixel buffer written by [`write_pixel_buffer`]
pub fn read_pixel_buffer(data: &[u8], width: u32, height: u32) -> Result<PixelBuffer> {
    let expected = width as usize * height as usize * PIXEL_SIZE;
    if data.len() != expected {
        bail!(
            "Pixel data size mismatch: {} bytes for {}x{} (expected {})",
            data.len(),
            width,
            height,
            expected
        );
    }

    let pixels = data
        .chunks_exact(PIXEL_SIZE)
        .map(|px| {
            let mut rgba = [0.0f32; 4];
            for (c, bytes) in rgba.iter_mut().zip(px.chunks_exact(4)) {
                *c = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
            rgba
        })
        .collect();

    PixelBuffer::from_pixels(width, height, pixels).context("Pixel data does not fill the texture")
}

fn write_buffer_file(path: &Path, buffer: &PixelBuffer) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    write_pixel_buffer(&mut writer, buffer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", path))?;
    Ok(())
}

/// Write both textures and the metadata sidecar
pub fn write_baked(
    baked: &BakedTextures,
    settings: &BakeSettings,
    paths: &OutputPaths,
) -> Result<VatMetadata> {
    if let Some(dir) = paths.metadata.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
        }
    }

    write_buffer_file(&paths.offsets, &baked.offsets)?;
    write_buffer_file(&paths.normals, &baked.normals)?;

    let metadata = VatMetadata::new(baked, settings, paths);
    let json = serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    std::fs::write(&paths.metadata, json)
        .with_context(|| format!("Failed to write metadata: {:?}", paths.metadata))?;

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_bytes_are_little_endian() {
        let buffer = PixelBuffer::from_pixels(1, 1, vec![[1.0, -2.0, 0.5, 1.0]]).unwrap();
        let mut bytes = Vec::new();
        write_pixel_buffer(&mut bytes, &buffer).unwrap();

        assert_eq!(bytes.len(), PIXEL_SIZE);
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
        assert_eq!(read_pixel_buffer(&bytes, 1, 1).unwrap(), buffer);
    }

    #[test]
    fn test_read_rejects_truncated_data() {
        assert!(read_pixel_buffer(&[0u8; 20], 1, 2).is_err());
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::new(Path::new("out"), "flag");
        assert_eq!(paths.offsets, Path::new("out/flag.offsets.bin"));
        assert_eq!(paths.normals, Path::new("out/flag.normals.bin"));
        assert_eq!(paths.metadata, Path::new("out/flag.vat.json"));
    }
}
