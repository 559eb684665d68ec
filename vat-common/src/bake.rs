//! One-call bake: plan, lay out, finish

use crate::error::Result;
use crate::finish::{OffsetRange, finish};
use crate::frames::FrameSequence;
use crate::layout::layout;
use crate::pixels::PixelBuffer;
use crate::resolution::{Resolution, plan};
use crate::settings::BakeSettings;
use crate::uv::export_uvs;

/// Result of a bake
#[derive(Debug, Clone)]
pub struct BakedTextures {
    /// Layout the buffers were built with
    pub resolution: Resolution,
    /// Position offsets (RGBA32F)
    pub offsets: PixelBuffer,
    /// Remapped normals (suitable for 8-bit storage)
    pub normals: PixelBuffer,
    /// Pre-normalization range, present when normalization ran
    pub offset_range: Option<OffsetRange>,
}

impl BakedTextures {
    pub fn width(&self) -> u32 {
        self.offsets.width()
    }

    pub fn height(&self) -> u32 {
        self.offsets.height()
    }

    /// Matching export-mesh UVs, one per vertex
    pub fn export_uvs(&self, flip_y: bool) -> Vec<[f32; 2]> {
        export_uvs(&self.resolution, flip_y)
    }
}

/// Bake `frames` into offsets and normals textures
pub fn bake(frames: &FrameSequence, settings: &BakeSettings) -> Result<BakedTextures> {
    let (vertex_count, frame_count) = frames.validate()?;
    let resolution = plan(vertex_count, frame_count, settings.wrap_mode)?;

    let (offsets, normals) = layout(frames, &resolution, settings.position_mode)?;
    let (offsets, normals, offset_range) =
        finish(
        offsets,
        normals,
        &resolution,
        settings.normalize,
        settings.flip_y,
    )?;

    tracing::debug!(
        "Baked {} vertices x {} frames into {}x{} ({} wraps)",
        vertex_count,
        frame_count,
        offsets.width(),
        offsets.height(),
        resolution.num_wraps
    );

    Ok(BakedTextures {
        resolution,
        offsets,
        normals,
        offset_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VatError;
    use crate::frames::{FrameSample, VertexSample};
    use crate::pixels::PAD_DEFINED;
    use crate::settings::{PositionMode, WrapMode};
    use glam::Vec3;

    fn wave(vertex_count: usize, frame_count: usize) -> FrameSequence {
        (0..frame_count)
            .map(|f| {
                let t = f as f32 * 0.25;
                FrameSample::new(
                    (0..vertex_count)
                        .map(|v| {
                            let x = v as f32 * 0.1;
                            VertexSample::new(
                                Vec3::new(x, (x + t).sin(), 0.0),
                                Vec3::new(0.0, 0.0, 1.0),
                            )
                        })
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_bake_defaults_flip_rows() {
        let frames = wave(6, 3);
        let flipped = bake(&frames, &BakeSettings::default()).unwrap();
        let unflipped = bake(
            &frames,
            &BakeSettings {
                flip_y: false,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!((flipped.width(), flipped.height()), (6, 3));
        assert_eq!(flipped.offsets.row(0), unflipped.offsets.row(2));
        assert_eq!(flipped.normals.row(2), unflipped.normals.row(0));
        assert!(flipped.offset_range.is_none());
    }

    #[test]
    fn test_bake_normalized_wrap_crop() {
        let settings = BakeSettings {
            position_mode: PositionMode::Absolutes,
            wrap_mode: WrapMode::WrapCrop,
            flip_y: true,
            normalize: true,
        };
        let baked = bake(&wave(37, 5), &settings).unwrap();

        assert_eq!(baked.width(), baked.resolution.width);
        assert_eq!(baked.height(), baked.resolution.texture_height());
        assert_eq!(baked.offsets.len(), baked.resolution.texture_pixel_count());
        assert!(baked.offsets.as_floats().iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(baked.offset_range.is_some());
        assert_eq!(baked.export_uvs(true).len(), 37);
    }

    #[test]
    fn test_bake_static_mesh_offsets_normalize_against_alpha() {
        // Zero displacement everywhere still normalizes: alpha gives max = 1
        let frames: FrameSequence = (0..2)
            .map(|_| FrameSample::new(vec![VertexSample::new(Vec3::ONE, Vec3::Z); 4]))
            .collect();
        let baked = bake(
            &frames,
            &BakeSettings {
                normalize: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(
            baked.offset_range,
            Some(OffsetRange { min: 0.0, max: 1.0 })
        );
    }

    #[test]
    fn test_bake_normalize_leaves_padding_untouched() {
        // 5 x 2 -> 4x4 wrap_crop, segment 1 is one pixel wide
        let frames: FrameSequence = (0..2)
            .map(|_| {
                FrameSample::new(
                    (0..5)
                        .map(|v| VertexSample::new(Vec3::new(v as f32 + 2.0, -2.0, 2.0), Vec3::Z))
                        .collect(),
                )
            })
            .collect();
        let settings = BakeSettings {
            position_mode: PositionMode::Absolutes,
            wrap_mode: WrapMode::WrapCrop,
            flip_y: false,
            normalize: true,
        };
        let baked = bake(&frames, &settings).unwrap();

        // Samples span [1, 6] (alpha included); padding zeros stay out
        assert_eq!(
            baked.offset_range,
            Some(OffsetRange { min: 1.0, max: 6.0 })
        );
        for y in 2..4 {
            for x in 1..4 {
                assert_eq!(baked.offsets.get(x, y).unwrap(), PAD_DEFINED);
            }
        }
        assert_eq!(baked.offsets.get(0, 0).unwrap(), [0.2, 0.2, 0.2, 0.0]);
        assert_eq!(baked.offsets.get(0, 2).unwrap(), [1.0, 0.2, 0.2, 0.0]);

        let flipped = bake(&frames, &BakeSettings { flip_y: true, ..settings }).unwrap();
        assert_eq!(flipped.offset_range, baked.offset_range);
        assert_eq!(flipped.offsets.get(3, 0).unwrap(), PAD_DEFINED);
        assert_eq!(flipped.offsets.row(3), baked.offsets.row(0));
    }

    #[test]
    fn test_bake_propagates_overflow() {
        let settings = BakeSettings {
            wrap_mode: WrapMode::Wrap,
            ..Default::default()
        };
        assert!(matches!(
            bake(&wave(10, 10), &settings),
            Err(VatError::LayoutOverflow { .. })
        ));
    }

    #[test]
    fn test_bake_is_deterministic() {
        let settings = BakeSettings {
            wrap_mode: WrapMode::WrapCrop,
            normalize: true,
            ..Default::default()
        };
        let a = bake(&wave(50, 7), &settings).unwrap();
        let b = bake(&wave(50, 7), &settings).unwrap();
        assert_eq!(a.offsets.as_floats(), b.offsets.as_floats());
        assert_eq!(a.normals.as_floats(), b.normals.as_floats());
        assert_eq!(a.offset_range, b.offset_range);
    }
}
