//! Sample layout
//!
//! Turns a [`FrameSequence`] into the offsets and normals pixel buffers.
//!
//! Samples are first emitted in a flat, frame-major order: the *last* frame
//! fills the first row, vertices run left to right. Each emitted row is then
//! cut into `num_wraps` segments of `width` pixels and the segments are stacked
//! vertically, segment-major and row-minor:
//!
//! ```text
//! emitted (vertex_count wide)        tiled (width wide)
//! [ f2: A A A A B B ]                [ f2: A A A A ]
//! [ f1: A A A A B B ]     ==>        [ f1: A A A A ]
//! [ f0: A A A A B B ]                [ f0: A A A A ]
//!                                    [ f2: B B . . ]
//!                                    [ f1: B B . . ]
//!                                    [ f0: B B . . ]
//! ```
//!
//! `.` is ragged-edge fill ([`PAD_DEFINED`]). Rows below the last segment are
//! filled with [`PAD_DEFINED`] for `Wrap` and [`PAD_EMPTY`] otherwise.

use glam::Vec3;
use rayon::prelude::*;

use crate::error::{Result, VatError};
use crate::frames::FrameSequence;
use crate::pixels::{PAD_DEFINED, PAD_EMPTY, PixelBuffer, Rgba};
use crate::resolution::Resolution;
use crate::settings::{PositionMode, WrapMode};

/// Encode a vertex displacement (Y is negated)
#[inline]
pub fn encode_offset(offset: Vec3) -> Rgba {
    [offset.x, -offset.y, offset.z, 1.0]
}

/// Encode a unit normal, remapped from [-1, 1] to [0, 1] (Y is negated)
#[inline]
pub fn encode_normal(normal: Vec3) -> Rgba {
    [
        (normal.x + 1.0) * 0.5,
        (-normal.y + 1.0) * 0.5,
        (normal.z + 1.0) * 0.5,
        1.0,
    ]
}

/// Lay out every sample of `frames` into finished-size offsets and normals buffers
///
/// `resolution` must come from [`plan`](crate::plan) for the same vertex and
/// frame counts.
pub fn layout(
    frames: &FrameSequence,
    resolution: &Resolution,
    position_mode: PositionMode,
) -> Result<(PixelBuffer, PixelBuffer)> {
    let (vertex_count, frame_count) = frames.validate()?;
    if resolution.vertex_count != vertex_count || resolution.frame_count != frame_count {
        return Err(VatError::invalid_input(format!(
            "resolution planned for {} vertices x {} frames, got {} x {}",
            resolution.vertex_count, resolution.frame_count, vertex_count, frame_count
        )));
    }
    check_capacity(resolution)?;

    let (offsets, normals) = emit_samples(frames, position_mode)?;

    Ok((
        tile_samples(&offsets, resolution)?,
        tile_samples(&normals, resolution)?,
    ))
}

/// Emit one offset and one normal per (frame, vertex), last frame first.
///
/// The returned arrays are `vertex_count * frame_count` long, one row of
/// `vertex_count` pixels per frame.
pub fn emit_samples(
    frames: &FrameSequence,
    position_mode: PositionMode,
) -> Result<(Vec<Rgba>, Vec<Rgba>)> {
    let (vertex_count, frame_count) = frames.validate()?;
    let vertex_count = vertex_count as usize;
    let sample_count = vertex_count * frame_count as usize;
    let mut offsets = vec![PAD_EMPTY; sample_count];
    let mut normals = vec![PAD_EMPTY; sample_count];

    let Some(reference) = frames.reference() else {
        return Err(VatError::invalid_input("frame sequence is empty"));
    };

    // Each frame owns one disjoint row of both outputs
    offsets
        .par_chunks_mut(vertex_count)
        .zip(normals.par_chunks_mut(vertex_count))
        .zip(frames.frames().par_iter().rev())
        .for_each(|((offset_row, normal_row), frame)| {
            let rows = offset_row.iter_mut().zip(normal_row.iter_mut());
            let samples = frame.vertices.iter().zip(&reference.vertices);
            for ((offset, normal), (vertex, rest)) in rows.zip(samples) {
                let displacement = match position_mode {
                    PositionMode::Offsets => vertex.position - rest.position,
                    PositionMode::Absolutes => vertex.position,
                };
                *offset = encode_offset(displacement);
                *normal = encode_normal(vertex.normal);
            }
        });

    Ok((offsets, normals))
}

/// Cut emitted rows into wrap segments and stack them into a finished buffer.
///
/// `samples` is the output of [`emit_samples`]. Segment `i`, row `j` lands on
/// texture row `i * frame_count + j`. Without wrapping there is a single
/// segment as wide as the texture, so the samples are copied through.
pub fn tile_samples(samples: &[Rgba], resolution: &Resolution) -> Result<PixelBuffer> {
    let vertex_count = resolution.vertex_count as usize;
    let frame_count = resolution.frame_count as usize;
    if samples.len() != vertex_count * frame_count {
        return Err(VatError::invalid_input(format!(
            "expected {} samples, got {}",
            vertex_count * frame_count,
            samples.len()
        )));
    }
    check_capacity(resolution)?;

    let trailing = match resolution.wrap_mode {
        WrapMode::Wrap => PAD_DEFINED,
        WrapMode::None | WrapMode::WrapCrop => PAD_EMPTY,
    };
    let mut buffer = PixelBuffer::filled(
        resolution.texture_width(),
        resolution.texture_height(),
        trailing,
    );

    let row_width = resolution.width as usize;
    let dest = buffer.pixels_mut();
    for segment in 0..resolution.num_wraps {
        let segment_width = resolution.segment_width(segment) as usize;
        let source_column = segment as usize * row_width;

        for row in 0..frame_count {
            let src = row * vertex_count + source_column;
            let dst = (segment as usize * frame_count + row) * row_width;

            dest[dst..dst + segment_width].copy_from_slice(&samples[src..src + segment_width]);
            dest[dst + segment_width..dst + row_width].fill(PAD_DEFINED);
        }
    }

    Ok(buffer)
}

/// Fail if the wrap segments need more rows than the texture has
fn check_capacity(resolution: &Resolution) -> Result<()> {
    let required_rows = resolution.data_rows();
    let available_rows = resolution.texture_height();
    if required_rows > available_rows as u64 {
        return Err(VatError::LayoutOverflow {
            required_rows,
            available_rows,
        });
    }
    Ok(())
}
