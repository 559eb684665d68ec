//! Buffer finishing
//!
//! Optional passes applied to laid-out buffers right before they are handed
//! to image storage, always in this order:
//! 1. normalize the offsets buffer into [0, 1]
//! 2. flip both buffers vertically

use std::ops::Range;

use crate::error::{Result, VatError};
use crate::pixels::PixelBuffer;
use crate::resolution::Resolution;

/// Value range of the offsets buffer before normalization.
///
/// Shaders need it to map normalized texels back to displacements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRange {
    pub min: f32,
    pub max: f32,
}

impl OffsetRange {
    /// Map a normalized value back to its original scale
    #[inline]
    pub fn denormalize(&self, value: f32) -> f32 {
        value * (self.max - self.min) + self.min
    }

    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Apply the finishing passes to a laid-out pair of buffers
///
/// `resolution` is the plan the buffers were laid out with. Returns the offset
/// range when `normalize` is set.
pub fn finish(
    mut offsets: PixelBuffer,
    mut normals: PixelBuffer,
    resolution: &Resolution,
    normalize: bool,
    flip_y: bool,
) -> Result<(PixelBuffer, PixelBuffer, Option<OffsetRange>)> {
    let range = if normalize {
        Some(normalize_offsets(&mut offsets, resolution)?)
    } else {
        None
    };

    if flip_y {
        flip_rows(&mut offsets);
        flip_rows(&mut normals);
    }

    Ok((offsets, normals, range))
}

/// Rescale every sample scalar of an unflipped `offsets` buffer into [0, 1].
///
/// Only texels holding samples take part; ragged-edge and trailing padding
/// keep their fill values. The min/max scan covers all four channels of each
/// sample, alpha included, so the stored alpha of 1.0 usually ends up as the
/// maximum. Existing shaders depend on this range, so it is kept as is.
pub fn normalize_offsets(
    offsets: &mut PixelBuffer,
    resolution: &Resolution,
) -> Result<OffsetRange> {
    if (offsets.width(), offsets.height())
        != (resolution.texture_width(), resolution.texture_height())
    {
        return Err(VatError::invalid_input(format!(
            "offsets buffer is {}x{}, layout is {}x{}",
            offsets.width(),
            offsets.height(),
            resolution.texture_width(),
            resolution.texture_height()
        )));
    }

    let spans = sample_spans(resolution);
    let floats = offsets.as_floats();
    let Some(range) = scalar_range(spans.iter().flat_map(|span| &floats[span.clone()])) else {
        return Err(VatError::invalid_input("cannot normalize an empty buffer"));
    };
    if range.max == range.min {
        return Err(VatError::DegenerateRange { value: range.min });
    }

    let floats = offsets.as_floats_mut();
    for span in spans {
        for value in &mut floats[span] {
            *value = range.normalize(*value);
        }
    }
    Ok(range)
}

/// Scalar index ranges of the sample texels, one per (segment, frame row)
fn sample_spans(resolution: &Resolution) -> Vec<Range<usize>> {
    let frame_count = resolution.frame_count as usize;
    let row_width = resolution.width as usize;

    (0..resolution.num_wraps)
        .flat_map(|segment| {
            let segment_width = resolution.segment_width(segment) as usize;
            (0..frame_count).map(move |row| {
                let start = (segment as usize * frame_count + row) * row_width * 4;
                start..start + segment_width * 4
            })
        })
        .collect()
}

fn scalar_range<'a>(values: impl IntoIterator<Item = &'a f32>) -> Option<OffsetRange> {
    let mut values = values.into_iter().copied();
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(OffsetRange { min, max })
}

/// Reverse the row order of `buffer` in place
pub fn flip_rows(buffer: &mut PixelBuffer) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    if width == 0 {
        return;
    }

    let pixels = buffer.pixels_mut();
    for y in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - y) * width);
        top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
    }
}
