//! Resolution planning
//!
//! Picks the texture size for a bake. Without wrapping the texture is simply
//! `vertex_count x frame_count`. With wrapping, the sample count is fitted into
//! the smallest near-square power-of-two rectangle and each frame's vertex row
//! is split into `num_wraps` row-groups of `width` pixels.
//!
//! [`plan`] is the single source of truth for these numbers: the layout engine,
//! the export-mesh UVs and any size display all consume its [`Resolution`].

use crate::error::{Result, VatError};
use crate::settings::WrapMode;

/// Planned layout for one bake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Row width in pixels (power of two when wrapping)
    pub width: u32,
    /// Planned height (power of two when wrapping)
    pub height: u32,
    /// Row-groups per frame (1 when not wrapping)
    pub num_wraps: u32,
    pub vertex_count: u32,
    pub frame_count: u32,
    pub wrap_mode: WrapMode,
}

impl Resolution {
    /// Width of the finished texture
    #[inline]
    pub fn texture_width(&self) -> u32 {
        self.width
    }

    /// Height of the finished texture
    ///
    /// `WrapCrop` trims the planned power-of-two height down to the rows that
    /// actually hold segments.
    pub fn texture_height(&self) -> u32 {
        match self.wrap_mode {
            WrapMode::None | WrapMode::Wrap => self.height,
            WrapMode::WrapCrop => self.frame_count * self.num_wraps,
        }
    }

    /// Pixel count of the finished texture
    pub fn texture_pixel_count(&self) -> usize {
        self.texture_width() as usize * self.texture_height() as usize
    }

    /// Number of texture rows holding wrap segments
    pub fn data_rows(&self) -> u64 {
        self.frame_count as u64 * self.num_wraps as u64
    }

    /// Share of the planned height covered by wrap segments
    pub fn y_used(&self) -> f32 {
        self.data_rows() as f32 / self.height as f32
    }

    /// Pixel width of wrap segment `segment`; the final one may be ragged
    pub fn segment_width(&self, segment: u32) -> u32 {
        let start = segment as u64 * self.width as u64;
        (self.vertex_count as u64)
            .saturating_sub(start)
            .min(self.width as u64) as u32
    }
}

/// Plan the texture layout for `vertex_count` vertices over `frame_count` frames
pub fn plan(vertex_count: u32, frame_count: u32, wrap_mode: WrapMode) -> Result<Resolution> {
    if vertex_count == 0 {
        return Err(VatError::invalid_input("vertex count must be at least 1"));
    }
    if frame_count == 0 {
        return Err(VatError::invalid_input("frame count must be at least 1"));
    }

    if !wrap_mode.is_wrapped() {
        return Ok(Resolution {
            width: vertex_count,
            height: frame_count,
            num_wraps: 1,
            vertex_count,
            frame_count,
            wrap_mode,
        });
    }

    let (width, height) = power_of_two_extent(vertex_count as u64 * frame_count as u64);
    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(VatError::invalid_input(format!(
                "{} x {} samples do not fit a 32-bit texture size",
                vertex_count, frame_count
            )));
        }
    };

    let num_wraps = vertex_count.div_ceil(width);

    tracing::debug!(
        "Planned {:?} layout for {} vertices x {} frames: {}x{}, {} wraps",
        wrap_mode,
        vertex_count,
        frame_count,
        width,
        height,
        num_wraps
    );

    Ok(Resolution {
        width,
        height,
        num_wraps,
        vertex_count,
        frame_count,
        wrap_mode,
    })
}

/// Smallest near-square power-of-two rectangle holding `total` samples.
///
/// Starts both sides at the largest power of two not above `sqrt(total)`,
/// then doubles the shorter side (height on ties) until the area suffices.
fn power_of_two_extent(total: u64) -> (u64, u64) {
    let mut base = 1u64;
    while (base * 2).checked_mul(base * 2).is_some_and(|area| area <= total) {
        base *= 2;
    }

    let (mut width, mut height) = (base, base);
    while (width as u128) * (height as u128) < total as u128 {
        if width < height {
            width *= 2;
        } else {
            height *= 2;
        }
    }
    (width, height)
}
