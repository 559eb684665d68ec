//! Texture size policy
//!
//! Most engines cap texture dimensions at 8192. The core never clamps, so the
//! tool checks the bake dimensions up front.

use anyhow::{bail, Result};
use vat_common::WrapMode;

/// Soft cap on the vertex count of an unwrapped bake
pub const MAX_VERTEX_COUNT: u32 = 8192;

/// Hard cap on the number of baked frames
pub const MAX_FRAME_COUNT: u32 = 8192;

/// Check bake dimensions against the caps.
///
/// Returns warnings for soft-cap violations; fails on hard-cap violations.
pub fn check_limits(
    vertex_count: u32,
    frame_count: u32,
    wrap_mode: WrapMode,
) -> Result<Vec<String>> {
    if frame_count > MAX_FRAME_COUNT {
        bail!(
            "Frame count of {} exceeds limit of {}, consider using a larger frame step",
            frame_count,
            MAX_FRAME_COUNT
        );
    }

    let mut warnings = Vec::new();
    if vertex_count > MAX_VERTEX_COUNT && !wrap_mode.is_wrapped() {
        warnings.push(format!(
            "Vertex count of {} exceeds limit of {}, consider using a wrap mode",
            vertex_count, MAX_VERTEX_COUNT
        ));
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_limits() {
        assert!(check_limits(8192, 8192, WrapMode::None).unwrap().is_empty());
    }

    #[test]
    fn test_vertex_count_warns_without_wrap() {
        let warnings = check_limits(10_000, 30, WrapMode::None).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("10000"));
        assert!(check_limits(10_000, 30, WrapMode::Wrap).unwrap().is_empty());
    }

    #[test]
    fn test_frame_count_is_fatal() {
        assert!(check_limits(10, 8193, WrapMode::WrapCrop).is_err());
    }
}
