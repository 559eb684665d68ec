//! Export-mesh UVs
//!
//! The exported mesh carries a second UV channel pointing each vertex at its
//! texel column and its first wrap segment row. A vertex shader adds the
//! frame offset along V at playback time.

use crate::resolution::Resolution;
use crate::settings::WrapMode;

/// UV of vertex `vertex_index` in a texture laid out per `resolution`
pub fn vertex_uv(vertex_index: u32, resolution: &Resolution, flip_y: bool) -> [f32; 2] {
    match resolution.wrap_mode {
        // Flip is not applied to a single-row layout
        WrapMode::None => [
            (vertex_index as f32 + 0.5) / resolution.vertex_count as f32,
            0.0,
        ],
        WrapMode::Wrap | WrapMode::WrapCrop => {
            let width = resolution.width;
            let num_wraps = resolution.num_wraps as f32;
            let u = ((vertex_index % width) as f32 + 0.5) / width as f32;
            let segment = (vertex_index / width) as f32;

            let mut v = if resolution.wrap_mode == WrapMode::WrapCrop {
                segment / num_wraps
            } else {
                segment / resolution.height as f32 * resolution.frame_count as f32
            };
            if flip_y {
                v = 1.0 - v - 1.0 / num_wraps;
            }
            [u, v]
        }
    }
}

/// UVs for every vertex of the reference mesh, by vertex index
pub fn export_uvs(resolution: &Resolution, flip_y: bool) -> Vec<[f32; 2]> {
    (0..resolution.vertex_count)
        .map(|i| vertex_uv(i, resolution, flip_y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::plan;

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn test_unwrapped_uvs_sample_pixel_centers() {
        let res = plan(4, 2, WrapMode::None).unwrap();
        let uvs = export_uvs(&res, true);
        assert_eq!(uvs.len(), 4);
        assert!(approx(uvs[0], [0.125, 0.0]));
        assert!(approx(uvs[3], [0.875, 0.0]));
    }

    #[test]
    fn test_wrap_crop_uvs() {
        // 5 x 2 -> width 4, 2 wraps
        let res = plan(5, 2, WrapMode::WrapCrop).unwrap();
        assert!(approx(vertex_uv(0, &res, false), [0.125, 0.0]));
        assert!(approx(vertex_uv(3, &res, false), [0.875, 0.0]));
        assert!(approx(vertex_uv(4, &res, false), [0.125, 0.5]));
    }

    #[test]
    fn test_wrap_uvs_scale_by_frame_rows() {
        // 100 x 4 -> 16x32, segment 2 starts at row 8 of 32
        let res = plan(100, 4, WrapMode::Wrap).unwrap();
        assert!(approx(vertex_uv(33, &res, false), [1.5 / 16.0, 0.25]));
    }

    #[test]
    fn test_flipped_uvs() {
        let res = plan(5, 2, WrapMode::WrapCrop).unwrap();
        assert!(approx(vertex_uv(0, &res, true), [0.125, 0.5]));
        assert!(approx(vertex_uv(4, &res, true), [0.125, 0.0]));
    }

    #[test]
    fn test_flipped_wrap_uvs_scale_by_frame_rows() {
        // 100 x 4 -> 16x32, 7 wraps
        let res = plan(100, 4, WrapMode::Wrap).unwrap();
        let step = 1.0 / 7.0;
        assert!(approx(vertex_uv(0, &res, true), [0.5 / 16.0, 1.0 - step]));
        assert!(approx(vertex_uv(33, &res, true), [1.5 / 16.0, 1.0 - 0.25 - step]));
        assert!(approx(vertex_uv(99, &res, true), [3.5 / 16.0, 1.0 - 0.75 - step]));
    }
}
