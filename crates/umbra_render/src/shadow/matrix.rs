//! Atlas Matrix Conversion
//!
//! Folds a world-to-clip matrix into the world-to-UV matrix of one atlas
//! tile. Shaders then address the atlas as a single virtual shadow map,
//! with no per-pixel tile-offset computation at sample time.
//!
//! All matrices are column-major `[[f32; 4]; 4]`: `m[col][row]`.

use crate::resource::DepthConvention;

pub(crate) const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices (column-major)
pub(crate) fn multiply(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] =
                a[0][j] * b[i][0] + a[1][j] * b[i][1] + a[2][j] * b[i][2] + a[3][j] * b[i][3];
        }
    }

    result
}

/// Remap a world-to-clip matrix into one tile's [0,1] UV rectangle
///
/// Rows 0 and 1 fuse the NDC-to-UV half scale-and-bias with the tile's
/// grid offset, both premultiplied by the per-tile scale `1/columns`.
/// The depth row is halved without tiling; only X and Y live in the
/// atlas grid. Under a reversed depth range the depth row is negated
/// first so sampled values match the convention shading compares against.
///
/// Pure function: identical input yields bit-identical output.
pub fn to_atlas_space(
    clip: [[f32; 4]; 4],
    tile_offset: [f32; 2],
    columns: u32,
    convention: DepthConvention,
) -> [[f32; 4]; 4] {
    let mut m = clip;

    if convention == DepthConvention::Reversed {
        for col in m.iter_mut() {
            col[2] = -col[2];
        }
    }

    let scale = 1.0 / columns as f32;
    for col in m.iter_mut() {
        let w = col[3];
        col[0] = (0.5 * (col[0] + w) + tile_offset[0] * w) * scale;
        col[1] = (0.5 * (col[1] + w) + tile_offset[1] * w) * scale;
        col[2] = 0.5 * (col[2] + w);
    }

    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(m: &[[f32; 4]; 4], v: [f32; 4]) -> [f32; 4] {
        [
            m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
            m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
            m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
            m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
        ]
    }

    #[test]
    fn test_multiply_identity() {
        let result = multiply(&IDENTITY, &IDENTITY);
        assert_eq!(result, IDENTITY);
    }

    #[test]
    fn test_ndc_to_uv() {
        let m = to_atlas_space(IDENTITY, [0.0, 0.0], 1, DepthConvention::Standard);

        let min = transform(&m, [-1.0, -1.0, 0.0, 1.0]);
        let max = transform(&m, [1.0, 1.0, 1.0, 1.0]);

        assert_eq!([min[0], min[1], min[2]], [0.0, 0.0, 0.5]);
        assert_eq!([max[0], max[1], max[2]], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_tile_rectangle() {
        // Second column of a 2-wide grid covers u in [0.5, 1]
        let m = to_atlas_space(IDENTITY, [1.0, 0.0], 2, DepthConvention::Standard);

        let left = transform(&m, [-1.0, -1.0, 0.0, 1.0]);
        let right = transform(&m, [1.0, 1.0, 0.0, 1.0]);

        assert_eq!(left[0], 0.5);
        assert_eq!(right[0], 1.0);
        assert_eq!(left[1], 0.0);
        assert_eq!(right[1], 0.5);
    }

    #[test]
    fn test_depth_not_tiled() {
        let m = to_atlas_space(IDENTITY, [1.0, 1.0], 2, DepthConvention::Standard);

        let far = transform(&m, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(far[2], 1.0);
    }

    #[test]
    fn test_reversed_depth_flips() {
        let m = to_atlas_space(IDENTITY, [0.0, 0.0], 1, DepthConvention::Reversed);

        let near = transform(&m, [0.0, 0.0, 1.0, 1.0]);
        let far = transform(&m, [0.0, 0.0, -1.0, 1.0]);

        assert_eq!(near[2], 0.0);
        assert_eq!(far[2], 1.0);
    }

    #[test]
    fn test_conversion_deterministic() {
        let clip = [
            [1.25, 0.5, 0.0, 0.0],
            [0.0, -2.5, 0.25, 0.0],
            [0.75, 0.0, 1.5, 0.0],
            [3.0, -1.0, 0.5, 1.0],
        ];

        let first = to_atlas_space(clip, [1.0, 2.0], 4, DepthConvention::Reversed);
        let second = to_atlas_space(clip, [1.0, 2.0], 4, DepthConvention::Reversed);

        assert_eq!(first, second);
    }

    #[test]
    fn test_w_row_untouched() {
        let clip = [
            [1.0, 0.0, 0.0, 0.5],
            [0.0, 1.0, 0.0, 0.25],
            [0.0, 0.0, 1.0, -1.0],
            [0.0, 0.0, 0.0, 1.0],
        ];

        let m = to_atlas_space(clip, [1.0, 1.0], 2, DepthConvention::Standard);

        for col in 0..4 {
            assert_eq!(m[col][3], clip[col][3]);
        }
    }
}
