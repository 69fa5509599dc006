//! Published Shadow Parameters
//!
//! The GPU-ready parameter block the shadow pass publishes for shading
//! code. bytemuck Pod for direct upload.

use serde::{Deserialize, Serialize};

use super::cascade::{MAX_CASCADES, MAX_SHADOW_TILES};

/// Filter keyword variants beyond the default 2x2 (3x3, 5x5, 7x7)
pub const FILTER_KEYWORD_COUNT: usize = 3;

/// Blend keyword variants beyond hard blending (soft, dither)
pub const BLEND_KEYWORD_COUNT: usize = 2;

/// Aggregated directional shadow parameters for one frame
#[repr(C)]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalShadowData {
    /// World-to-tile-UV matrices, indexed `slot * cascade_count + cascade`
    pub tile_matrices: [[[f32; 4]; 4]; MAX_SHADOW_TILES],

    /// Culling spheres: xyz = center, w = shrunk radius squared
    pub culling_spheres: [[f32; 4]; MAX_CASCADES],

    /// Fade data: x = 1/radius², y = blend footprint (filter size · √2)
    pub cascade_data: [[f32; 4]; MAX_CASCADES],

    /// x = 1/max_distance, y = 1/distance_fade,
    /// z = 1/(1 - (1 - cascade_fade)²)
    pub distance_fade: [f32; 4],

    /// x = atlas size in pixels, y = 1/size
    pub atlas_size: [f32; 4],

    /// Active cascade count (0 when no light casts shadows)
    pub cascade_count: u32,

    /// Index into the filter keyword group, -1 = default 2x2 filtering
    pub filter_keyword: i32,

    /// Index into the blend keyword group, -1 = hard cascade blending
    pub blend_keyword: i32,

    /// Padding to a 16-byte boundary
    pub _pad: u32,
}

impl Default for DirectionalShadowData {
    fn default() -> Self {
        Self {
            tile_matrices: [[[0.0; 4]; 4]; MAX_SHADOW_TILES],
            culling_spheres: [[0.0; 4]; MAX_CASCADES],
            cascade_data: [[0.0; 4]; MAX_CASCADES],
            distance_fade: [0.0; 4],
            atlas_size: [0.0; 4],
            cascade_count: 0,
            filter_keyword: -1,
            blend_keyword: -1,
            _pad: 0,
        }
    }
}

impl DirectionalShadowData {
    /// Raw bytes for GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// One-hot filter keyword flags (PCF3x3, PCF5x5, PCF7x7)
    pub fn filter_flags(&self) -> [bool; FILTER_KEYWORD_COUNT] {
        one_hot(self.filter_keyword)
    }

    /// One-hot cascade blend keyword flags (soft, dither)
    pub fn blend_flags(&self) -> [bool; BLEND_KEYWORD_COUNT] {
        one_hot(self.blend_keyword)
    }
}

/// Expand a selector index into exclusive keyword flags
///
/// Index -1 (the default variant) enables nothing.
fn one_hot<const N: usize>(enabled: i32) -> [bool; N] {
    let mut flags = [false; N];
    if enabled >= 0 && (enabled as usize) < N {
        flags[enabled as usize] = true;
    }
    flags
}
