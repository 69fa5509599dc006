//! Shadow Configuration
//!
//! Global and per-light shadow settings with serde support for hot-reload.
//!
//! The render path treats a valid configuration as a caller contract
//! (cascade count in 1..=4, power-of-two atlas) and does not re-check it;
//! [`ShadowSettings::validate`] clamps deserialized values for callers
//! that want the hygiene.

use serde::{Deserialize, Serialize};

use super::cascade::MAX_CASCADES;

/// Shadow atlas resolution (square, power of two)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtlasSize {
    Size256 = 256,
    Size512 = 512,
    Size1024 = 1024,
    Size2048 = 2048,
    Size4096 = 4096,
    Size8192 = 8192,
}

impl AtlasSize {
    /// Edge length in pixels
    pub fn pixels(self) -> u32 {
        self as u32
    }
}

/// PCF filter quality for directional shadows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    Pcf2x2,
    Pcf3x3,
    Pcf5x5,
    Pcf7x7,
}

impl FilterMode {
    /// Filter footprint in cascade texels
    ///
    /// Wider kernels reach further, so the cascade sphere must shrink by
    /// this many texels to keep every tap inside the tile.
    pub fn footprint_texels(self) -> f32 {
        self as u32 as f32 + 1.0
    }

    /// Index into the filter keyword group; -1 selects the default 2x2
    /// variant, which needs no keyword
    pub fn keyword_index(self) -> i32 {
        self as i32 - 1
    }
}

/// How shading blends between neighbouring cascades
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CascadeBlendMode {
    Hard,
    Soft,
    Dither,
}

impl CascadeBlendMode {
    /// Index into the blend keyword group; -1 selects hard blending,
    /// which needs no keyword
    pub fn keyword_index(self) -> i32 {
        self as i32 - 1
    }
}

/// Directional shadow settings block
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalSettings {
    /// Atlas texture resolution
    pub atlas_size: AtlasSize,

    /// PCF filter quality
    pub filter: FilterMode,

    /// Number of cascades (1-4)
    pub cascade_count: u32,

    /// Split ratios for the inner cascade boundaries (0..1, increasing)
    pub cascade_ratios: [f32; 3],

    /// Width of the cross-cascade fade band (0..1)
    pub cascade_fade: f32,

    /// Cascade blend mode
    pub cascade_blend: CascadeBlendMode,
}

impl Default for DirectionalSettings {
    fn default() -> Self {
        Self {
            atlas_size: AtlasSize::Size1024,
            filter: FilterMode::Pcf2x2,
            cascade_count: 4,
            cascade_ratios: [0.1, 0.25, 0.5],
            cascade_fade: 0.1,
            cascade_blend: CascadeBlendMode::Hard,
        }
    }
}

/// Global shadow settings, immutable for the duration of a frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Maximum view-space depth at which shadows render
    pub max_distance: f32,

    /// Fade band approaching `max_distance` (0..1)
    pub distance_fade: f32,

    /// Directional light settings
    pub directional: DirectionalSettings,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            distance_fade: 0.1,
            directional: DirectionalSettings::default(),
        }
    }
}

impl ShadowSettings {
    /// Clamp values into their valid ranges
    pub fn validate(&mut self) {
        self.max_distance = self.max_distance.max(0.001);
        self.distance_fade = self.distance_fade.clamp(0.001, 1.0);

        let directional = &mut self.directional;
        directional.cascade_count = directional.cascade_count.clamp(1, MAX_CASCADES as u32);
        for ratio in &mut directional.cascade_ratios {
            *ratio = ratio.clamp(0.0, 1.0);
        }
        directional.cascade_fade = directional.cascade_fade.clamp(0.001, 1.0);
    }
}

/// Shadow casting mode of a light
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowMode {
    #[default]
    None,
    Hard,
    Soft,
}

/// Per-light shadow settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightShadowSettings {
    /// Shadow casting mode
    pub mode: ShadowMode,

    /// Shadow strength (0 = no shadow, 1 = full shadow)
    pub strength: f32,

    /// Slope-scaled depth bias applied while rendering casters
    pub slope_bias: f32,

    /// Normal-based offset to prevent peter-panning
    pub normal_bias: f32,

    /// Near plane offset for the shadow camera
    pub near_plane_offset: f32,
}

impl Default for LightShadowSettings {
    fn default() -> Self {
        Self {
            mode: ShadowMode::None,
            strength: 1.0,
            slope_bias: 1.5,
            normal_bias: 0.01,
            near_plane_offset: 0.1,
        }
    }
}

impl LightShadowSettings {
    /// Settings for a shadow-casting directional light
    pub fn directional() -> Self {
        Self {
            mode: ShadowMode::Soft,
            ..Default::default()
        }
    }

    /// Set shadow strength
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength.clamp(0.0, 1.0);
        self
    }

    /// Set shadow mode
    pub fn with_mode(mut self, mode: ShadowMode) -> Self {
        self.mode = mode;
        self
    }
}
