//! Shadow Budget
//!
//! Tracks which directional lights get a slice of the shadow atlas this
//! frame. Capacity is fixed: at most four lights cast shadows, everything
//! past that renders unshadowed. Rejections are expected steady-state
//! behavior, not errors.

use serde::{Deserialize, Serialize};

use super::config::{LightShadowSettings, ShadowMode};
use crate::culling::CascadeCulling;

/// Maximum directional lights with shadows per frame
pub const MAX_SHADOWED_DIRECTIONAL_LIGHTS: usize = 4;

/// A light that secured a slice of this frame's atlas
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ShadowedLight {
    /// Index the lighting pass assigned to this visible light
    pub visible_light_index: u32,

    /// Slope-scaled depth bias while rendering its casters
    pub slope_bias: f32,

    /// Near plane offset for its shadow camera
    pub near_plane_offset: f32,
}

/// Per-light shadow parameters handed to shading code
///
/// The no-shadow sentinel is all zeroes: shading scales attenuation by
/// strength, so an unreserved light simply receives none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowStrengthData {
    /// Shadow strength (0..1, 0 = unshadowed)
    pub strength: f32,

    /// First tile of the light's cascade range in the atlas
    pub tile_offset: u32,

    /// Normal bias for sampling
    pub normal_bias: f32,
}

impl ShadowStrengthData {
    /// Sentinel for lights that render without shadows
    pub const NO_SHADOW: Self = Self {
        strength: 0.0,
        tile_offset: 0,
        normal_bias: 0.0,
    };

    /// Pack for per-light GPU data
    pub fn packed(&self) -> [f32; 4] {
        [self.strength, self.tile_offset as f32, self.normal_bias, 0.0]
    }
}

/// Fixed-capacity registry of shadow-casting directional lights
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShadowBudget {
    lights: [ShadowedLight; MAX_SHADOWED_DIRECTIONAL_LIGHTS],
    count: u32,
}

impl ShadowBudget {
    /// Create an empty budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all reservations (once per frame, before any reserve call)
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Number of lights reserved so far
    pub fn reserved_count(&self) -> u32 {
        self.count
    }

    /// Reserved lights in reservation order
    pub fn lights(&self) -> &[ShadowedLight] {
        &self.lights[..self.count as usize]
    }

    /// Try to reserve atlas space for a directional light
    ///
    /// Must be called once per visible directional light, in the traversal
    /// order the lighting pass uses to assign light indices: the returned
    /// tile offset is embedded in that light's shader data and has to line
    /// up with its color/direction entry.
    ///
    /// Fails closed with [`ShadowStrengthData::NO_SHADOW`] when the budget
    /// is full, the light does not cast shadows, its strength is zero, or
    /// no visible caster falls inside shadow range.
    pub fn reserve(
        &mut self,
        light: &LightShadowSettings,
        visible_light_index: u32,
        cascade_count: u32,
        culling: &impl CascadeCulling,
    ) -> ShadowStrengthData {
        if self.count as usize >= MAX_SHADOWED_DIRECTIONAL_LIGHTS {
            return ShadowStrengthData::NO_SHADOW;
        }
        if light.mode == ShadowMode::None || light.strength <= 0.0 {
            return ShadowStrengthData::NO_SHADOW;
        }
        if !culling.shadow_caster_bounds(visible_light_index) {
            log::trace!(
                "light {} has no shadow casters in range",
                visible_light_index
            );
            return ShadowStrengthData::NO_SHADOW;
        }

        let slot = self.count;
        self.lights[slot as usize] = ShadowedLight {
            visible_light_index,
            slope_bias: light.slope_bias,
            near_plane_offset: light.near_plane_offset,
        };
        self.count += 1;

        ShadowStrengthData {
            strength: light.strength,
            tile_offset: cascade_count * slot,
            normal_bias: light.normal_bias,
        }
    }
}
