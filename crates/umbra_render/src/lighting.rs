//! Directional Light Buffer
//!
//! Collects visible directional lights into a GPU-ready array and
//! reserves shadow atlas space for each, in the traversal order that
//! assigns shader light indices. The tile offset a reservation returns is
//! stored next to the light's color and direction, so the per-light
//! arrays stay positionally correlated.

use serde::{Deserialize, Serialize};

use crate::culling::CascadeCulling;
use crate::shadow::{LightShadowSettings, ShadowRenderDriver};

/// Maximum directional lights in the uniform buffer
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// A visible directional light, as extracted from the scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Normalized direction toward the scene, world space
    pub direction: [f32; 3],

    /// Linear color with intensity applied
    pub color: [f32; 3],

    /// Shadow settings for this light
    pub shadow: LightShadowSettings,
}

/// GPU-ready directional light entry
///
/// Matches shader struct layout with proper alignment.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuDirectionalLight {
    /// Light direction (normalized, world space)
    pub direction: [f32; 3],

    /// Padding for alignment
    pub _pad0: f32,

    /// Light color (linear RGB, intensity applied)
    pub color: [f32; 3],

    /// Padding for alignment
    pub _pad1: f32,

    /// x = shadow strength, y = first atlas tile, z = normal bias
    pub shadow_data: [f32; 4],
}

/// Uniform-buffer view of the frame's directional lights
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DirectionalLightBuffer {
    lights: [GpuDirectionalLight; MAX_DIRECTIONAL_LIGHTS],
    count: u32,
}

impl DirectionalLightBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active light count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// GPU entries for active lights
    pub fn lights(&self) -> &[GpuDirectionalLight] {
        &self.lights[..self.count as usize]
    }

    /// Raw bytes of the full fixed-capacity array for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }

    /// Gather visible directional lights and reserve their shadows
    ///
    /// Lights beyond the capacity are ignored. Runs between the driver's
    /// `setup` and `render`, and owns the index order both the light
    /// arrays and the shadow tiles are addressed by.
    pub fn collect(
        &mut self,
        visible: &[DirectionalLight],
        driver: &mut ShadowRenderDriver,
        culling: &impl CascadeCulling,
    ) {
        self.count = 0;

        for light in visible {
            if self.count as usize >= MAX_DIRECTIONAL_LIGHTS {
                log::trace!("directional light limit reached, ignoring the rest");
                break;
            }

            let index = self.count;
            let shadow = driver.reserve_directional(&light.shadow, index, culling);
            self.lights[index as usize] = GpuDirectionalLight {
                direction: light.direction,
                _pad0: 0.0,
                color: light.color,
                _pad1: 0.0,
                shadow_data: shadow.packed(),
            };
            self.count += 1;
        }

        for stale in &mut self.lights[self.count as usize..] {
            *stale = GpuDirectionalLight::default();
        }
    }
}
