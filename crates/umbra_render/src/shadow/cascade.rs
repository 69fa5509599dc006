//! Cascade Projection
//!
//! Per-cascade work for each reserved light: asks the culling service for
//! a view/projection pair and culling sphere, records fade parameters,
//! folds the clip matrix into its atlas tile, and issues the depth-only
//! draw for that tile.

use serde::{Deserialize, Serialize};

use super::budget::{ShadowedLight, MAX_SHADOWED_DIRECTIONAL_LIGHTS};
use super::config::{DirectionalSettings, FilterMode};
use super::layout::AtlasLayout;
use super::matrix::{multiply, to_atlas_space};
use crate::culling::{CascadeCulling, CullingSphere};
use crate::encoder::{ShadowCasterQueue, ShadowCommandEncoder};

/// Maximum cascades per directional light
pub const MAX_CASCADES: usize = 4;

/// Shadow tiles in a fully loaded atlas
pub const MAX_SHADOW_TILES: usize = MAX_SHADOWED_DIRECTIONAL_LIGHTS * MAX_CASCADES;

/// Floor for the squared cascade radius before taking its reciprocal
const MIN_RADIUS_SQ: f32 = 1e-6;

/// Per-frame cascade state shared by every reserved light
///
/// Culling spheres are defined relative to the camera frustum, not the
/// light, so they are recorded while processing the first reserved light
/// and reused for the rest.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CascadeProjector {
    /// World-space culling spheres: xyz center, w radius stored squared
    /// after shrinking
    culling_spheres: [[f32; 4]; MAX_CASCADES],

    /// Per-cascade fade data: x = 1/radius², y = blend footprint
    cascade_data: [[f32; 4]; MAX_CASCADES],

    /// World-to-tile-UV matrices, indexed `slot * cascade_count + cascade`
    tile_matrices: [[[f32; 4]; 4]; MAX_SHADOW_TILES],
}

impl Default for CascadeProjector {
    fn default() -> Self {
        Self {
            culling_spheres: [[0.0; 4]; MAX_CASCADES],
            cascade_data: [[0.0; 4]; MAX_CASCADES],
            tile_matrices: [[[0.0; 4]; 4]; MAX_SHADOW_TILES],
        }
    }
}

impl CascadeProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Culling spheres (xyz center, w radius²) for active cascades
    pub fn culling_spheres(&self) -> &[[f32; 4]; MAX_CASCADES] {
        &self.culling_spheres
    }

    /// Fade data for active cascades
    pub fn cascade_data(&self) -> &[[f32; 4]; MAX_CASCADES] {
        &self.cascade_data
    }

    /// Atlas sampling matrices
    pub fn tile_matrices(&self) -> &[[[f32; 4]; 4]; MAX_SHADOW_TILES] {
        &self.tile_matrices
    }

    /// Render every cascade of one reserved light into its atlas tiles
    ///
    /// `slot` is the light's reservation index; its tiles start at
    /// `slot * cascade_count`.
    #[allow(clippy::too_many_arguments)]
    pub fn project_light(
        &mut self,
        slot: u32,
        light: &ShadowedLight,
        layout: &AtlasLayout,
        directional: &DirectionalSettings,
        culling: &impl CascadeCulling,
        encoder: &mut impl ShadowCommandEncoder,
        casters: &mut impl ShadowCasterQueue,
    ) {
        let cascade_count = directional.cascade_count;
        // The wider the fade band, the less margin culling needs to keep
        // casters alive across the boundary.
        let culling_factor = (0.8 - directional.cascade_fade).max(0.0);

        for cascade in 0..cascade_count {
            let mut geometry = culling.compute_cascade_geometry(
                light.visible_light_index,
                cascade,
                cascade_count,
                directional.cascade_ratios,
                layout.tile_size(),
                light.near_plane_offset,
            );
            geometry.split.blend_culling_factor = culling_factor;

            // Spheres are camera-relative; the first light's pass covers
            // every light.
            if slot == 0 {
                self.record_cascade_fade(
                    cascade as usize,
                    &geometry.split.culling_sphere,
                    layout.tile_size(),
                    directional.filter,
                );
            }

            let tile_index = slot * cascade_count + cascade;
            let [col, row] = layout.tile_offset(tile_index);
            self.tile_matrices[tile_index as usize] = to_atlas_space(
                multiply(&geometry.projection, &geometry.view),
                [col as f32, row as f32],
                layout.columns(),
                encoder.depth_convention(),
            );

            encoder.set_viewport(layout.tile_viewport(tile_index));
            encoder.set_view_projection(&geometry.view, &geometry.projection);
            encoder.set_depth_bias(0.0, light.slope_bias);
            casters.submit_shadow_casters(light.visible_light_index, &geometry.split);
            encoder.set_depth_bias(0.0, 0.0);
        }
    }

    /// Record the shrunk culling sphere and fade datum for one cascade
    ///
    /// The sphere loses one filter footprint of radius so PCF taps stay
    /// inside the cascade instead of reading the neighbouring tile, and
    /// the radius is stored squared for cheap in-sphere tests.
    fn record_cascade_fade(
        &mut self,
        cascade: usize,
        sphere: &CullingSphere,
        tile_size: u32,
        filter: FilterMode,
    ) {
        let texel_size = 2.0 * sphere.radius / tile_size as f32;
        let filter_size = texel_size * filter.footprint_texels();
        let radius = sphere.radius - filter_size;
        let radius_sq = radius * radius;

        self.culling_spheres[cascade] = [
            sphere.center[0],
            sphere.center[1],
            sphere.center[2],
            radius_sq,
        ];
        self.cascade_data[cascade] = [
            1.0 / radius_sq.max(MIN_RADIUS_SQ),
            filter_size * core::f32::consts::SQRT_2,
            0.0,
            0.0,
        ];
    }
}
