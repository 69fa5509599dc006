//! Shadow Render Driver
//!
//! Frame orchestration for the directional shadow atlas: reservation,
//! atlas acquisition, per-light cascade rendering, and the published
//! parameter block.

use super::budget::{ShadowBudget, ShadowStrengthData};
use super::cascade::CascadeProjector;
use super::config::{LightShadowSettings, ShadowSettings};
use super::data::DirectionalShadowData;
use super::layout::AtlasLayout;
use crate::culling::CascadeCulling;
use crate::encoder::{ShadowCasterQueue, ShadowCommandEncoder};
use crate::resource::{AtlasRequest, ResourceId};

/// Name the atlas texture is bound under
pub const DIRECTIONAL_SHADOW_ATLAS: ResourceId =
    ResourceId::from_name("directional_shadow_atlas");

/// Directional shadow pass orchestrator
///
/// Per-frame lifecycle: `setup` once, `reserve_directional` once per
/// visible directional light, `render` after the last reservation (atlas
/// dimensions depend on the final count), `cleanup` when the frame's
/// consumers are done with the atlas. No state survives into the next
/// frame beyond the fixed capacities.
#[derive(Clone, Debug, Default)]
pub struct ShadowRenderDriver {
    settings: ShadowSettings,
    budget: ShadowBudget,
    projector: CascadeProjector,
    data: DirectionalShadowData,
}

impl ShadowRenderDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a frame: reset the budget and adopt this frame's settings
    pub fn setup(&mut self, settings: &ShadowSettings) {
        self.settings = settings.clone();
        self.budget.reset();
    }

    /// Frame settings adopted at setup
    pub fn settings(&self) -> &ShadowSettings {
        &self.settings
    }

    /// Lights that secured atlas space so far
    pub fn reserved_count(&self) -> u32 {
        self.budget.reserved_count()
    }

    /// Published parameters for shading code
    pub fn data(&self) -> &DirectionalShadowData {
        &self.data
    }

    /// Reserve atlas space for a directional light
    ///
    /// See [`ShadowBudget::reserve`] for ordering requirements and the
    /// fail-closed sentinel.
    pub fn reserve_directional(
        &mut self,
        light: &LightShadowSettings,
        visible_light_index: u32,
        culling: &impl CascadeCulling,
    ) -> ShadowStrengthData {
        self.budget.reserve(
            light,
            visible_light_index,
            self.settings.directional.cascade_count,
            culling,
        )
    }

    /// Render the atlas and publish the frame's shadow parameters
    pub fn render(
        &mut self,
        culling: &impl CascadeCulling,
        encoder: &mut impl ShadowCommandEncoder,
        casters: &mut impl ShadowCasterQueue,
    ) {
        self.data = DirectionalShadowData::default();

        let reserved = self.budget.reserved_count();
        if reserved == 0 {
            // Keeps the texture slot bound on backends that reject
            // materials with unbound samplers.
            encoder.acquire_atlas(&AtlasRequest::placeholder(DIRECTIONAL_SHADOW_ATLAS));
            log::trace!("no shadowed lights, bound placeholder atlas");
            return;
        }

        let Self {
            settings,
            budget,
            projector,
            data,
        } = self;
        let directional = &settings.directional;

        let atlas_size = directional.atlas_size.pixels();
        let layout = AtlasLayout::new(reserved, directional.cascade_count, atlas_size);
        log::debug!(
            "shadow atlas {}px, {} tiles in {} columns",
            atlas_size,
            layout.tiles(),
            layout.columns()
        );

        encoder.acquire_atlas(&AtlasRequest::new(DIRECTIONAL_SHADOW_ATLAS, atlas_size));
        encoder.set_render_target(DIRECTIONAL_SHADOW_ATLAS);
        encoder.clear_depth();

        projector.clear();
        for (slot, light) in budget.lights().iter().enumerate() {
            projector.project_light(
                slot as u32,
                light,
                &layout,
                directional,
                culling,
                encoder,
                casters,
            );
        }

        data.tile_matrices = *projector.tile_matrices();
        data.culling_spheres = *projector.culling_spheres();
        data.cascade_data = *projector.cascade_data();
        data.cascade_count = directional.cascade_count;

        let fade = 1.0 - directional.cascade_fade;
        data.distance_fade = [
            1.0 / settings.max_distance,
            1.0 / settings.distance_fade,
            1.0 / (1.0 - fade * fade),
            0.0,
        ];
        data.atlas_size = [atlas_size as f32, 1.0 / atlas_size as f32, 0.0, 0.0];
        data.filter_keyword = directional.filter.keyword_index();
        data.blend_keyword = directional.cascade_blend.keyword_index();
    }

    /// Release the frame's atlas texture
    pub fn cleanup(&mut self, encoder: &mut impl ShadowCommandEncoder) {
        encoder.release_atlas(DIRECTIONAL_SHADOW_ATLAS);
    }
}
