//! # umbra_render - Directional Shadow Atlas Rendering
//!
//! Backend-agnostic shadow infrastructure for directional lights:
//!
//! - Fixed-budget reservation of shadow-casting lights (at most 4)
//! - Cascade packing into a single shared square atlas texture
//! - Atlas-space sampling matrices, honoring reversed depth ranges
//! - GPU-ready parameter blocks for shading code
//!
//! Scene culling, caster drawing, and GPU command recording stay behind
//! traits ([`CascadeCulling`], [`ShadowCasterQueue`],
//! [`ShadowCommandEncoder`]) so any backend can drive the pass and the
//! projection math can be exercised against synthetic fixtures.
//!
//! See the [`shadow`] module for the per-frame lifecycle.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod culling;
pub mod encoder;
pub mod lighting;
pub mod resource;
pub mod shadow;

// Re-exports
pub use culling::{CascadeCulling, CascadeGeometry, CullingSphere, ShadowSplitData};
pub use encoder::{ShadowCasterQueue, ShadowCommandEncoder};
pub use lighting::{
    DirectionalLight, DirectionalLightBuffer, GpuDirectionalLight, MAX_DIRECTIONAL_LIGHTS,
};
pub use resource::{AtlasRequest, DepthConvention, DepthFormat, ResourceId, Viewport};
pub use shadow::{
    AtlasLayout, AtlasSize, CascadeBlendMode, CascadeProjector, DirectionalSettings,
    DirectionalShadowData, FilterMode, LightShadowSettings, ShadowBudget, ShadowMode,
    ShadowRenderDriver, ShadowSettings, ShadowStrengthData, ShadowedLight,
    DIRECTIONAL_SHADOW_ATLAS, MAX_CASCADES, MAX_SHADOWED_DIRECTIONAL_LIGHTS, MAX_SHADOW_TILES,
};
