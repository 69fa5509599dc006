//! Directional Shadow Atlas
//!
//! Shadow infrastructure for directional lights: a fixed budget of
//! shadow-casting lights, a shared square atlas packing up to 4 lights of
//! 4 cascades each, per-cascade projection and fade math, and the
//! published parameter block shading code consumes.
//!
//! # Architecture
//!
//! - **Config**: global and per-light shadow settings
//! - **Budget**: which lights cast shadows this frame
//! - **Layout**: tile grid packing inside the square atlas
//! - **Cascade**: per-(light, cascade) projection, fade data, tile draws
//! - **Matrix**: world-to-clip to world-to-tile-UV remapping
//! - **Data**: GPU-ready published parameters
//! - **Driver**: per-frame orchestration
//!
//! # Usage
//!
//! ```ignore
//! use umbra_render::shadow::*;
//!
//! let mut driver = ShadowRenderDriver::new();
//!
//! // Per frame, before the lighting pass assigns light indices:
//! driver.setup(&settings);
//!
//! // Once per visible directional light, in light-index order:
//! let shadow = driver.reserve_directional(&light.shadow, index, &culling);
//!
//! // After the last reservation (atlas size depends on the final count):
//! driver.render(&culling, &mut encoder, &mut casters);
//! let uniforms = driver.data().as_bytes();
//!
//! // Once the frame's consumers are done with the atlas:
//! driver.cleanup(&mut encoder);
//! ```

pub mod budget;
pub mod cascade;
pub mod config;
pub mod data;
pub mod driver;
pub mod layout;
pub mod matrix;

// Re-exports
pub use budget::{
    ShadowBudget, ShadowStrengthData, ShadowedLight, MAX_SHADOWED_DIRECTIONAL_LIGHTS,
};

pub use cascade::{CascadeProjector, MAX_CASCADES, MAX_SHADOW_TILES};

pub use config::{
    AtlasSize, CascadeBlendMode, DirectionalSettings, FilterMode, LightShadowSettings,
    ShadowMode, ShadowSettings,
};

pub use data::{DirectionalShadowData, BLEND_KEYWORD_COUNT, FILTER_KEYWORD_COUNT};

pub use driver::{ShadowRenderDriver, DIRECTIONAL_SHADOW_ATLAS};

pub use layout::AtlasLayout;

pub use matrix::to_atlas_space;
