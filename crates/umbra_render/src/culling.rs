//! Shadow Culling Interface
//!
//! Contract between the shadow pass and the engine's visibility system.
//! The culling service owns scene knowledge: it decides whether a light
//! has any visible shadow casters and builds the view/projection pair and
//! culling sphere for each cascade. Keeping it behind a trait lets the
//! projection and atlas math run against synthetic fixtures in tests.

use serde::{Deserialize, Serialize};

/// Bounding sphere of one cascade's frustum slice, world space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CullingSphere {
    pub center: [f32; 3],
    pub radius: f32,
}

impl CullingSphere {
    pub fn new(center: [f32; 3], radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Per-split data produced by cascade culling
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowSplitData {
    /// Sphere used for caster culling and cross-cascade blend tests
    pub culling_sphere: CullingSphere,
    /// Fraction of the split culling may shave off. Geometry just outside
    /// the nominal cascade still casts into it, which hides popping as
    /// the camera moves.
    pub blend_culling_factor: f32,
}

/// View/projection pair and split data for one (light, cascade) tile
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CascadeGeometry {
    /// Light view matrix (column-major)
    pub view: [[f32; 4]; 4],
    /// Light orthographic projection (column-major)
    pub projection: [[f32; 4]; 4],
    /// Split culling data
    pub split: ShadowSplitData,
}

/// Engine-side culling service for directional shadows
pub trait CascadeCulling {
    /// Whether the light has any visible shadow casters in range
    fn shadow_caster_bounds(&self, light_index: u32) -> bool;

    /// Compute the view/projection pair and culling sphere for one cascade
    ///
    /// Cascades are slices of the camera frustum selected by `split_ratios`;
    /// `tile_size` lets the implementation snap the projection to texel
    /// increments for the resolution the cascade will render at.
    fn compute_cascade_geometry(
        &self,
        light_index: u32,
        cascade_index: u32,
        cascade_count: u32,
        split_ratios: [f32; 3],
        tile_size: u32,
        near_plane_offset: f32,
    ) -> CascadeGeometry;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::shadow::matrix::IDENTITY;

    /// Culling fixture: identity matrices, one fixed sphere per cascade
    pub(crate) struct SphereCulling {
        pub radius: f32,
        pub has_casters: bool,
    }

    impl SphereCulling {
        pub fn new(radius: f32) -> Self {
            Self {
                radius,
                has_casters: true,
            }
        }

        pub fn without_casters(radius: f32) -> Self {
            Self {
                radius,
                has_casters: false,
            }
        }
    }

    impl CascadeCulling for SphereCulling {
        fn shadow_caster_bounds(&self, _light_index: u32) -> bool {
            self.has_casters
        }

        fn compute_cascade_geometry(
            &self,
            _light_index: u32,
            cascade_index: u32,
            _cascade_count: u32,
            _split_ratios: [f32; 3],
            _tile_size: u32,
            _near_plane_offset: f32,
        ) -> CascadeGeometry {
            // Center z marks the cascade so tests can tell them apart
            CascadeGeometry {
                view: IDENTITY,
                projection: IDENTITY,
                split: ShadowSplitData {
                    culling_sphere: CullingSphere::new(
                        [0.0, 0.0, cascade_index as f32],
                        self.radius,
                    ),
                    blend_culling_factor: 0.0,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::SphereCulling;
    use super::*;

    #[test]
    fn test_fixture_caster_bounds() {
        assert!(SphereCulling::new(10.0).shadow_caster_bounds(0));
        assert!(!SphereCulling::without_casters(10.0).shadow_caster_bounds(0));
    }

    #[test]
    fn test_fixture_marks_cascades() {
        let culling = SphereCulling::new(25.0);
        let first = culling.compute_cascade_geometry(0, 0, 4, [0.1, 0.25, 0.5], 512, 0.0);
        let third = culling.compute_cascade_geometry(0, 2, 4, [0.1, 0.25, 0.5], 512, 0.0);

        assert_eq!(first.split.culling_sphere.radius, 25.0);
        assert_eq!(first.split.culling_sphere.center[2], 0.0);
        assert_eq!(third.split.culling_sphere.center[2], 2.0);
    }

    #[test]
    fn test_split_data_serialization() {
        let split = ShadowSplitData {
            culling_sphere: CullingSphere::new([1.0, 2.0, 3.0], 4.0),
            blend_culling_factor: 0.7,
        };

        let json = serde_json::to_string(&split).unwrap();
        let restored: ShadowSplitData = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, split);
    }
}
