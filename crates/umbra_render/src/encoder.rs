//! Shadow Command Recording
//!
//! Backend command abstractions used while rendering the shadow atlas.
//! Commands are synchronous within the recording scope: each tile is
//! fully recorded before the next begins, and the atlas texture is only
//! written through these commands.

use crate::culling::ShadowSplitData;
use crate::resource::{AtlasRequest, DepthConvention, ResourceId, Viewport};

/// GPU state and resource commands recorded by the shadow pass
pub trait ShadowCommandEncoder {
    /// Depth range convention of the backend
    fn depth_convention(&self) -> DepthConvention;

    /// Acquire a transient depth texture for this frame
    fn acquire_atlas(&mut self, request: &AtlasRequest);

    /// Bind a texture as the current depth render target
    fn set_render_target(&mut self, id: ResourceId);

    /// Clear the bound target's depth
    fn clear_depth(&mut self);

    /// Restrict rasterization to a pixel rectangle
    fn set_viewport(&mut self, viewport: Viewport);

    /// Set view and projection matrices for subsequent draws
    fn set_view_projection(&mut self, view: &[[f32; 4]; 4], projection: &[[f32; 4]; 4]);

    /// Set constant and slope-scaled depth bias
    fn set_depth_bias(&mut self, constant: f32, slope_scale: f32);

    /// Release a transient texture
    fn release_atlas(&mut self, id: ResourceId);
}

/// Depth-only draw submission for shadow casters
pub trait ShadowCasterQueue {
    /// Draw casters for `light_index`, clipped to the split's culling volume
    fn submit_shadow_casters(&mut self, light_index: u32, split: &ShadowSplitData);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// One recorded backend command
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Command {
        AcquireAtlas { size: u32 },
        SetRenderTarget(ResourceId),
        ClearDepth,
        SetViewport(Viewport),
        SetViewProjection,
        SetDepthBias { constant: f32, slope_scale: f32 },
        Submit { light_index: u32 },
        ReleaseAtlas(ResourceId),
    }

    /// Shared command log so encoder and caster queue mocks record into
    /// one interleaved sequence
    #[derive(Clone, Default)]
    pub(crate) struct CommandLog {
        commands: Rc<RefCell<Vec<Command>>>,
    }

    impl CommandLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn encoder(&self, convention: DepthConvention) -> RecordingEncoder {
            RecordingEncoder {
                log: self.clone(),
                convention,
            }
        }

        pub fn queue(&self) -> RecordingQueue {
            RecordingQueue { log: self.clone() }
        }

        pub fn commands(&self) -> Vec<Command> {
            self.commands.borrow().clone()
        }

        fn push(&self, command: Command) {
            self.commands.borrow_mut().push(command);
        }
    }

    pub(crate) struct RecordingEncoder {
        log: CommandLog,
        convention: DepthConvention,
    }

    impl ShadowCommandEncoder for RecordingEncoder {
        fn depth_convention(&self) -> DepthConvention {
            self.convention
        }

        fn acquire_atlas(&mut self, request: &AtlasRequest) {
            self.log.push(Command::AcquireAtlas { size: request.size });
        }

        fn set_render_target(&mut self, id: ResourceId) {
            self.log.push(Command::SetRenderTarget(id));
        }

        fn clear_depth(&mut self) {
            self.log.push(Command::ClearDepth);
        }

        fn set_viewport(&mut self, viewport: Viewport) {
            self.log.push(Command::SetViewport(viewport));
        }

        fn set_view_projection(&mut self, _view: &[[f32; 4]; 4], _projection: &[[f32; 4]; 4]) {
            self.log.push(Command::SetViewProjection);
        }

        fn set_depth_bias(&mut self, constant: f32, slope_scale: f32) {
            self.log.push(Command::SetDepthBias {
                constant,
                slope_scale,
            });
        }

        fn release_atlas(&mut self, id: ResourceId) {
            self.log.push(Command::ReleaseAtlas(id));
        }
    }

    pub(crate) struct RecordingQueue {
        log: CommandLog,
    }

    impl ShadowCasterQueue for RecordingQueue {
        fn submit_shadow_casters(&mut self, light_index: u32, _split: &ShadowSplitData) {
            self.log.push(Command::Submit { light_index });
        }
    }
}
