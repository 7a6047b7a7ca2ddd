/// Named render-target configuration declared by the scene.

use crate::frame_graph::SizePolicy;

/// Ties a render target's size to the output surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTargetBind {
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRenderTarget {
    pub width: u32,
    pub height: u32,
    pub bind: Option<RenderTargetBind>,
}

impl SceneRenderTarget {
    pub fn fixed(width: u32, height: u32) -> Self {
        Self { width, height, bind: None }
    }

    pub fn scaled(width: u32, height: u32, scale: f32) -> Self {
        Self { width, height, bind: Some(RenderTargetBind { scale }) }
    }

    /// Size policy used for both the texture and the pass viewport
    pub fn size_policy(&self) -> SizePolicy {
        match self.bind {
            Some(bind) => SizePolicy::ScaledToSurface(bind.scale),
            None => SizePolicy::Fixed { width: self.width, height: self.height },
        }
    }
}
