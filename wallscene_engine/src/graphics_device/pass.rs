/// Render pass state: target, viewport, blending, color write mask, bindings

use bitflags::bitflags;
use super::{RenderTargetHandle, ShaderHandle, TextureHandle};

/// Where a pass renders to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassTarget {
    /// The default framebuffer (output surface)
    Default,
    /// An offscreen render target
    RenderTarget(RenderTargetHandle),
}

/// Viewport rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}

/// Blend mode of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    Disable,
    #[default]
    Normal,
    Translucent,
    Additive,
}

bitflags! {
    /// Per-channel color write mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorWriteMask: u8 {
        const RED = 0b0001;
        const GREEN = 0b0010;
        const BLUE = 0b0100;
        const ALPHA = 0b1000;
        const RGB = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
    }
}

impl ColorWriteMask {
    /// RGB always written, alpha only when `alpha` is set
    pub fn with_alpha(alpha: bool) -> Self {
        if alpha { Self::all() } else { Self::RGB }
    }
}

/// Full state for beginning a pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassDesc {
    pub target: PassTarget,
    pub viewport: Viewport,
    pub blend: BlendMode,
    pub color_mask: ColorWriteMask,
    pub shader: Option<ShaderHandle>,
    /// Clear the target to this color when the pass begins
    pub clear_color: Option<[f32; 4]>,
}

/// Textures bound to the shader's sampler slots (None = empty slot)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bindings {
    pub textures: Vec<Option<TextureHandle>>,
}
