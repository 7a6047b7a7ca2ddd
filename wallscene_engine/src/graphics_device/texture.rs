/// Texture descriptor, mipmap data and render target descriptor

use super::TextureHandle;

/// Pixel format of uploaded or rendered textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    #[default]
    R8G8B8A8_UNORM,
    R8G8_UNORM,
    R8_UNORM,
    // Block-compressed formats
    BC1_UNORM,
    BC2_UNORM,
    BC3_UNORM,
}

/// Sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    Nearest,
    #[default]
    Linear,
}

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    Repeat,
    #[default]
    ClampToEdge,
}

/// Sampler state attached to a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureSample {
    pub filter: FilterMode,
    pub wrap: WrapMode,
}

/// Descriptor for creating a texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    /// Width in pixels (level 0)
    pub width: u32,
    /// Height in pixels (level 0)
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Number of mip levels per slot (1 = no mipmaps)
    pub mip_levels: u32,
    /// Number of pixel-data slots (sprite frames); 1 for render targets
    pub slot_count: u32,
    /// Sampler state
    pub sample: TextureSample,
}

impl TextureDesc {
    /// Single-slot, single-level RGBA texture suited for rendering into
    pub fn render_target(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: TextureFormat::R8G8B8A8_UNORM,
            mip_levels: 1,
            slot_count: 1,
            sample: TextureSample::default(),
        }
    }
}

/// Pixel data of one mip level
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MipmapData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Descriptor for creating a render target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargetDesc {
    pub width: u32,
    pub height: u32,
    /// Color attachments in attachment order
    pub attachments: Vec<TextureHandle>,
}
