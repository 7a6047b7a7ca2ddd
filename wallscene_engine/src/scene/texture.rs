/// Scene textures, sprite animation state and decoded images.

use crate::graphics_device::{MipmapData, TextureFormat, TextureSample};

/// One frame of a sprite animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    /// Image slot holding the frame's pixels
    pub image_id: u32,
    /// Frame duration in seconds
    pub frametime: f32,
}

/// Sprite animation state, advanced by the scene's animation logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteAnimation {
    pub frames: Vec<SpriteFrame>,
    pub current: usize,
}

impl SpriteAnimation {
    pub fn current_frame(&self) -> Option<&SpriteFrame> {
        self.frames.get(self.current)
    }
}

/// Per-texture metadata known to the scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneTexture {
    pub sample: TextureSample,
    /// Present for multi-frame (sprite) textures
    pub sprite: Option<SpriteAnimation>,
}

impl SceneTexture {
    pub fn is_sprite(&self) -> bool {
        self.sprite.is_some()
    }
}

/// Decoded image: one list of mip levels per slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub sample: TextureSample,
    pub slots: Vec<Vec<MipmapData>>,
}

impl Image {
    /// Number of slots (sprite frames)
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    /// Largest mip chain over all slots
    pub fn mip_count(&self) -> usize {
        self.slots.iter().map(|s| s.len()).max().unwrap_or(0)
    }
}
