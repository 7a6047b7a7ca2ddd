/// Render state - the per-scene context handed to every pass execution.

use crate::error::{Error, Result};
use crate::{engine_error, engine_info};
use crate::frame_graph::FrameGraphContext;
use crate::graphics_device::{
    GraphicsDevice, MeshHandle, ShaderHandle, TextureDesc, TextureHandle, TextureSample,
};
use crate::scene::{Image, Scene};
use super::{MeshCache, ShaderCache};

/// Upload a decoded image into a new texture sampled with `sample`
///
/// Slots without mip data are skipped and reported; the texture still
/// holds every other slot. A failed upload destroys the texture.
pub fn upload_image(
    device: &mut dyn GraphicsDevice,
    url: &str,
    image: &Image,
    sample: TextureSample,
) -> Result<TextureHandle> {
    engine_info!("wallscene::TextureLoader", "Load tex {:?} {}", image.format, url);

    let mip_levels = image.mip_count();
    if mip_levels == 0 {
        return Err(Error::InvalidResource(format!("image '{}' has no mipmap data", url)));
    }
    let texture = device.create_texture(&TextureDesc {
        width: image.width,
        height: image.height,
        format: image.format,
        mip_levels: mip_levels as u32,
        slot_count: image.count() as u32,
        sample,
    })?;

    for (slot, mipmaps) in image.slots.iter().enumerate() {
        if mipmaps.is_empty() {
            engine_error!("wallscene::TextureLoader", "no tex data in slot {} of '{}'", slot, url);
            continue;
        }
        for (level, mipmap) in mipmaps.iter().enumerate() {
            if let Err(err) = device.upload_mipmap(texture, slot as u32, level as u32, mipmap) {
                device.destroy_texture(texture);
                return Err(err);
            }
        }
    }
    Ok(texture)
}

/// Built-in objects of the final blit
#[derive(Debug, Clone, Copy)]
pub struct BlitObjects {
    pub shader: ShaderHandle,
    pub mesh: MeshHandle,
}

pub struct RenderState {
    pub scene: Scene,
    pub shaders: ShaderCache,
    pub meshes: MeshCache,
    pub surface_size: [u32; 2],
    pub flips: [bool; 2],
    pub blit: Option<BlitObjects>,
}

impl RenderState {
    pub fn new(scene: Scene, surface_size: [u32; 2], flips: [bool; 2]) -> Self {
        Self {
            scene,
            shaders: ShaderCache::new(),
            meshes: MeshCache::new(),
            surface_size,
            flips,
            blit: None,
        }
    }

    /// Destroy every cached GPU object
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        self.shaders.release(device);
        self.meshes.release(device);
        if let Some(blit) = self.blit.take() {
            device.destroy_shader(blit.shader);
            device.destroy_mesh(blit.mesh);
        }
    }
}

impl FrameGraphContext for RenderState {
    fn surface_size(&self) -> [u32; 2] {
        self.surface_size
    }

    fn load_image(&mut self, device: &mut dyn GraphicsDevice, url: &str) -> Result<TextureHandle> {
        let parser = self
            .scene
            .image_parser
            .as_mut()
            .ok_or_else(|| Error::ResourceNotFound(format!("no image parser for '{}'", url)))?;
        let image = parser
            .parse(url)
            .ok_or_else(|| Error::ResourceNotFound(format!("image '{}'", url)))?;
        // Scene texture metadata overrides the decoder's sampling
        let sample = self.scene.textures.get(url).map(|t| t.sample).unwrap_or(image.sample);
        upload_image(device, url, &image, sample)
    }
}
