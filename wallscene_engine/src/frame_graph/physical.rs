/// Physical resources backing a compiled frame graph.
///
/// Slots are realized lazily on the first execution and resized whenever
/// their size policy evaluates to a different size (surface resize).
/// Images are loaded once; a failed load is remembered and not retried.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_error;
use crate::graphics_device::{
    GraphicsDevice, TextureHandle, RenderTargetHandle, TextureDesc, RenderTargetDesc, Viewport,
};
use super::{CompiledGraph, FrameGraphContext, PassDeclaration, ResourceHandle, ResourceRegistry, TextureSource};

#[derive(Debug, Clone, Copy)]
pub(crate) struct RealizedSlot {
    pub texture: TextureHandle,
    pub size: [u32; 2],
}

#[derive(Debug, Default)]
pub(crate) struct PhysicalResources {
    pub slots: Vec<Option<RealizedSlot>>,
    /// Image texture index to its loaded texture (None after a failed load)
    pub images: FxHashMap<usize, Option<TextureHandle>>,
    /// Attachment slots to the render target built over them
    pub render_targets: FxHashMap<Vec<usize>, RenderTargetHandle>,
}

impl PhysicalResources {
    /// Bring the realized storage in line with `compiled` for this frame
    pub fn sync<C: FrameGraphContext>(
        &mut self,
        device: &mut dyn GraphicsDevice,
        registry: &ResourceRegistry,
        compiled: &CompiledGraph,
        context: &mut C,
    ) -> Result<()> {
        let surface = context.surface_size();

        while self.slots.len() > compiled.slots.len() {
            if let Some(Some(slot)) = self.slots.pop() {
                device.destroy_texture(slot.texture);
                self.release_render_targets(device);
            }
        }
        self.slots.resize(compiled.slots.len(), None);

        for (index, slot) in compiled.slots.iter().enumerate() {
            let size = slot.size.evaluate(surface);
            let current = self.slots[index];
            if current.map(|r| r.size) == Some(size) {
                continue;
            }
            if let Some(old) = current {
                device.destroy_texture(old.texture);
                self.release_render_targets(device);
            }
            let texture = device.create_texture(&TextureDesc::render_target(size[0], size[1]))?;
            self.slots[index] = Some(RealizedSlot { texture, size });
        }

        for texture in &compiled.images {
            if self.images.contains_key(texture) {
                continue;
            }
            let TextureSource::Image { url } = &registry.textures[*texture].desc.source else { continue };
            let loaded = match context.load_image(device, url) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    engine_error!("wallscene::FrameGraph", "failed to load image '{}': {}", url, err);
                    None
                }
            };
            self.images.insert(*texture, loaded);
        }
        Ok(())
    }

    /// Texture realized for a virtual texture
    pub fn texture(&self, registry: &ResourceRegistry, compiled: &CompiledGraph, handle: ResourceHandle) -> Option<TextureHandle> {
        let texture = registry.texture_index(handle)?;
        if let Some(image) = self.images.get(&texture) {
            return *image;
        }
        let slot = compiled.texture_slots.get(texture).copied().flatten()?;
        self.slots.get(slot).copied().flatten().map(|r| r.texture)
    }

    /// Render target over the given attachments, created on first use
    pub fn render_target(
        &mut self,
        device: &mut dyn GraphicsDevice,
        registry: &ResourceRegistry,
        compiled: &CompiledGraph,
        attachments: &[ResourceHandle],
    ) -> Result<Option<RenderTargetHandle>> {
        let mut slots = Vec::with_capacity(attachments.len());
        for handle in attachments {
            let slot = registry
                .texture_index(*handle)
                .and_then(|t| compiled.texture_slots.get(t).copied().flatten());
            match slot {
                Some(slot) => slots.push(slot),
                None => return Ok(None),
            }
        }
        if slots.is_empty() {
            return Ok(None);
        }
        if let Some(rt) = self.render_targets.get(&slots) {
            return Ok(Some(*rt));
        }

        let realized: Vec<RealizedSlot> = slots.iter().filter_map(|s| self.slots.get(*s).copied().flatten()).collect();
        if realized.len() != slots.len() {
            return Ok(None);
        }
        let size = realized[0].size;
        let rt = device.create_render_target(&RenderTargetDesc {
            width: size[0],
            height: size[1],
            attachments: realized.iter().map(|r| r.texture).collect(),
        })?;
        self.render_targets.insert(slots, rt);
        Ok(Some(rt))
    }

    fn release_render_targets(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, rt) in self.render_targets.drain() {
            device.destroy_render_target(rt);
        }
    }

    /// Destroy every realized object
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        self.release_render_targets(device);
        for slot in self.slots.drain(..).flatten() {
            device.destroy_texture(slot.texture);
        }
        for texture in self.images.drain().filter_map(|(_, t)| t) {
            device.destroy_texture(texture);
        }
    }
}

/// Physical view of the graph handed to `PassAction::execute`
pub struct PassResources<'a> {
    pub(crate) registry: &'a ResourceRegistry,
    pub(crate) compiled: &'a CompiledGraph,
    pub(crate) physical: &'a PhysicalResources,
    pub(crate) declaration: &'a PassDeclaration,
    pub(crate) render_target: Option<RenderTargetHandle>,
    pub(crate) surface: [u32; 2],
}

impl<'a> PassResources<'a> {
    /// Device texture backing a version (None when not realized)
    pub fn texture(&self, handle: ResourceHandle) -> Option<TextureHandle> {
        self.physical.texture(self.registry, self.compiled, handle)
    }

    /// Render target built over the pass's attachments
    pub fn render_target(&self) -> Option<RenderTargetHandle> {
        self.render_target
    }

    /// Viewport of the pass for this frame
    pub fn viewport(&self) -> Option<Viewport> {
        self.declaration.render_pass.as_ref().map(|config| {
            let [width, height] = config.viewport.evaluate(self.surface);
            Viewport::new(width, height)
        })
    }

    pub fn reads(&self) -> &[ResourceHandle] {
        &self.declaration.reads
    }

    pub fn writes(&self) -> &[ResourceHandle] {
        &self.declaration.writes
    }

    pub fn surface_size(&self) -> [u32; 2] {
        self.surface
    }
}
