/// GraphicsDevice trait - the fixed primitive layer under the frame graph
///
/// Backends (OpenGL, Vulkan, ...) implement this trait. The engine never
/// reaches below it: every texture, render target, shader and mesh is
/// addressed through an opaque slotmap handle handed out by the device.

use slotmap::new_key_type;
use crate::error::Result;
use super::{TextureDesc, MipmapData, RenderTargetDesc, ShaderDesc, UniformInfo, ShaderValue, MeshDesc, PassDesc, Bindings};

new_key_type! {
    /// Device texture (single or multi-slot)
    pub struct TextureHandle;
    /// Device render target (set of color attachments)
    pub struct RenderTargetHandle;
    /// Compiled shader program
    pub struct ShaderHandle;
    /// Resident mesh (vertex + index data)
    pub struct MeshHandle;
}

/// GPU primitive layer
///
/// All calls are issued sequentially from the rendering thread.
pub trait GraphicsDevice: Send {
    // ===== TEXTURES =====

    /// Create a texture with `desc.slot_count` slots of `desc.mip_levels` levels each
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle>;

    /// Destroy a texture (unknown handles are ignored)
    fn destroy_texture(&mut self, texture: TextureHandle);

    /// Upload pixel data for one mip level of one slot
    fn upload_mipmap(&mut self, texture: TextureHandle, slot: u32, level: u32, data: &MipmapData) -> Result<()>;

    /// Select which slot of a multi-frame texture is sampled
    fn select_texture_slot(&mut self, texture: TextureHandle, slot: u32) -> Result<()>;

    /// Copy the content of `src` into `dst`
    fn copy_texture(&mut self, dst: TextureHandle, src: TextureHandle) -> Result<()>;

    /// Clear a texture to a color
    fn clear_texture(&mut self, texture: TextureHandle, color: [f32; 4]) -> Result<()>;

    // ===== RENDER TARGETS =====

    /// Create a render target over existing textures
    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<RenderTargetHandle>;

    /// Destroy a render target (attachments are not destroyed)
    fn destroy_render_target(&mut self, render_target: RenderTargetHandle);

    // ===== SHADERS =====

    /// Compile a shader program
    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle>;

    /// Destroy a shader program
    fn destroy_shader(&mut self, shader: ShaderHandle);

    /// Uniform table of a compiled shader
    fn query_uniforms(&self, shader: ShaderHandle) -> Result<Vec<UniformInfo>>;

    /// Set a named uniform of a shader
    fn update_uniform(&mut self, shader: ShaderHandle, value: &ShaderValue) -> Result<()>;

    // ===== MESHES =====

    /// Upload a mesh and make it resident
    fn load_mesh(&mut self, desc: &MeshDesc) -> Result<MeshHandle>;

    /// Release a resident mesh
    fn destroy_mesh(&mut self, mesh: MeshHandle);

    /// Draw a resident mesh with the current pass state and bindings
    fn draw_mesh(&mut self, mesh: MeshHandle) -> Result<()>;

    // ===== PASSES =====

    /// Begin a render pass (target, viewport, blend, color mask, shader)
    fn begin_pass(&mut self, desc: &PassDesc) -> Result<()>;

    /// Bind textures to the shader's sampler slots
    fn apply_bindings(&mut self, bindings: &Bindings) -> Result<()>;

    /// End the current render pass
    fn end_pass(&mut self) -> Result<()>;

    // ===== SURFACE =====

    /// Set the default framebuffer (the output surface)
    fn set_default_framebuffer(&mut self, framebuffer: u32, width: u32, height: u32);

    /// Color used when the default framebuffer is cleared
    fn set_clear_color(&mut self, color: [f32; 4]);

    /// Destroy every object created through this device
    fn clear_all(&mut self);
}
