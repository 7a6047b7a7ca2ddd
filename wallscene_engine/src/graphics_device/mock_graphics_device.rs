/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Every primitive call is recorded as a short string command so tests can
/// assert on the exact sequence the frame graph and graphic manager issue.
/// Objects live in slotmaps, so stale handles are detected like on a real
/// backend.

use slotmap::SlotMap;
use crate::error::Result;
use crate::engine_bail;
use super::{
    GraphicsDevice, TextureHandle, RenderTargetHandle, ShaderHandle, MeshHandle,
    TextureDesc, MipmapData, RenderTargetDesc, ShaderDesc, UniformInfo, ShaderValue,
    MeshDesc, PassDesc, PassTarget, Bindings,
};

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockTexture {
    pub desc: TextureDesc,
    /// (slot, level) pairs uploaded so far
    pub uploads: Vec<(u32, u32)>,
    pub active_slot: u32,
}

#[derive(Debug, Clone)]
pub struct MockShader {
    pub desc: ShaderDesc,
    pub values: Vec<ShaderValue>,
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Default)]
pub struct MockGraphicsDevice {
    pub commands: Vec<String>,
    pub textures: SlotMap<TextureHandle, MockTexture>,
    pub render_targets: SlotMap<RenderTargetHandle, RenderTargetDesc>,
    pub shaders: SlotMap<ShaderHandle, MockShader>,
    pub meshes: SlotMap<MeshHandle, MeshDesc>,
    /// Extra uniforms reported by every shader besides its samplers
    pub uniform_table: Vec<UniformInfo>,
    /// Make `create_shader` fail
    pub fail_shader_creation: bool,
    /// Make `upload_mipmap` fail
    pub fail_mipmap_upload: bool,
    /// Make `select_texture_slot` fail
    pub fail_slot_selection: bool,
    /// Make `update_uniform` fail
    pub fail_uniform_update: bool,
    pub framebuffer: (u32, u32, u32),
    pub clear_color: [f32; 4],
    in_pass: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `prefix`
    pub fn commands_with(&self, prefix: &str) -> Vec<String> {
        self.commands.iter().filter(|c| c.starts_with(prefix)).cloned().collect()
    }

    /// Number of commands starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureHandle> {
        self.commands.push(format!(
            "create_texture {}x{} mips={} slots={}",
            desc.width, desc.height, desc.mip_levels, desc.slot_count
        ));
        Ok(self.textures.insert(MockTexture { desc: desc.clone(), uploads: Vec::new(), active_slot: 0 }))
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.commands.push("destroy_texture".to_string());
        self.textures.remove(texture);
    }

    fn upload_mipmap(&mut self, texture: TextureHandle, slot: u32, level: u32, data: &MipmapData) -> Result<()> {
        let Some(tex) = self.textures.get_mut(texture) else {
            engine_bail!("wallscene::mock", "upload to unknown texture");
        };
        if self.fail_mipmap_upload {
            engine_bail!("wallscene::mock", "mipmap upload failed");
        }
        tex.uploads.push((slot, level));
        self.commands.push(format!("upload_mipmap slot={} level={} {}x{}", slot, level, data.width, data.height));
        Ok(())
    }

    fn select_texture_slot(&mut self, texture: TextureHandle, slot: u32) -> Result<()> {
        let Some(tex) = self.textures.get_mut(texture) else {
            engine_bail!("wallscene::mock", "select slot of unknown texture");
        };
        if self.fail_slot_selection {
            engine_bail!("wallscene::mock", "slot selection failed");
        }
        tex.active_slot = slot;
        self.commands.push(format!("select_texture_slot {}", slot));
        Ok(())
    }

    fn copy_texture(&mut self, dst: TextureHandle, src: TextureHandle) -> Result<()> {
        if !self.textures.contains_key(dst) || !self.textures.contains_key(src) {
            engine_bail!("wallscene::mock", "copy between unknown textures");
        }
        self.commands.push("copy_texture".to_string());
        Ok(())
    }

    fn clear_texture(&mut self, texture: TextureHandle, color: [f32; 4]) -> Result<()> {
        if !self.textures.contains_key(texture) {
            engine_bail!("wallscene::mock", "clear of unknown texture");
        }
        self.commands.push(format!("clear_texture {:?}", color));
        Ok(())
    }

    fn create_render_target(&mut self, desc: &RenderTargetDesc) -> Result<RenderTargetHandle> {
        if desc.attachments.iter().any(|t| !self.textures.contains_key(*t)) {
            engine_bail!("wallscene::mock", "render target over unknown texture");
        }
        self.commands.push(format!("create_render_target {}x{}", desc.width, desc.height));
        Ok(self.render_targets.insert(desc.clone()))
    }

    fn destroy_render_target(&mut self, render_target: RenderTargetHandle) {
        self.commands.push("destroy_render_target".to_string());
        self.render_targets.remove(render_target);
    }

    fn create_shader(&mut self, desc: &ShaderDesc) -> Result<ShaderHandle> {
        if self.fail_shader_creation {
            engine_bail!("wallscene::mock", "shader compilation failed");
        }
        self.commands.push(format!("create_shader {}", desc.texture_names.join(",")));
        Ok(self.shaders.insert(MockShader { desc: desc.clone(), values: Vec::new() }))
    }

    fn destroy_shader(&mut self, shader: ShaderHandle) {
        self.commands.push("destroy_shader".to_string());
        self.shaders.remove(shader);
    }

    fn query_uniforms(&self, shader: ShaderHandle) -> Result<Vec<UniformInfo>> {
        let Some(mock) = self.shaders.get(shader) else {
            engine_bail!("wallscene::mock", "uniforms of unknown shader");
        };
        let mut uniforms: Vec<UniformInfo> = mock.desc.texture_names.iter().enumerate()
            .map(|(i, name)| UniformInfo { name: name.clone(), location: i as i32, components: 1 })
            .collect();
        uniforms.extend(self.uniform_table.iter().cloned());
        Ok(uniforms)
    }

    fn update_uniform(&mut self, shader: ShaderHandle, value: &ShaderValue) -> Result<()> {
        let Some(mock) = self.shaders.get_mut(shader) else {
            engine_bail!("wallscene::mock", "uniform update on unknown shader");
        };
        if self.fail_uniform_update {
            engine_bail!("wallscene::mock", "uniform update failed");
        }
        mock.values.push(value.clone());
        self.commands.push(format!("update_uniform {} bytes={}", value.name, value.as_bytes().len()));
        Ok(())
    }

    fn load_mesh(&mut self, desc: &MeshDesc) -> Result<MeshHandle> {
        self.commands.push(format!("load_mesh vertices={} indices={}", desc.vertices.len(), desc.indices.len()));
        Ok(self.meshes.insert(desc.clone()))
    }

    fn destroy_mesh(&mut self, mesh: MeshHandle) {
        self.commands.push("destroy_mesh".to_string());
        self.meshes.remove(mesh);
    }

    fn draw_mesh(&mut self, mesh: MeshHandle) -> Result<()> {
        if !self.in_pass {
            engine_bail!("wallscene::mock", "draw outside of a pass");
        }
        let Some(desc) = self.meshes.get(mesh) else {
            engine_bail!("wallscene::mock", "draw of unknown mesh");
        };
        self.commands.push(format!("draw_mesh indices={}", desc.indices.len()));
        Ok(())
    }

    fn begin_pass(&mut self, desc: &PassDesc) -> Result<()> {
        if self.in_pass {
            engine_bail!("wallscene::mock", "begin_pass inside a pass");
        }
        self.in_pass = true;
        let target = match desc.target {
            PassTarget::Default => "default",
            PassTarget::RenderTarget(_) => "offscreen",
        };
        self.commands.push(format!(
            "begin_pass {} {}x{} {:?} alpha={}",
            target,
            desc.viewport.width,
            desc.viewport.height,
            desc.blend,
            desc.color_mask.contains(super::ColorWriteMask::ALPHA)
        ));
        Ok(())
    }

    fn apply_bindings(&mut self, bindings: &Bindings) -> Result<()> {
        let bound = bindings.textures.iter().filter(|t| t.is_some()).count();
        self.commands.push(format!("apply_bindings {}/{}", bound, bindings.textures.len()));
        Ok(())
    }

    fn end_pass(&mut self) -> Result<()> {
        if !self.in_pass {
            engine_bail!("wallscene::mock", "end_pass without begin_pass");
        }
        self.in_pass = false;
        self.commands.push("end_pass".to_string());
        Ok(())
    }

    fn set_default_framebuffer(&mut self, framebuffer: u32, width: u32, height: u32) {
        self.framebuffer = (framebuffer, width, height);
        self.commands.push(format!("set_default_framebuffer {} {}x{}", framebuffer, width, height));
    }

    fn set_clear_color(&mut self, color: [f32; 4]) {
        self.clear_color = color;
        self.commands.push("set_clear_color".to_string());
    }

    fn clear_all(&mut self) {
        self.commands.push("clear_all".to_string());
        self.textures.clear();
        self.render_targets.clear();
        self.shaders.clear();
        self.meshes.clear();
        self.in_pass = false;
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
