/// Scene material and shader source.
///
/// Materials are shared by every node referencing them. The rendering
/// core only touches `uniform_table` (filled when the shader is compiled)
/// and `update_queue` (drained once per pass execution).

use std::sync::Arc;
use slotmap::new_key_type;
use crate::graphics_device::{BlendMode, ShaderValue, UniformInfo};

new_key_type! {
    /// Stable key for a SceneMaterial within a Scene
    pub struct MaterialKey;
}

/// Shader program source
#[derive(Debug, Clone, Default)]
pub struct SceneShader {
    pub vertex_code: String,
    pub fragment_code: String,
    /// Vertex attribute name to location
    pub attributes: Vec<(String, u32)>,
    /// Values applied right after compilation
    pub default_values: Vec<ShaderValue>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneMaterial {
    pub name: String,
    pub shader: Arc<SceneShader>,
    /// Texture references by binding slot (empty string = unused slot)
    pub textures: Vec<String>,
    /// Sampler names by binding slot
    pub defines: Vec<String>,
    pub blend_mode: BlendMode,
    /// Values applied once after the shader is compiled
    pub const_values: Vec<ShaderValue>,
    /// Values queued by the shader-value updater, applied on next draw
    pub update_queue: Vec<ShaderValue>,
    /// Uniform table reported by the device
    pub uniform_table: Vec<UniformInfo>,
}

impl SceneMaterial {
    pub fn new(name: impl Into<String>, shader: Arc<SceneShader>) -> Self {
        Self { name: name.into(), shader, ..Default::default() }
    }

    /// Material sampling `textures` in slot order, with default sampler names
    pub fn with_textures(mut self, textures: &[&str]) -> Self {
        self.textures = textures.iter().map(|t| t.to_string()).collect();
        self.defines = (0..textures.len()).map(|i| format!("g_Texture{}", i)).collect();
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    /// Queue a uniform update for the next draw
    pub fn queue_value(&mut self, value: ShaderValue) {
        self.update_queue.push(value);
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniform_table.iter().any(|u| u.name == name)
    }
}
