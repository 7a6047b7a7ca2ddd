/// Shader and mesh caches keyed by scene identity.
///
/// GPU objects are created on first use and kept until the graphic
/// manager is destroyed.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_debug;
use crate::graphics_device::{GraphicsDevice, MeshHandle, ShaderDesc, ShaderHandle, VERTEX_ATTRIBUTES};
use crate::scene::{MaterialKey, MeshKey, SceneMaterial, SceneMesh};

// ===== SHADERS =====

/// Compile a material's shader and apply its initial values
///
/// Fills `material.uniform_table` from the device.
pub fn init_shader(device: &mut dyn GraphicsDevice, material: &mut SceneMaterial) -> Result<ShaderHandle> {
    let shader = material.shader.clone();
    let attributes = if shader.attributes.is_empty() {
        VERTEX_ATTRIBUTES.iter().map(|(n, l)| (n.to_string(), *l)).collect()
    } else {
        shader.attributes.clone()
    };
    let handle = device.create_shader(&ShaderDesc {
        vertex_code: shader.vertex_code.clone(),
        fragment_code: shader.fragment_code.clone(),
        attributes,
        texture_names: material.defines.clone(),
    })?;
    material.uniform_table = device.query_uniforms(handle)?;

    for value in shader.default_values.iter().chain(material.const_values.iter()) {
        device.update_uniform(handle, value)?;
    }
    Ok(handle)
}

#[derive(Debug, Default)]
pub struct ShaderCache {
    shaders: FxHashMap<MaterialKey, ShaderHandle>,
}

impl ShaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shader of a material, compiled on first request
    pub fn ensure(&mut self, device: &mut dyn GraphicsDevice, key: MaterialKey, material: &mut SceneMaterial) -> Result<ShaderHandle> {
        if let Some(handle) = self.shaders.get(&key) {
            return Ok(*handle);
        }
        let handle = init_shader(device, material)?;
        engine_debug!("wallscene::ShaderCache", "compiled shader for material '{}'", material.name);
        self.shaders.insert(key, handle);
        Ok(handle)
    }

    pub fn get(&self, key: MaterialKey) -> Option<ShaderHandle> {
        self.shaders.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, handle) in self.shaders.drain() {
            device.destroy_shader(handle);
        }
    }
}

// ===== MESHES =====

#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: FxHashMap<MeshKey, MeshHandle>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resident mesh, uploaded on first request
    pub fn ensure(&mut self, device: &mut dyn GraphicsDevice, key: MeshKey, mesh: &SceneMesh) -> Result<MeshHandle> {
        if let Some(handle) = self.meshes.get(&key) {
            return Ok(*handle);
        }
        let handle = device.load_mesh(&mesh.to_desc())?;
        self.meshes.insert(key, handle);
        Ok(handle)
    }

    pub fn get(&self, key: MeshKey) -> Option<MeshHandle> {
        self.meshes.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        for (_, handle) in self.meshes.drain() {
            device.destroy_mesh(handle);
        }
    }
}

#[cfg(test)]
#[path = "caches_tests.rs"]
mod tests;
