/// Scene - nodes, meshes, materials, cameras and the collaborators that
/// animate them.
///
/// Nodes, meshes and materials live in slotmaps; their keys double as the
/// stable identities the graphic manager caches GPU objects by.

use std::sync::Arc;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use crate::camera::SceneCamera;
use super::{
    Image, MaterialKey, MeshKey, NodeKey, SceneMaterial, SceneMesh, SceneNode,
    SceneRenderTarget, SceneTexture,
};

// ===== COLLABORATORS =====

/// Image decoder
pub trait ImageParser {
    /// Decode the image identified by `url` (None if unavailable)
    fn parse(&mut self, url: &str) -> Option<Arc<Image>>;
}

/// Per-frame shader uniform animation
pub trait ShaderValueUpdater {
    fn frame_begin(&mut self);

    /// Queue this frame's values for a node's material
    fn update_shader_values(&mut self, node: NodeKey, material: &mut SceneMaterial);

    fn frame_end(&mut self);
}

/// Time-driven particle simulation
pub trait ParticleSystem {
    fn emit(&mut self);
}

// ===== SCENE =====

pub struct Scene {
    pub nodes: SlotMap<NodeKey, SceneNode>,
    pub meshes: SlotMap<MeshKey, SceneMesh>,
    pub materials: SlotMap<MaterialKey, SceneMaterial>,
    pub root: Option<NodeKey>,
    pub cameras: FxHashMap<String, SceneCamera>,
    pub render_targets: FxHashMap<String, SceneRenderTarget>,
    pub textures: FxHashMap<String, SceneTexture>,
    /// RGB clear color of the default target
    pub clear_color: [f32; 3],
    /// Configured orthographic content extents
    pub ortho: [u32; 2],
    pub image_parser: Option<Box<dyn ImageParser>>,
    pub shader_value_updater: Option<Box<dyn ShaderValueUpdater>>,
    pub particle_system: Option<Box<dyn ParticleSystem>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            root: None,
            cameras: FxHashMap::default(),
            render_targets: FxHashMap::default(),
            textures: FxHashMap::default(),
            clear_color: [0.0; 3],
            ortho: [1920, 1080],
            image_parser: None,
            shader_value_updater: None,
            particle_system: None,
        }
    }

    // ===== CONSTRUCTION =====

    pub fn add_node(&mut self, node: SceneNode) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Add `node` as the last child of `parent`
    ///
    /// Returns None if `parent` is not in the scene.
    pub fn add_child(&mut self, parent: NodeKey, node: SceneNode) -> Option<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let key = self.nodes.insert(node);
        self.nodes[parent].children.push(key);
        Some(key)
    }

    pub fn add_mesh(&mut self, mesh: SceneMesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn add_material(&mut self, material: SceneMaterial) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn add_camera(&mut self, name: impl Into<String>, camera: SceneCamera) {
        self.cameras.insert(name.into(), camera);
    }

    /// Create the root node if missing and return it
    pub fn ensure_root(&mut self) -> NodeKey {
        match self.root {
            Some(root) if self.nodes.contains_key(root) => root,
            _ => {
                let root = self.nodes.insert(SceneNode::new("root"));
                self.root = Some(root);
                root
            }
        }
    }

    // ===== QUERIES =====

    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn camera(&self, name: &str) -> Option<&SceneCamera> {
        self.cameras.get(name)
    }

    pub fn camera_mut(&mut self, name: &str) -> Option<&mut SceneCamera> {
        self.cameras.get_mut(name)
    }

    // ===== CAMERA LINKS =====

    /// Refresh every camera linked to `name`, transitively
    ///
    /// A linked camera takes over the source's extents, aspect and field
    /// of view. Each camera is refreshed at most once per call.
    pub fn update_linked_camera(&mut self, name: &str) {
        let mut visited: FxHashSet<String> = FxHashSet::default();
        visited.insert(name.to_string());
        let mut pending = vec![name.to_string()];

        while let Some(source_name) = pending.pop() {
            let Some(source) = self.cameras.get(&source_name).cloned() else { continue };

            let mut linked: Vec<String> = self
                .cameras
                .iter()
                .filter(|(n, c)| c.linked_to.as_deref() == Some(source_name.as_str()) && !visited.contains(*n))
                .map(|(n, _)| n.clone())
                .collect();
            linked.sort();

            for camera_name in linked {
                if let Some(camera) = self.cameras.get_mut(&camera_name) {
                    camera.follow(&source);
                    camera.update();
                }
                visited.insert(camera_name.clone());
                pending.push(camera_name);
            }
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
