/// Scene node - one element of the scene tree.

use slotmap::new_key_type;
use super::{MaterialKey, MeshKey};

new_key_type! {
    /// Stable key for a SceneNode within a Scene
    pub struct NodeKey;
}

/// Tree node owning an optional mesh and material reference
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    pub name: String,
    pub mesh: Option<MeshKey>,
    pub material: Option<MaterialKey>,
    /// Name of the camera the node is rendered with (empty = none)
    pub camera: String,
    /// Owned children in draw order
    pub children: Vec<NodeKey>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Node drawing `mesh` with `material` through `camera`
    pub fn renderable(name: impl Into<String>, mesh: MeshKey, material: MaterialKey, camera: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            material: Some(material),
            camera: camera.into(),
            children: Vec::new(),
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some() && self.material.is_some()
    }
}
