/// Scene mesh - CPU-side geometry uploaded lazily by the graphic manager.

use slotmap::new_key_type;
use crate::graphics_device::{MeshDesc, Vertex};

new_key_type! {
    /// Stable key for a SceneMesh within a Scene
    pub struct MeshKey;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMesh {
    pub positions: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl SceneMesh {
    /// Axis-aligned quad centered on the origin
    pub fn card(size: [f32; 2]) -> Self {
        let (hw, hh) = (size[0] / 2.0, size[1] / 2.0);
        Self {
            positions: vec![[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]],
            tex_coords: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Interleave into the device vertex layout
    ///
    /// Missing texture coordinates are filled with zero.
    pub fn to_desc(&self) -> MeshDesc {
        let vertices = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex {
                position: *position,
                tex_coord: self.tex_coords.get(i).copied().unwrap_or([0.0; 2]),
            })
            .collect();
        MeshDesc { vertices, indices: self.indices.clone() }
    }
}
