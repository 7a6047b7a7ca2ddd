/// Mesh descriptor

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex layout used by every scene mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Vertex attribute names bound at shader compile time, with their locations
pub const VERTEX_ATTRIBUTES: [(&str, u32); 2] = [("a_Position", 0), ("a_TexCoord", 1)];

/// Descriptor for uploading a mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshDesc {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshDesc {
    /// Vertex data as raw bytes
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
