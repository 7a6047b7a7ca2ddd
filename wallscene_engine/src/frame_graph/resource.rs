/// Virtual texture resources and their versions.
///
/// A virtual texture is the unit of backing storage. Every write to a
/// texture that already has a writer produces a new *version* of it
/// (a move): same storage, new handle. Handles always name one version.

use crate::graphics_device::TextureFormat;
use super::PassId;

/// Handle to one version of a virtual texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceHandle(pub(crate) u32);

impl ResourceHandle {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Size of a render-target texture or of a pass viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizePolicy {
    /// Fixed pixel size
    Fixed { width: u32, height: u32 },
    /// Surface size multiplied by a factor, evaluated every frame
    ScaledToSurface(f32),
}

impl SizePolicy {
    /// Pixel size for the given surface size (truncated, at least 1x1)
    pub fn evaluate(&self, surface: [u32; 2]) -> [u32; 2] {
        match *self {
            SizePolicy::Fixed { width, height } => [width.max(1), height.max(1)],
            SizePolicy::ScaledToSurface(scale) => [
                ((surface[0] as f32 * scale) as u32).max(1),
                ((surface[1] as f32 * scale) as u32).max(1),
            ],
        }
    }
}

/// Where the content of a virtual texture comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureSource {
    /// Rendered into by passes
    RenderTarget,
    /// Loaded once from an image identified by `url`
    Image { url: String },
}

/// Description of a virtual texture
#[derive(Debug, Clone, PartialEq)]
pub struct TextureResourceDesc {
    /// Debug name
    pub name: String,
    pub size: SizePolicy,
    pub format: TextureFormat,
    /// Temporaries may share backing storage with other temporaries
    pub temporary: bool,
    pub source: TextureSource,
}

impl TextureResourceDesc {
    /// Temporary render-target texture
    pub fn render_target(name: impl Into<String>, size: SizePolicy) -> Self {
        Self {
            name: name.into(),
            size,
            format: TextureFormat::R8G8B8A8_UNORM,
            temporary: true,
            source: TextureSource::RenderTarget,
        }
    }

    /// Image-backed texture
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            size: SizePolicy::Fixed { width: 1, height: 1 },
            format: TextureFormat::R8G8B8A8_UNORM,
            temporary: false,
            source: TextureSource::Image { url },
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.source, TextureSource::Image { .. })
    }
}

/// One version of a virtual texture
#[derive(Debug, Clone)]
pub(crate) struct ResourceNode {
    pub texture: usize,
    pub version: u32,
    pub writer: Option<PassId>,
    pub readers: Vec<PassId>,
    /// Version this one was moved from
    pub previous: Option<ResourceHandle>,
}

#[derive(Debug, Clone)]
pub(crate) struct VirtualTexture {
    pub desc: TextureResourceDesc,
    /// Versions in creation order; the last one is the latest
    pub versions: Vec<ResourceHandle>,
}

/// Registry sizes recorded before a pass setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegistryMark {
    textures: usize,
    nodes: usize,
}

/// All virtual textures and versions declared in a frame graph
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    pub(crate) textures: Vec<VirtualTexture>,
    pub(crate) nodes: Vec<ResourceNode>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new virtual texture, returning its first version
    pub(crate) fn create_texture(&mut self, desc: TextureResourceDesc) -> ResourceHandle {
        let texture = self.textures.len();
        let handle = ResourceHandle(self.nodes.len() as u32);
        self.nodes.push(ResourceNode { texture, version: 0, writer: None, readers: Vec::new(), previous: None });
        self.textures.push(VirtualTexture { desc, versions: vec![handle] });
        handle
    }

    /// Append a new version after the latest version of `texture`
    pub(crate) fn new_version(&mut self, texture: usize, writer: PassId) -> ResourceHandle {
        let previous = self.textures[texture].versions.last().copied();
        let handle = ResourceHandle(self.nodes.len() as u32);
        let version = self.textures[texture].versions.len() as u32;
        self.nodes.push(ResourceNode { texture, version, writer: Some(writer), readers: Vec::new(), previous });
        self.textures[texture].versions.push(handle);
        handle
    }

    pub(crate) fn node(&self, handle: ResourceHandle) -> Option<&ResourceNode> {
        self.nodes.get(handle.index())
    }

    pub(crate) fn node_mut(&mut self, handle: ResourceHandle) -> Option<&mut ResourceNode> {
        self.nodes.get_mut(handle.index())
    }

    pub fn contains(&self, handle: ResourceHandle) -> bool {
        handle.index() < self.nodes.len()
    }

    /// Latest version of the texture `handle` belongs to
    pub fn latest(&self, handle: ResourceHandle) -> Option<ResourceHandle> {
        let node = self.node(handle)?;
        self.textures[node.texture].versions.last().copied()
    }

    pub fn desc(&self, handle: ResourceHandle) -> Option<&TextureResourceDesc> {
        self.node(handle).map(|n| &self.textures[n.texture].desc)
    }

    pub fn version(&self, handle: ResourceHandle) -> Option<u32> {
        self.node(handle).map(|n| n.version)
    }

    pub fn writer(&self, handle: ResourceHandle) -> Option<PassId> {
        self.node(handle).and_then(|n| n.writer)
    }

    pub fn readers(&self, handle: ResourceHandle) -> &[PassId] {
        self.node(handle).map(|n| n.readers.as_slice()).unwrap_or(&[])
    }

    pub fn previous(&self, handle: ResourceHandle) -> Option<ResourceHandle> {
        self.node(handle).and_then(|n| n.previous)
    }

    /// Index of the virtual texture behind a version
    pub fn texture_index(&self, handle: ResourceHandle) -> Option<usize> {
        self.node(handle).map(|n| n.texture)
    }

    /// Two handles share backing storage when they version the same texture
    pub fn same_texture(&self, a: ResourceHandle, b: ResourceHandle) -> bool {
        matches!((self.texture_index(a), self.texture_index(b)), (Some(x), Some(y)) if x == y)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn version_count(&self) -> usize {
        self.nodes.len()
    }

    /// "name#version" label used in logs and graph dumps
    pub fn label(&self, handle: ResourceHandle) -> String {
        match self.node(handle) {
            Some(n) => format!("{}#{}", self.textures[n.texture].desc.name, n.version),
            None => format!("<invalid {}>", handle.0),
        }
    }

    pub(crate) fn mark(&self) -> RegistryMark {
        RegistryMark { textures: self.textures.len(), nodes: self.nodes.len() }
    }

    /// Undo everything `pass` declared since `mark`
    pub(crate) fn rollback(&mut self, mark: RegistryMark, pass: PassId) {
        self.nodes.truncate(mark.nodes);
        self.textures.truncate(mark.textures);
        for texture in &mut self.textures {
            texture.versions.retain(|v| v.index() < mark.nodes);
        }
        for node in &mut self.nodes {
            node.readers.retain(|r| *r != pass);
            if node.writer == Some(pass) {
                node.writer = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.nodes.clear();
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
