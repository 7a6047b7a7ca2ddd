/// Pass builder - declares the reads, writes and render-pass configuration
/// of one pass during its setup phase.

use crate::error::{Error, Result};
use crate::engine_warn;
use super::{ResourceHandle, ResourceRegistry, SizePolicy, TextureResourceDesc};

/// Identifier of a declared pass (its declaration index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(pub(crate) u32);

impl PassId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Render-pass configuration of a pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassConfig {
    /// Written versions used as color attachments, in attachment order
    pub attachments: Vec<ResourceHandle>,
    /// Viewport size, evaluated against the surface every frame
    pub viewport: SizePolicy,
}

/// Everything a pass declared during setup
#[derive(Debug, Clone, Default)]
pub(crate) struct PassDeclaration {
    pub reads: Vec<ResourceHandle>,
    pub writes: Vec<ResourceHandle>,
    pub render_pass: Option<RenderPassConfig>,
    pub side_effect: bool,
}

/// Builder handed to `PassAction::setup`
///
/// Only structure is declared here; no GPU state is touched.
pub struct FrameGraphBuilder<'a> {
    registry: &'a mut ResourceRegistry,
    pass: PassId,
    pass_name: &'a str,
    declaration: PassDeclaration,
}

impl<'a> FrameGraphBuilder<'a> {
    pub(crate) fn new(registry: &'a mut ResourceRegistry, pass: PassId, pass_name: &'a str) -> Self {
        Self { registry, pass, pass_name, declaration: PassDeclaration::default() }
    }

    pub(crate) fn finish(self) -> PassDeclaration {
        self.declaration
    }

    /// Id of the pass being declared
    pub fn pass_id(&self) -> PassId {
        self.pass
    }

    /// Declare a new virtual texture
    pub fn create_texture(&mut self, desc: TextureResourceDesc) -> ResourceHandle {
        self.registry.create_texture(desc)
    }

    /// Description of the texture behind a version
    pub fn desc(&self, handle: ResourceHandle) -> Option<&TextureResourceDesc> {
        self.registry.desc(handle)
    }

    /// Declare a read of one version
    pub fn read(&mut self, handle: ResourceHandle) -> Result<ResourceHandle> {
        let pass = self.pass;
        let Some(node) = self.registry.node_mut(handle) else {
            return Err(Error::ResourceNotFound(format!(
                "pass '{}' reads unknown resource {}", self.pass_name, handle.0
            )));
        };
        if !node.readers.contains(&pass) {
            node.readers.push(pass);
        }
        if !self.declaration.reads.contains(&handle) {
            self.declaration.reads.push(handle);
        }
        Ok(handle)
    }

    /// Declare a write, returning the version this pass produces
    ///
    /// A version without a writer is claimed directly. Writing a version
    /// that already has a writer moves the texture to a new version on
    /// the same storage. When `handle` is no longer the latest version
    /// the new version is chained after the latest one.
    pub fn write(&mut self, handle: ResourceHandle) -> Result<ResourceHandle> {
        let pass = self.pass;
        let (texture, writer) = match self.registry.node(handle) {
            Some(node) => (node.texture, node.writer),
            None => {
                return Err(Error::ResourceNotFound(format!(
                    "pass '{}' writes unknown resource {}", self.pass_name, handle.0
                )));
            }
        };

        let written = match writer {
            None => {
                if let Some(node) = self.registry.node_mut(handle) {
                    node.writer = Some(pass);
                }
                handle
            }
            Some(_) => {
                let latest = self.registry.latest(handle);
                if latest != Some(handle) {
                    engine_warn!("wallscene::FrameGraph",
                        "pass '{}' writes {} which is no longer the latest version, chaining after {}",
                        self.pass_name,
                        self.registry.label(handle),
                        latest.map(|l| self.registry.label(l)).unwrap_or_default());
                }
                self.registry.new_version(texture, pass)
            }
        };

        if !self.declaration.writes.contains(&written) {
            self.declaration.writes.push(written);
        }
        Ok(written)
    }

    /// Configure the render pass (attachments and viewport)
    pub fn use_render_pass(&mut self, config: RenderPassConfig) {
        self.declaration.render_pass = Some(config);
    }

    /// Keep the pass alive even if nothing reads its output
    pub fn set_side_effect(&mut self) {
        self.declaration.side_effect = true;
    }
}
