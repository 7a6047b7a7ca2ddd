/// Resource table - semantic names to their current frame graph version.
///
/// Resolution is last-write-wins in declaration order: a write shadows
/// the name for every pass declared afterwards and never for passes
/// declared before it.

use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::frame_graph::{FrameGraph, FrameGraphContext, ResourceHandle};

/// Prefix of reserved render-target names
pub const RESERVED_PREFIX: &str = "_rt_";
/// The default offscreen target, presented by the end pass
pub const DEFAULT_TARGET: &str = "_rt_default";

/// Whether `name` refers to a render target rather than an image
pub fn is_reserved(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}

#[derive(Debug, Default)]
pub struct ResourceTable {
    current: FxHashMap<String, ResourceHandle>,
    images: FxHashMap<String, ResourceHandle>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version of a named resource
    pub fn resolve(&self, name: &str) -> Option<ResourceHandle> {
        self.current.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current.contains_key(name)
    }

    /// Record `handle` as the current version of `name`
    pub fn declare_write(&mut self, name: &str, handle: ResourceHandle) {
        self.current.insert(name.to_string(), handle);
    }

    /// Prepare a pass that samples `name` and then writes it
    ///
    /// Adds a copy pass of the current version and returns the copy,
    /// which the pass reads instead of the version it overwrites.
    pub fn declare_read_then_write<C: FrameGraphContext>(&mut self, graph: &mut FrameGraph<C>, name: &str) -> Result<ResourceHandle> {
        let source = self
            .resolve(name)
            .ok_or_else(|| Error::ResourceNotFound(name.to_string()))?;
        graph.add_copy_pass(source)
    }

    /// Image-backed resource for `url`, declared once per table
    pub fn image<C: FrameGraphContext>(&mut self, graph: &mut FrameGraph<C>, url: &str) -> ResourceHandle {
        *self
            .images
            .entry(url.to_string())
            .or_insert_with(|| graph.import_image(url))
    }

    /// Number of named render targets
    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.images.clear();
    }
}

#[cfg(test)]
#[path = "resource_table_tests.rs"]
mod tests;
