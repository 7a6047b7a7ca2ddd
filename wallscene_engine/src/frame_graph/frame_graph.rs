/// Frame graph - declared passes, compile step and per-frame execution.
///
/// Passes are added in declaration order; each pass's `setup` runs
/// immediately and records its reads and writes. `compile` culls,
/// orders and assigns storage once; `execute` replays the compiled
/// order every frame.

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_debug, engine_error, engine_info};
use crate::graphics_device::GraphicsDevice;
use super::compiler::{self, CompiledGraph};
use super::physical::{PassResources, PhysicalResources};
use super::{
    CopyPass, FrameGraphBuilder, FrameGraphContext, PassAction, PassDeclaration, PassId,
    ResourceHandle, ResourceRegistry, TextureResourceDesc,
};

struct PassNode<C> {
    name: String,
    action: Box<dyn PassAction<C>>,
    declaration: PassDeclaration,
}

/// Frame graph over a per-frame context `C`
pub struct FrameGraph<C> {
    registry: ResourceRegistry,
    passes: Vec<PassNode<C>>,
    compiled: Option<CompiledGraph>,
    physical: PhysicalResources,
}

impl<C: FrameGraphContext> Default for FrameGraph<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: FrameGraphContext> FrameGraph<C> {
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            passes: Vec::new(),
            compiled: None,
            physical: PhysicalResources::default(),
        }
    }

    // ===== DECLARATION =====

    /// Add a pass, running its setup immediately
    ///
    /// # Errors
    ///
    /// Propagates the setup error. The pass is not added in that case and
    /// its partial declarations are removed from the registry.
    pub fn add_pass(&mut self, name: &str, mut action: Box<dyn PassAction<C>>) -> Result<PassId> {
        let id = PassId(self.passes.len() as u32);
        let mark = self.registry.mark();
        let mut builder = FrameGraphBuilder::new(&mut self.registry, id, name);
        if let Err(err) = action.setup(&mut builder) {
            self.registry.rollback(mark, id);
            return Err(err);
        }
        let declaration = builder.finish();

        self.passes.push(PassNode { name: name.to_string(), action, declaration });
        self.compiled = None;
        Ok(id)
    }

    /// Declare an image-backed texture not produced by any pass
    pub fn import_image(&mut self, url: &str) -> ResourceHandle {
        self.registry.create_texture(TextureResourceDesc::image(url))
    }

    /// Add a copy pass duplicating `source`, returning the copy
    pub fn add_copy_pass(&mut self, source: ResourceHandle) -> Result<ResourceHandle> {
        let id = self.add_pass("copy", Box::new(CopyPass::new(source)))?;
        self.pass_outputs(id)
            .first()
            .copied()
            .ok_or_else(|| Error::GraphConstruction("copy pass declared no output".to_string()))
    }

    // ===== COMPILE =====

    /// Cull, order and assign storage
    ///
    /// # Errors
    ///
    /// `Error::GraphConstruction` on a dependency cycle.
    pub fn compile(&mut self) -> Result<()> {
        let declarations: Vec<PassDeclaration> = self.passes.iter().map(|p| p.declaration.clone()).collect();
        let names: Vec<String> = self.passes.iter().map(|p| p.name.clone()).collect();
        let compiled = compiler::compile(&self.registry, &declarations, &names)?;

        engine_info!("wallscene::FrameGraph",
            "compiled {} passes ({} culled), {} textures on {} slots",
            compiled.order.len(), compiled.culled.len(),
            self.registry.texture_count(), compiled.slots.len());
        for culled in &compiled.culled {
            engine_debug!("wallscene::FrameGraph", "culled pass '{}'", self.passes[culled.index()].name);
        }

        self.compiled = Some(compiled);
        Ok(())
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn compiled(&self) -> Option<&CompiledGraph> {
        self.compiled.as_ref()
    }

    /// Pass names in execution order (empty before compile)
    pub fn compiled_pass_names(&self) -> Vec<String> {
        self.compiled
            .as_ref()
            .map(|c| c.order.iter().map(|p| self.passes[p.index()].name.clone()).collect())
            .unwrap_or_default()
    }

    // ===== EXECUTION =====

    /// Run the compiled passes in order
    ///
    /// A failing pass is logged and the frame continues with the next one.
    ///
    /// # Errors
    ///
    /// Fails if the graph is not compiled or physical storage cannot be created.
    pub fn execute(&mut self, device: &mut dyn GraphicsDevice, context: &mut C) -> Result<()> {
        let Some(compiled) = self.compiled.as_ref() else {
            return Err(Error::GraphConstruction("frame graph executed before compile".to_string()));
        };

        self.physical.sync(device, &self.registry, compiled, context)?;
        let surface = context.surface_size();

        for pass_id in &compiled.order {
            let pass = &mut self.passes[pass_id.index()];

            let attachments = pass
                .declaration
                .render_pass
                .as_ref()
                .map(|config| config.attachments.clone())
                .unwrap_or_default();
            let render_target = match self.physical.render_target(device, &self.registry, compiled, &attachments) {
                Ok(rt) => rt,
                Err(err) => {
                    engine_error!("wallscene::FrameGraph", "pass '{}' has no render target: {}", pass.name, err);
                    continue;
                }
            };

            let resources = PassResources {
                registry: &self.registry,
                compiled,
                physical: &self.physical,
                declaration: &pass.declaration,
                render_target,
                surface,
            };
            if let Err(err) = pass.action.execute(&resources, device, context) {
                engine_error!("wallscene::FrameGraph", "pass '{}' failed: {}", pass.name, err);
            }
        }
        Ok(())
    }

    /// Destroy all realized storage
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        self.physical.release(device);
    }

    /// Drop every pass and resource, releasing storage
    pub fn reset(&mut self, device: &mut dyn GraphicsDevice) {
        self.release(device);
        self.passes.clear();
        self.registry.clear();
        self.compiled = None;
    }

    // ===== INTROSPECTION =====

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn pass_name(&self, id: PassId) -> Option<&str> {
        self.passes.get(id.index()).map(|p| p.name.as_str())
    }

    pub fn pass_reads(&self, id: PassId) -> &[ResourceHandle] {
        self.passes.get(id.index()).map(|p| p.declaration.reads.as_slice()).unwrap_or(&[])
    }

    /// Versions written by a pass
    pub fn pass_outputs(&self, id: PassId) -> &[ResourceHandle] {
        self.passes.get(id.index()).map(|p| p.declaration.writes.as_slice()).unwrap_or(&[])
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.registry
    }

    /// DOT diagram of passes and resource versions
    pub fn to_graphviz(&self) -> String {
        let mut graph: DiGraph<String, &'static str> = DiGraph::new();
        let mut pass_nodes = Vec::with_capacity(self.passes.len());
        let culled: Vec<PassId> = self.compiled.as_ref().map(|c| c.culled.clone()).unwrap_or_default();

        for (index, pass) in self.passes.iter().enumerate() {
            let label = if culled.contains(&PassId(index as u32)) {
                format!("{} (culled)", pass.name)
            } else {
                pass.name.clone()
            };
            pass_nodes.push(graph.add_node(label));
        }

        let mut resource_nodes: FxHashMap<ResourceHandle, NodeIndex> = FxHashMap::default();
        let mut resource_node = |graph: &mut DiGraph<String, &'static str>, handle: ResourceHandle| -> NodeIndex {
            *resource_nodes
                .entry(handle)
                .or_insert_with(|| graph.add_node(self.registry.label(handle)))
        };

        for (index, pass) in self.passes.iter().enumerate() {
            for read in &pass.declaration.reads {
                let node = resource_node(&mut graph, *read);
                graph.add_edge(node, pass_nodes[index], "read");
            }
            for write in &pass.declaration.writes {
                let node = resource_node(&mut graph, *write);
                graph.add_edge(pass_nodes[index], node, "write");
                if let Some(previous) = self.registry.previous(*write) {
                    let prev = resource_node(&mut graph, previous);
                    graph.add_edge(prev, node, "move");
                }
            }
        }

        format!("{}", Dot::new(&graph))
    }
}

#[cfg(test)]
#[path = "frame_graph_tests.rs"]
mod tests;
