/// Scene graph translator and effect chain resolver.
///
/// Walks the scene tree depth-first in pre-order and declares one node
/// pass per renderable node. A node whose camera carries an effect layer
/// renders into the layer's first target, and the layer's effect nodes
/// are translated right after it, each into its own declared output.

use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::{engine_error, engine_info, engine_warn};
use crate::frame_graph::{FrameGraph, SizePolicy, TextureResourceDesc};
use crate::graphics_device::ColorWriteMask;
use crate::scene::{NodeKey, Scene};
use super::{
    is_reserved, GraphicManagerConfig, NodeInput, NodeOutput, NodePass, RenderState, ResourceTable,
    DEFAULT_TARGET,
};

/// Alpha is written only by passes of named, non-global cameras
pub fn color_mask_for_camera(camera: &str) -> ColorWriteMask {
    ColorWriteMask::with_alpha(!(camera.is_empty() || camera.starts_with("global")))
}

pub struct SceneTranslator<'a> {
    graph: &'a mut FrameGraph<RenderState>,
    table: &'a mut ResourceTable,
    config: &'a GraphicManagerConfig,
    /// Cameras whose effect layer is being translated
    active_effects: FxHashSet<String>,
}

impl<'a> SceneTranslator<'a> {
    pub fn new(graph: &'a mut FrameGraph<RenderState>, table: &'a mut ResourceTable, config: &'a GraphicManagerConfig) -> Self {
        Self { graph, table, config, active_effects: FxHashSet::default() }
    }

    /// Translate the subtree under `root`, writing into `output`
    pub fn translate_tree(&mut self, scene: &Scene, root: NodeKey, output: &str) -> Result<()> {
        let mut pending = vec![root];
        while let Some(key) = pending.pop() {
            let Some(node) = scene.node(key) else {
                engine_warn!("wallscene::Translator", "dangling node key skipped");
                continue;
            };
            self.translate_node(scene, key, output)?;
            pending.extend(node.children.iter().rev().copied());
        }
        Ok(())
    }

    /// Declare the pass of one node (and of its camera's effect layer)
    pub fn translate_node(&mut self, scene: &Scene, key: NodeKey, output: &str) -> Result<()> {
        let Some(node) = scene.node(key) else { return Ok(()) };
        let (Some(mesh), Some(material_key)) = (node.mesh, node.material) else { return Ok(()) };
        let Some(material) = scene.materials.get(material_key) else {
            engine_warn!("wallscene::Translator", "node '{}' references a missing material", node.name);
            return Ok(());
        };
        let pass_name = material.name.as_str();

        let mut output = output.to_string();
        let mut effect_layer = None;
        if !node.camera.is_empty() {
            match scene.camera(&node.camera) {
                Some(camera) if camera.has_image_effect() => {
                    if self.active_effects.contains(&node.camera) {
                        engine_warn!("wallscene::Translator",
                            "effect layer of camera '{}' references itself, not expanded again", node.camera);
                    } else if let Some(layer) = camera.image_effect.as_ref() {
                        if let Some(first) = layer.first_target() {
                            output = first.to_string();
                        }
                        effect_layer = Some(layer);
                    }
                }
                Some(_) => {}
                None => engine_warn!("wallscene::Translator", "camera '{}' not found for pass {}", node.camera, pass_name),
            }
        }

        // Inputs
        let mut inputs = Vec::with_capacity(material.textures.len());
        for url in &material.textures {
            let handle = if url.is_empty() {
                None
            } else if is_reserved(url) {
                if !self.table.contains(url) {
                    engine_error!("wallscene::Translator", "{} not found, at pass {}", url, pass_name);
                    None
                } else if *url == output {
                    if url != DEFAULT_TARGET {
                        engine_info!("wallscene::Translator", "copy bind: {}", url);
                    }
                    Some(self.table.declare_read_then_write(self.graph, url)?)
                } else {
                    self.table.resolve(url)
                }
            } else {
                Some(self.table.image(self.graph, url))
            };
            inputs.push(NodeInput { name: url.clone(), handle });
        }

        // Output
        let configured = scene.render_targets.get(&output).map(|rt| rt.size_policy());
        let size = match configured {
            Some(size) => size,
            // The default target always follows the surface
            None if output == DEFAULT_TARGET => SizePolicy::ScaledToSurface(1.0),
            None => {
                let [width, height] = self.config.default_target_size;
                SizePolicy::Fixed { width, height }
            }
        };
        let node_output = match self.table.resolve(&output) {
            Some(handle) => NodeOutput::Move(handle),
            None => {
                if configured.is_none() && output != DEFAULT_TARGET {
                    engine_warn!("wallscene::Translator",
                        "render target '{}' not configured, using {:?}", output, size);
                }
                NodeOutput::Create(TextureResourceDesc::render_target(output.clone(), size))
            }
        };

        let pass = NodePass::new(key, mesh, material_key, inputs, node_output, size, color_mask_for_camera(&node.camera));
        let id = self.graph.add_pass(pass_name, Box::new(pass))?;
        if let Some(written) = self.graph.pass_outputs(id).first() {
            self.table.declare_write(&output, *written);
        }

        if let Some(layer) = effect_layer {
            self.active_effects.insert(node.camera.clone());
            for effect_node in layer.nodes() {
                self.translate_node(scene, effect_node.node, &effect_node.output)?;
            }
            self.active_effects.remove(&node.camera);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
