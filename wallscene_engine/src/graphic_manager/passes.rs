/// Built-in passes of the scene frame graph.
///
/// - `PreparePass` declares and clears the default target
/// - `NodePass` draws one scene node into its output target
/// - `EndPass` presents the default target on the output surface

use std::sync::Arc;
use crate::error::{Error, Result};
use crate::engine_warn;
use crate::frame_graph::{
    FrameGraphBuilder, PassAction, PassResources, RenderPassConfig, ResourceHandle, SizePolicy,
    TextureResourceDesc,
};
use crate::graphics_device::{
    BlendMode, Bindings, ColorWriteMask, GraphicsDevice, PassDesc, PassTarget, ShaderValue, Viewport,
};
use crate::scene::{MaterialKey, MeshKey, NodeKey, Scene, SceneMaterial, SceneMesh, SceneShader};
use super::{init_shader, is_reserved, BlitObjects, RenderState, DEFAULT_TARGET};

fn surface_viewport(resources: &PassResources) -> Viewport {
    resources.viewport().unwrap_or_else(|| {
        let [width, height] = resources.surface_size();
        Viewport::new(width, height)
    })
}

// ============================================================================
// Prepare pass
// ============================================================================

/// Declares the default target (surface sized) and clears it every frame
#[derive(Default)]
pub struct PreparePass {
    output: Option<ResourceHandle>,
}

impl PreparePass {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PassAction<RenderState> for PreparePass {
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()> {
        let size = SizePolicy::ScaledToSurface(1.0);
        let texture = builder.create_texture(TextureResourceDesc::render_target(DEFAULT_TARGET, size));
        let output = builder.write(texture)?;
        builder.use_render_pass(RenderPassConfig { attachments: vec![output], viewport: size });
        self.output = Some(output);
        Ok(())
    }

    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, state: &mut RenderState) -> Result<()> {
        let texture = self
            .output
            .and_then(|o| resources.texture(o))
            .ok_or_else(|| Error::InvalidResource(format!("{} is not realized", DEFAULT_TARGET)))?;
        let [r, g, b] = state.scene.clear_color;
        device.clear_texture(texture, [r, g, b, 1.0])
    }
}

// ============================================================================
// Node pass
// ============================================================================

/// One material texture slot
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInput {
    /// Texture reference as written in the material
    pub name: String,
    /// Resolved version (None leaves the slot empty)
    pub handle: Option<ResourceHandle>,
}

/// Where a node pass writes
#[derive(Debug, Clone, PartialEq)]
pub enum NodeOutput {
    /// New version of an existing target
    Move(ResourceHandle),
    /// Fresh temporary target
    Create(TextureResourceDesc),
}

/// Draws one scene node with its material
pub struct NodePass {
    node: NodeKey,
    mesh: MeshKey,
    material: MaterialKey,
    inputs: Vec<NodeInput>,
    output: NodeOutput,
    viewport: SizePolicy,
    color_mask: ColorWriteMask,
}

impl NodePass {
    pub fn new(
        node: NodeKey,
        mesh: MeshKey,
        material: MaterialKey,
        inputs: Vec<NodeInput>,
        output: NodeOutput,
        viewport: SizePolicy,
        color_mask: ColorWriteMask,
    ) -> Self {
        Self { node, mesh, material, inputs, output, viewport, color_mask }
    }

    /// Bind inputs, selecting the current frame of sprite textures
    fn bindings(&self, resources: &PassResources, device: &mut dyn GraphicsDevice, scene: &Scene) -> Bindings {
        let mut textures = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let texture = input.handle.and_then(|h| resources.texture(h));
            if let Some(texture) = texture {
                if !is_reserved(&input.name) {
                    let frame = scene
                        .textures
                        .get(&input.name)
                        .and_then(|t| t.sprite.as_ref())
                        .and_then(|s| s.current_frame());
                    if let Some(frame) = frame {
                        if let Err(err) = device.select_texture_slot(texture, frame.image_id) {
                            engine_warn!("wallscene::NodePass",
                                "sprite frame {} of '{}' not selected: {}", frame.image_id, input.name, err);
                        }
                    }
                }
            }
            textures.push(texture);
        }
        Bindings { textures }
    }
}

impl PassAction<RenderState> for NodePass {
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()> {
        for input in &self.inputs {
            if let Some(handle) = input.handle {
                builder.read(handle)?;
            }
        }
        let target = match &self.output {
            NodeOutput::Move(handle) => *handle,
            NodeOutput::Create(desc) => builder.create_texture(desc.clone()),
        };
        let written = builder.write(target)?;
        builder.use_render_pass(RenderPassConfig { attachments: vec![written], viewport: self.viewport });
        Ok(())
    }

    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, state: &mut RenderState) -> Result<()> {
        let render_target = resources
            .render_target()
            .ok_or_else(|| Error::InvalidResource("node pass target is not realized".to_string()))?;
        let viewport = surface_viewport(resources);

        let bindings = self.bindings(resources, device, &state.scene);
        let RenderState { scene, shaders, meshes, .. } = state;

        let material = scene
            .materials
            .get_mut(self.material)
            .ok_or_else(|| Error::InvalidResource("material was removed from the scene".to_string()))?;
        let shader = shaders.ensure(device, self.material, material)?;
        let mesh_data = scene
            .meshes
            .get(self.mesh)
            .ok_or_else(|| Error::InvalidResource("mesh was removed from the scene".to_string()))?;
        let mesh = meshes.ensure(device, self.mesh, mesh_data)?;

        if let Some(updater) = scene.shader_value_updater.as_mut() {
            updater.update_shader_values(self.node, material);
        }

        device.begin_pass(&PassDesc {
            target: PassTarget::RenderTarget(render_target),
            viewport,
            blend: material.blend_mode,
            color_mask: self.color_mask,
            shader: Some(shader),
            clear_color: None,
        })?;
        for value in material.update_queue.drain(..) {
            if let Err(err) = device.update_uniform(shader, &value) {
                engine_warn!("wallscene::NodePass",
                    "uniform '{}' of '{}' not updated: {}", value.name, material.name, err);
            }
        }
        let result = device
            .apply_bindings(&bindings)
            .and_then(|_| device.draw_mesh(mesh));
        device.end_pass()?;
        result
    }
}

// ============================================================================
// End pass
// ============================================================================

const BLIT_VERTEX: &str = r#"
#version 120
attribute vec3 a_Position;
attribute vec2 a_TexCoord;
uniform vec2 g_flips;
varying vec2 v_TexCoord;
void main() {
    gl_Position = vec4(a_Position.xy * g_flips, a_Position.z, 1.0);
    v_TexCoord = a_TexCoord;
}
"#;

const BLIT_FRAGMENT: &str = r#"
#version 120
uniform sampler2D g_Texture0;
varying vec2 v_TexCoord;
void main() {
    gl_FragColor = texture2D(g_Texture0, v_TexCoord);
}
"#;

/// Material of the final blit
pub fn blit_material() -> SceneMaterial {
    let shader = SceneShader {
        vertex_code: BLIT_VERTEX.to_string(),
        fragment_code: BLIT_FRAGMENT.to_string(),
        ..Default::default()
    };
    SceneMaterial::new("end", Arc::new(shader)).with_textures(&[DEFAULT_TARGET])
}

/// Presents the final default-target version on the output surface
pub struct EndPass {
    input: ResourceHandle,
}

impl EndPass {
    pub fn new(input: ResourceHandle) -> Self {
        Self { input }
    }
}

impl PassAction<RenderState> for EndPass {
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()> {
        builder.read(self.input)?;
        builder.set_side_effect();
        Ok(())
    }

    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, state: &mut RenderState) -> Result<()> {
        let blit = match state.blit {
            Some(blit) => blit,
            None => {
                let shader = init_shader(device, &mut blit_material())?;
                let mesh = device.load_mesh(&SceneMesh::card([2.0, 2.0]).to_desc())?;
                let blit = BlitObjects { shader, mesh };
                state.blit = Some(blit);
                blit
            }
        };

        let [width, height] = state.surface_size;
        device.begin_pass(&PassDesc {
            target: PassTarget::Default,
            viewport: Viewport::new(width, height),
            blend: BlendMode::Disable,
            color_mask: ColorWriteMask::RGB,
            shader: Some(blit.shader),
            clear_color: Some([0.0, 0.0, 0.0, 1.0]),
        })?;
        let flip = |f: bool| if f { -1.0 } else { 1.0 };
        let flips = ShaderValue::new("g_flips", vec![flip(state.flips[0]), flip(state.flips[1])]);
        let result = device
            .apply_bindings(&Bindings { textures: vec![resources.texture(self.input)] })
            .and_then(|_| device.update_uniform(blit.shader, &flips))
            .and_then(|_| device.draw_mesh(blit.mesh));
        device.end_pass()?;
        result
    }
}
