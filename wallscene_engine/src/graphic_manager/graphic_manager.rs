/// Graphic manager - owns the frame graph built from a scene and drives
/// it once per frame.
///
/// Lifecycle: `initialize(scene)` builds and compiles the graph once,
/// `set_default_surface` / `change_fill_mode` keep cameras in sync with
/// the output surface, `draw` replays the compiled passes, `destroy`
/// releases everything and hands the scene back.

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_info, engine_warn};
use crate::camera::{update_camera_for_surface, FillMode};
use crate::frame_graph::FrameGraph;
use crate::graphics_device::GraphicsDevice;
use crate::scene::Scene;
use super::translator::SceneTranslator;
use super::{EndPass, GraphicManagerConfig, PreparePass, RenderState, ResourceTable, DEFAULT_TARGET};

/// Default output surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub framebuffer: u32,
    pub width: u32,
    pub height: u32,
}

pub struct GraphicManager {
    device: Arc<Mutex<dyn GraphicsDevice>>,
    config: GraphicManagerConfig,
    graph: FrameGraph<RenderState>,
    table: ResourceTable,
    state: Option<RenderState>,
    fill_mode: FillMode,
    surface: Option<Surface>,
}

fn lock_device(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| Error::BackendError("graphics device lock poisoned".to_string()))
}

impl GraphicManager {
    pub fn new(device: Arc<Mutex<dyn GraphicsDevice>>, config: GraphicManagerConfig) -> Self {
        let fill_mode = config.fill_mode;
        Self {
            device,
            config,
            graph: FrameGraph::new(),
            table: ResourceTable::new(),
            state: None,
            fill_mode,
            surface: None,
        }
    }

    // ===== LIFECYCLE =====

    /// Build and compile the frame graph of `scene`
    ///
    /// An already initialized scene is destroyed first.
    ///
    /// # Errors
    ///
    /// `Error::GraphConstruction` when the passes cannot be ordered. The
    /// manager is left uninitialized in that case.
    pub fn initialize(&mut self, scene: Scene) -> Result<()> {
        if self.state.is_some() {
            engine_warn!("wallscene::GraphicManager", "initialize called twice, destroying previous scene");
            self.destroy();
        }

        if let Err(err) = self.build_graph(&scene) {
            let mut device = lock_device(&self.device)?;
            self.graph.reset(&mut *device);
            self.table.clear();
            return Err(err);
        }

        let surface_size = match self.surface {
            Some(surface) => [surface.width, surface.height],
            None => match scene.render_targets.get(DEFAULT_TARGET) {
                Some(rt) => [rt.width, rt.height],
                None => self.config.default_target_size,
            },
        };
        let mut state = RenderState::new(scene, surface_size, self.config.flips);
        if self.surface.is_some() {
            update_camera_for_surface(
                &mut state.scene, surface_size, self.fill_mode, self.config.perspective_reference_distance,
            );
        }
        self.state = Some(state);
        Ok(())
    }

    fn build_graph(&mut self, scene: &Scene) -> Result<()> {
        let prepare = self.graph.add_pass("prepare", Box::new(PreparePass::new()))?;
        let default_target = self
            .graph
            .pass_outputs(prepare)
            .first()
            .copied()
            .ok_or_else(|| Error::GraphConstruction("prepare pass declared no output".to_string()))?;
        self.table.declare_write(DEFAULT_TARGET, default_target);

        match scene.root {
            Some(root) => {
                let mut translator = SceneTranslator::new(&mut self.graph, &mut self.table, &self.config);
                translator.translate_tree(scene, root, DEFAULT_TARGET)?;
            }
            None => engine_warn!("wallscene::GraphicManager", "scene has no root node"),
        }

        let final_target = self
            .table
            .resolve(DEFAULT_TARGET)
            .ok_or_else(|| Error::ResourceNotFound(DEFAULT_TARGET.to_string()))?;
        self.graph.add_pass("end", Box::new(EndPass::new(final_target)))?;

        self.graph.compile()?;
        engine_info!("wallscene::GraphicManager", "scene initialized with {} passes", self.graph.compiled_pass_names().len());
        if self.config.dump_graph {
            engine_debug!("wallscene::GraphicManager", "frame graph:\n{}", self.graph.to_graphviz());
        }
        Ok(())
    }

    /// Release every GPU object and the compiled graph
    ///
    /// Returns the scene so it can be initialized again.
    pub fn destroy(&mut self) -> Option<Scene> {
        let mut state = self.state.take();
        match self.device.lock() {
            Ok(mut device) => {
                self.graph.reset(&mut *device);
                if let Some(state) = state.as_mut() {
                    state.release(&mut *device);
                }
                device.clear_all();
            }
            Err(_) => {
                engine_warn!("wallscene::GraphicManager", "graphics device lock poisoned, GPU objects leaked");
                self.graph = FrameGraph::new();
            }
        }
        self.table.clear();
        state.map(|s| s.scene)
    }

    // ===== SURFACE =====

    /// Set the output surface and recompute the global cameras
    ///
    /// A zero height is ignored.
    pub fn set_default_surface(&mut self, framebuffer: u32, width: u32, height: u32, fill_mode: FillMode) -> Result<()> {
        if height == 0 {
            engine_warn!("wallscene::GraphicManager", "ignoring surface with zero height");
            return Ok(());
        }
        self.surface = Some(Surface { framebuffer, width, height });
        self.fill_mode = fill_mode;
        lock_device(&self.device)?.set_default_framebuffer(framebuffer, width, height);

        if let Some(state) = self.state.as_mut() {
            state.surface_size = [width, height];
            update_camera_for_surface(
                &mut state.scene, [width, height], fill_mode, self.config.perspective_reference_distance,
            );
        }
        Ok(())
    }

    /// Change the fill mode, recomputing cameras for the current surface
    pub fn change_fill_mode(&mut self, fill_mode: FillMode) {
        self.fill_mode = fill_mode;
        if let (Some(state), Some(surface)) = (self.state.as_mut(), self.surface) {
            update_camera_for_surface(
                &mut state.scene, [surface.width, surface.height], fill_mode, self.config.perspective_reference_distance,
            );
        }
    }

    // ===== FRAME =====

    /// Render one frame (no-op without a scene)
    pub fn draw(&mut self) -> Result<()> {
        let Some(state) = self.state.as_mut() else { return Ok(()) };

        if let Some(particles) = state.scene.particle_system.as_mut() {
            particles.emit();
        }
        if let Some(updater) = state.scene.shader_value_updater.as_mut() {
            updater.frame_begin();
        }

        {
            let mut device = lock_device(&self.device)?;
            let [r, g, b] = state.scene.clear_color;
            device.set_clear_color([r, g, b, 1.0]);
            self.graph.execute(&mut *device, state)?;
        }

        if let Some(updater) = state.scene.shader_value_updater.as_mut() {
            updater.frame_end();
        }
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.state.as_ref().map(|s| &s.scene)
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.state.as_mut().map(|s| &mut s.scene)
    }

    /// Pass names in execution order
    pub fn compiled_pass_names(&self) -> Vec<String> {
        self.graph.compiled_pass_names()
    }

    pub fn frame_graph(&self) -> &FrameGraph<RenderState> {
        &self.graph
    }

    pub fn resource_table(&self) -> &ResourceTable {
        &self.table
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    pub fn config(&self) -> &GraphicManagerConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "graphic_manager_tests.rs"]
mod tests;
