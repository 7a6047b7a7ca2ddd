/// Pass action trait and built-in implementations.
///
/// A pass action declares its resources in `setup` (once, when the pass
/// is added) and records GPU work in `execute` (every frame, in compiled
/// order).

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, TextureHandle};
use super::{FrameGraphBuilder, PassResources, ResourceHandle, TextureResourceDesc, TextureSource};

/// Per-frame environment of a frame graph execution
pub trait FrameGraphContext {
    /// Current output surface size in pixels
    fn surface_size(&self) -> [u32; 2];

    /// Create and fill the texture of an image-backed resource
    ///
    /// Called at most once per image resource for the lifetime of a
    /// compiled graph.
    fn load_image(&mut self, device: &mut dyn GraphicsDevice, url: &str) -> Result<TextureHandle>;
}

/// Behavior of a pass
pub trait PassAction<C> {
    /// Declare reads, writes and render-pass configuration
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()>;

    /// Record the pass's GPU work
    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, context: &mut C) -> Result<()>;
}

/// Copy pass: duplicates one version into fresh storage
///
/// The copy has the source's description but is always a temporary
/// render-target texture.
pub struct CopyPass {
    source: ResourceHandle,
    output: Option<ResourceHandle>,
}

impl CopyPass {
    pub fn new(source: ResourceHandle) -> Self {
        Self { source, output: None }
    }
}

impl<C> PassAction<C> for CopyPass {
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()> {
        let source = builder.read(self.source)?;
        let mut desc: TextureResourceDesc = builder
            .desc(source)
            .cloned()
            .ok_or_else(|| Error::ResourceNotFound(format!("copy source {}", source.index())))?;
        desc.temporary = true;
        desc.source = TextureSource::RenderTarget;
        let created = builder.create_texture(desc);
        self.output = Some(builder.write(created)?);
        Ok(())
    }

    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, _context: &mut C) -> Result<()> {
        let output = self.output.ok_or_else(|| Error::InvalidResource("copy pass was never set up".to_string()))?;
        match (resources.texture(output), resources.texture(self.source)) {
            (Some(dst), Some(src)) => device.copy_texture(dst, src),
            _ => Err(Error::InvalidResource("copy pass textures are not realized".to_string())),
        }
    }
}

type SetupFn = Box<dyn FnMut(&mut FrameGraphBuilder) -> Result<()>>;
type ExecuteFn<C> = Box<dyn FnMut(&PassResources, &mut dyn GraphicsDevice, &mut C) -> Result<()>>;

/// Custom pass action (closure-based)
///
/// Used for one-off passes where a dedicated type would be overkill.
pub struct CustomAction<C> {
    setup: SetupFn,
    execute: ExecuteFn<C>,
}

impl<C> CustomAction<C> {
    pub fn new<S, E>(setup: S, execute: E) -> Self
    where
        S: FnMut(&mut FrameGraphBuilder) -> Result<()> + 'static,
        E: FnMut(&PassResources, &mut dyn GraphicsDevice, &mut C) -> Result<()> + 'static,
    {
        Self { setup: Box::new(setup), execute: Box::new(execute) }
    }
}

impl<C> PassAction<C> for CustomAction<C> {
    fn setup(&mut self, builder: &mut FrameGraphBuilder) -> Result<()> {
        (self.setup)(builder)
    }

    fn execute(&mut self, resources: &PassResources, device: &mut dyn GraphicsDevice, context: &mut C) -> Result<()> {
        (self.execute)(resources, device, context)
    }
}
