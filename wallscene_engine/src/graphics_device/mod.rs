/// Graphics device module - the GPU primitive contract consumed by the engine

pub mod graphics_device;
pub mod texture;
pub mod shader;
pub mod mesh;
pub mod pass;

pub use graphics_device::*;
pub use texture::*;
pub use shader::*;
pub use mesh::*;
pub use pass::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
