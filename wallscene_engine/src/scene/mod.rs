/// Scene module - the scene data consumed by the graphic manager

pub mod node;
pub mod mesh;
pub mod material;
pub mod texture;
pub mod render_target;
pub mod effect;
pub mod scene;

pub use node::*;
pub use mesh::*;
pub use material::*;
pub use texture::*;
pub use render_target::*;
pub use effect::*;
pub use scene::*;
