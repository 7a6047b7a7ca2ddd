/// Graphic manager module - turns a scene into a compiled frame graph and
/// draws it every frame

pub mod config;
pub mod resource_table;
pub mod caches;
pub mod render_state;
pub mod passes;
pub mod translator;
pub mod graphic_manager;

pub use config::*;
pub use resource_table::*;
pub use caches::*;
pub use render_state::*;
pub use passes::*;
pub use graphic_manager::*;
