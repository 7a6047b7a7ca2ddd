/// Frame graph module - virtual resources, passes, compile and execution

pub mod resource;
pub mod builder;
pub mod pass_action;
pub mod compiler;
pub mod physical;
pub mod frame_graph;

pub use resource::*;
pub use builder::*;
pub use pass_action::*;
pub use compiler::CompiledGraph;
pub use physical::PassResources;
pub use frame_graph::*;
