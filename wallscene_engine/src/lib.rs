/*!
# Wallscene Engine

Render-graph builder and scheduler for animated wallpaper scenes.

A scene (tree of nodes, materials, cameras, named render targets and
post-process effect layers) is translated once into a frame graph of
render passes. The graph is compiled (culled, ordered, storage assigned)
and then replayed every frame against a `GraphicsDevice` implementation.

## Architecture

- **FrameGraph**: Versioned virtual textures, passes, compile and execution
- **GraphicManager**: Scene translation, per-frame drawing, lifecycle
- **Scene**: Nodes, materials, meshes, render targets and effect layers
- **SceneCamera / FillMode**: Cameras and surface fitting
- **GraphicsDevice**: GPU primitive contract implemented by backends
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod frame_graph;
pub mod scene;
pub mod camera;
pub mod graphic_manager;

#[cfg(test)]
mod test_utils;

// Main wallscene namespace module
pub mod wallscene {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Graphic manager entry point
    pub use crate::graphic_manager::{GraphicManager, GraphicManagerConfig, Surface};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Device contract
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Frame graph
    pub mod graph {
        pub use crate::frame_graph::*;
    }

    // Scene data model
    pub mod scene {
        pub use crate::scene::*;
    }

    // Cameras and fill modes
    pub mod camera {
        pub use crate::camera::*;
    }
}

// Re-export math library at crate root
pub use glam;
