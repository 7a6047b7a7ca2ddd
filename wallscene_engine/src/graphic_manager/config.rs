/// Graphic manager configuration.

use crate::camera::FillMode;

#[derive(Debug, Clone, PartialEq)]
pub struct GraphicManagerConfig {
    /// Size used for render targets the scene does not configure
    pub default_target_size: [u32; 2],
    /// Distance from which the perspective camera sees the orthographic height
    pub perspective_reference_distance: f32,
    /// Fill mode used until `set_default_surface` provides one
    pub fill_mode: FillMode,
    /// Horizontal / vertical flip of the final blit
    pub flips: [bool; 2],
    /// Log the graphviz dump after compiling
    pub dump_graph: bool,
}

impl Default for GraphicManagerConfig {
    fn default() -> Self {
        Self {
            default_target_size: [1920, 1080],
            perspective_reference_distance: 1000.0,
            fill_mode: FillMode::AspectCrop,
            flips: [false, false],
            dump_graph: cfg!(debug_assertions),
        }
    }
}
