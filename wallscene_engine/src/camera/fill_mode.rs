/// Fit-mode camera adjuster.
///
/// Reconciles the scene's configured content extents with the output
/// surface's aspect ratio and updates the global cameras accordingly.

use crate::engine_warn;
use crate::scene::Scene;

/// Name of the scene's orthographic camera
pub const GLOBAL_CAMERA: &str = "global";
/// Name of the scene's perspective camera
pub const GLOBAL_PERSPECTIVE_CAMERA: &str = "global_perspective";

/// How content is fitted into the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Content extents kept as configured, distorted to the surface
    Stretch,
    /// Whole content visible, one axis extended
    AspectFit,
    /// Surface fully covered, one axis cropped
    #[default]
    AspectCrop,
}

/// Orthographic extents for a surface and the configured content extents
///
/// Returns `content` unchanged when the surface or content is degenerate.
pub fn fit_camera_extents(surface: [u32; 2], content: [f32; 2], mode: FillMode) -> [f32; 2] {
    if surface[1] == 0 || content[1] <= 0.0 {
        return content;
    }
    let [cw, ch] = content;
    let surface_aspect = surface[0] as f32 / surface[1] as f32;
    let content_aspect = cw / ch;

    let extend_height = match mode {
        FillMode::Stretch => return content,
        FillMode::AspectFit => surface_aspect < content_aspect,
        FillMode::AspectCrop => surface_aspect > content_aspect,
    };
    if extend_height {
        [cw, cw / surface_aspect]
    } else {
        [ch * surface_aspect, ch]
    }
}

/// Vertical field of view (degrees) matching an orthographic height seen
/// from `reference_distance`
pub fn perspective_fov(camera_height: f32, reference_distance: f32) -> f32 {
    (2.0 * ((camera_height / 2.0) / reference_distance).atan()).to_degrees()
}

/// Recompute the global cameras for a surface size
///
/// Returns false (and changes nothing) when the surface height is zero.
/// A missing global camera is reported and skipped.
pub fn update_camera_for_surface(scene: &mut Scene, surface: [u32; 2], mode: FillMode, reference_distance: f32) -> bool {
    if surface[1] == 0 {
        return false;
    }
    let content = [scene.ortho[0] as f32, scene.ortho[1] as f32];
    let [width, height] = fit_camera_extents(surface, content, mode);
    let surface_aspect = surface[0] as f32 / surface[1] as f32;

    match scene.camera_mut(GLOBAL_CAMERA) {
        Some(camera) => {
            camera.set_width(width);
            camera.set_height(height);
            camera.update();
        }
        None => engine_warn!("wallscene::FillMode", "camera '{}' not found, skipped", GLOBAL_CAMERA),
    }
    match scene.camera_mut(GLOBAL_PERSPECTIVE_CAMERA) {
        Some(camera) => {
            camera.set_aspect(surface_aspect);
            camera.set_fov(perspective_fov(height, reference_distance));
            camera.update();
        }
        None => engine_warn!("wallscene::FillMode", "camera '{}' not found, skipped", GLOBAL_PERSPECTIVE_CAMERA),
    }

    scene.update_linked_camera(GLOBAL_CAMERA);
    true
}

#[cfg(test)]
#[path = "fill_mode_tests.rs"]
mod tests;
