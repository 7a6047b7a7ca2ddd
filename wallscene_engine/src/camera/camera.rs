/// Scene camera - orthographic extents or perspective parameters.
///
/// Setters only store values; `update()` recomputes the projection
/// matrix from them.

use glam::Mat4;
use crate::scene::ImageEffectLayer;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    width: f32,
    height: f32,
    aspect: f32,
    /// Vertical field of view in degrees
    fov: f32,
    near: f32,
    far: f32,
    perspective: bool,
    projection: Mat4,
    /// Camera this one follows (see `Scene::update_linked_camera`)
    pub linked_to: Option<String>,
    /// Post-process stack rendered after the camera's content
    pub image_effect: Option<ImageEffectLayer>,
}

impl SceneCamera {
    /// Orthographic camera showing `width` x `height` units
    pub fn orthographic(width: f32, height: f32) -> Self {
        let mut camera = Self {
            width,
            height,
            aspect: if height > 0.0 { width / height } else { 1.0 },
            fov: 0.0,
            near: -1000.0,
            far: 1000.0,
            perspective: false,
            projection: Mat4::IDENTITY,
            linked_to: None,
            image_effect: None,
        };
        camera.update();
        camera
    }

    /// Perspective camera
    pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            width: 0.0,
            height: 0.0,
            aspect,
            fov,
            near,
            far,
            perspective: true,
            projection: Mat4::IDENTITY,
            linked_to: None,
            image_effect: None,
        };
        camera.update();
        camera
    }

    pub fn linked(mut self, source: impl Into<String>) -> Self {
        self.linked_to = Some(source.into());
        self
    }

    pub fn with_image_effect(mut self, layer: ImageEffectLayer) -> Self {
        self.image_effect = Some(layer);
        self
    }

    // ===== GETTERS =====

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn is_perspective(&self) -> bool {
        self.perspective
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Whether a non-empty post-process stack is attached
    pub fn has_image_effect(&self) -> bool {
        self.image_effect.as_ref().is_some_and(|l| l.first_target().is_some())
    }

    // ===== SETTERS =====

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Take over another camera's extents, aspect and field of view
    pub fn follow(&mut self, source: &SceneCamera) {
        self.width = source.width;
        self.height = source.height;
        self.aspect = source.aspect;
        self.fov = source.fov;
    }

    /// Recompute the projection matrix
    pub fn update(&mut self) {
        self.projection = if self.perspective {
            Mat4::perspective_rh(self.fov.to_radians().max(f32::EPSILON), self.aspect.max(f32::EPSILON), self.near, self.far)
        } else {
            if self.height > 0.0 {
                self.aspect = self.width / self.height;
            }
            let (hw, hh) = (self.width / 2.0, self.height / 2.0);
            Mat4::orthographic_rh(-hw, hw, -hh, hh, self.near, self.far)
        };
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
