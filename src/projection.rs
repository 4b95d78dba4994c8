use std::f32::consts::FRAC_PI_4;

use glam::Mat4;

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect_ratio(), self.near, self.far)
    }

    /// Desktop surfaces present without rotation, so there is nothing to undo.
    pub fn pretransform(&self) -> Mat4 {
        Mat4::IDENTITY
    }
}
