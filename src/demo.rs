use glam::Mat4;

use crate::{
    camera::{CameraInput, OrbitCamera, ViewPreset, VsConstants},
    config::DemoConfig,
    projection::Projection,
    scene::InstanceScene,
};

pub struct DemoState {
    pub camera: OrbitCamera,
    pub scene: InstanceScene,
    pub vs_constants: VsConstants,
}

impl DemoState {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            camera: OrbitCamera::default(),
            scene: InstanceScene::new(config.instance_rotation_speed),
            vs_constants: VsConstants::default(),
        }
    }

    pub fn update(&mut self, input: &CameraInput, delta_time: f32, projection: &Projection) {
        self.camera.update(input, delta_time);
        self.scene.advance(delta_time);

        self.vs_constants = VsConstants {
            view_proj: self.camera.view_projection(projection),
            rotation: Mat4::IDENTITY,
        };
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        log::debug!("Camera preset {}", preset.label());
        self.camera.apply_preset(preset);
    }
}
