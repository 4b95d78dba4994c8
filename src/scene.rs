use std::f32::consts::PI;

use glam::{Mat4, Vec3};

use crate::rendering::instance::{InstanceData, INSTANCE_COUNT};

/// (scale, translation) of every cube in the house, in draw order.
const LAYOUT: [([f32; 3], [f32; 3]); INSTANCE_COUNT] = [
    // Roof beams
    ([5.0, 0.1, 0.01], [0.0, 0.0, 0.0]),
    ([0.01, 0.1, 5.0], [0.0, 0.0, 0.0]),
    // Upper posts
    ([0.1, 1.0, 0.01], [-5.0, -1.0, 0.0]),
    ([0.1, 1.0, 0.01], [5.0, -1.0, 0.0]),
    ([0.1, 1.0, 0.01], [0.0, 1.0, 0.0]),
    ([0.05, 1.0, 0.01], [0.0, -1.0, -5.0]),
    ([0.05, 1.0, 0.01], [0.0, -1.0, 5.0]),
    // Upper blocks
    ([1.0, 1.0, 1.0], [-5.0, -2.0, 0.0]),
    ([1.0, 1.0, 1.0], [5.0, -2.0, 0.0]),
    ([1.0, 1.0, 1.0], [0.0, -2.0, -5.0]),
    ([1.0, 1.0, 1.0], [0.0, -2.0, 5.0]),
    // Lower beams and the central column
    ([3.0, 0.05, 0.01], [0.0, -5.0, 0.0]),
    ([0.01, 0.05, 3.0], [0.0, -5.0, 0.0]),
    ([0.05, 4.0, 0.01], [0.0, -1.0, 0.0]),
    // Lower posts
    ([0.05, 1.0, 0.01], [-3.0, -6.0, 0.0]),
    ([0.05, 1.0, 0.01], [3.0, -6.0, 0.0]),
    ([0.05, 1.0, 0.01], [0.0, -6.0, 3.0]),
    ([0.05, 1.0, 0.01], [0.0, -6.0, -3.0]),
    // Lower blocks
    ([1.0, 1.0, 1.0], [-3.0, -7.0, 0.0]),
    ([1.0, 1.0, 1.0], [3.0, -7.0, 0.0]),
    ([1.0, 1.0, 1.0], [0.0, -7.0, 3.0]),
    ([1.0, 1.0, 1.0], [0.0, -7.0, -3.0]),
];

#[derive(Debug, Clone)]
pub struct InstanceScene {
    pub angle: f32,
    pub rotation_speed: f32,
}

impl InstanceScene {
    pub fn new(rotation_speed: f32) -> Self {
        Self {
            angle: PI,
            rotation_speed,
        }
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.angle += self.rotation_speed * delta_time;
    }

    pub fn instances(&self) -> [InstanceData; INSTANCE_COUNT] {
        let rotation = Mat4::from_rotation_y(self.angle);

        LAYOUT.map(|(scale, translation)| InstanceData {
            model: rotation
                * Mat4::from_translation(Vec3::from(translation))
                * Mat4::from_scale(Vec3::from(scale)),
        })
    }
}

impl Default for InstanceScene {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    #[test]
    fn generates_every_instance() {
        let instances = InstanceScene::default().instances();
        assert_eq!(instances.len(), 22);
    }

    #[test]
    fn matrices_decompose_into_layout_constants() {
        let scene = InstanceScene::default();

        for (instance, (scale, translation)) in scene.instances().iter().zip(LAYOUT) {
            let (s, r, t) = instance.model.to_scale_rotation_translation();
            let expected_rotation = Quat::from_rotation_y(PI);
            let expected_translation = expected_rotation * Vec3::from(translation);

            assert!(s.abs_diff_eq(Vec3::from(scale), 1e-5), "{s} != {scale:?}");
            assert!(r.dot(expected_rotation).abs() > 1.0 - 1e-5);
            assert!(t.abs_diff_eq(expected_translation, 1e-4));
        }
    }

    #[test]
    fn frozen_angle_is_stable_across_frames() {
        let mut scene = InstanceScene::default();
        let first = scene.instances();
        scene.advance(0.016);
        scene.advance(1.0);
        assert_eq!(scene.angle, PI);
        assert_eq!(first, scene.instances());
    }

    #[test]
    fn rotation_speed_animates_angle() {
        let mut scene = InstanceScene::new(0.5);
        scene.advance(2.0);
        assert!((scene.angle - (PI + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn scale_applies_before_translation() {
        let scene = InstanceScene {
            angle: 0.0,
            rotation_speed: 0.0,
        };
        // Block 7: unit scale at (-5, -2, 0); corner (1, 1, 1) lands at (-4, -1, 1).
        let block = scene.instances()[7].model;
        let corner = block.transform_point3(Vec3::ONE);
        assert!(corner.abs_diff_eq(Vec3::new(-4.0, -1.0, 1.0), 1e-6));

        // Beam 0: scaled to (5, 0.1, 0.01) at origin.
        let beam = scene.instances()[0].model;
        let corner = beam.transform_point3(Vec3::ONE);
        assert!(corner.abs_diff_eq(Vec3::new(5.0, 0.1, 0.01), 1e-6));
    }
}
