use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::projection::Projection;

const DRAG_SENSITIVITY: f32 = 0.005;
const WHEEL_ZOOM_STEP: f32 = 2.0;
const PAN_SPEED: f32 = 5.0;
pub const PITCH_LIMIT: f32 = 1.57 * 0.99;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Input sampled from the UI layer for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// Left-button drag movement since the previous frame, if dragging.
    pub drag_delta: Option<Vec2>,
    pub wheel: f32,
    pub pan_up: bool,
    pub pan_down: bool,
    pub pan_left: bool,
    pub pan_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    FrontRight,
    TopFront,
    FrontLeft,
    Right,
    Top,
    Front,
    Left,
    Bottom,
    Back,
    RightBottom,
    FrontBottom,
    LeftBottom,
}

impl ViewPreset {
    /// (yaw, pitch) in radians.
    pub fn angles(self) -> (f32, f32) {
        match self {
            ViewPreset::FrontRight => (FRAC_PI_4, FRAC_PI_4),
            ViewPreset::TopFront => (0.0, FRAC_PI_4),
            ViewPreset::FrontLeft => (-FRAC_PI_4, FRAC_PI_4),
            ViewPreset::Right => (FRAC_PI_2, 0.0),
            ViewPreset::Top => (0.0, FRAC_PI_2),
            ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Left => (-FRAC_PI_2, 0.0),
            ViewPreset::Bottom => (0.0, -FRAC_PI_2),
            ViewPreset::Back => (PI, 0.0),
            ViewPreset::RightBottom => (FRAC_PI_4, -FRAC_PI_4),
            ViewPreset::FrontBottom => (0.0, -FRAC_PI_4),
            ViewPreset::LeftBottom => (-FRAC_PI_4, -FRAC_PI_4),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewPreset::FrontRight => "Front-Right",
            ViewPreset::TopFront => "Top-Front",
            ViewPreset::FrontLeft => "Front-Left",
            ViewPreset::Right => "Right",
            ViewPreset::Top => "Top",
            ViewPreset::Front => "Front",
            ViewPreset::Left => "Left",
            ViewPreset::Bottom => "Bottom",
            ViewPreset::Back => "Back",
            ViewPreset::RightBottom => "Right-Bottom",
            ViewPreset::FrontBottom => "Front-Bottom",
            ViewPreset::LeftBottom => "Left-Bottom",
        }
    }
}

/// Camera orbiting `target` on a sphere of radius `distance`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 20.0,
            target: Vec3::new(0.0, -4.0, 0.0),
        }
    }
}

impl OrbitCamera {
    pub fn update(&mut self, input: &CameraInput, delta_time: f32) {
        if let Some(drag) = input.drag_delta {
            self.yaw += drag.x * DRAG_SENSITIVITY;
        }

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        if input.wheel.abs() > 0.0 {
            self.distance =
                (self.distance - input.wheel * WHEEL_ZOOM_STEP).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }

        let basis = self.basis();
        let pan_step = PAN_SPEED * delta_time;

        if input.pan_up {
            self.target += basis.up * pan_step;
        }
        if input.pan_down {
            self.target -= basis.up * pan_step;
        }
        if input.pan_right {
            self.target += basis.right * pan_step;
        }
        if input.pan_left {
            self.target -= basis.right * pan_step;
        }
    }

    /// Jumps straight to a canonical orientation. Pitch is clamped on the next update.
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let (yaw, pitch) = preset.angles();
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }

    pub fn basis(&self) -> CameraBasis {
        let forward = (self.target - self.position()).normalize();
        let right = Vec3::Y.cross(forward).normalize();
        let up = forward.cross(right);

        CameraBasis { right, up, forward }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let CameraBasis { right, up, forward } = self.basis();
        let position = self.position();

        // Rows are the camera axes; glam stores columns.
        Mat4::from_cols(
            Vec4::new(right.x, up.x, forward.x, 0.0),
            Vec4::new(right.y, up.y, forward.y, 0.0),
            Vec4::new(right.z, up.z, forward.z, 0.0),
            Vec4::new(
                -right.dot(position),
                -up.dot(position),
                -forward.dot(position),
                1.0,
            ),
        )
    }

    pub fn view_projection(&self, projection: &Projection) -> Mat4 {
        projection.matrix() * projection.pretransform() * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct VsConstants {
    pub view_proj: Mat4,
    pub rotation: Mat4,
}

impl VsConstants {
    pub const SIZE: u64 = size_of::<VsConstants>() as u64;

    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj,
            rotation: Mat4::IDENTITY,
        }
    }
}

impl Default for VsConstants {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}
