use bytemuck::{Pod, Zeroable};
use glam::Mat4;

pub const INSTANCE_COUNT: usize = 22;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model: Mat4,
}

impl InstanceData {
    pub const SIZE: u64 = size_of::<InstanceData>() as u64;

    /// Per-instance stream. The matrix is fed as four vec4 attributes at locations 2..=5.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<InstanceData>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: size_of::<[f32; 4]>() as wgpu::BufferAddress,
                shader_location: 3,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: size_of::<[f32; 8]>() as wgpu::BufferAddress,
                shader_location: 4,
                format: wgpu::VertexFormat::Float32x4,
            },
            wgpu::VertexAttribute {
                offset: size_of::<[f32; 12]>() as wgpu::BufferAddress,
                shader_location: 5,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

pub fn instance_buffer_size() -> u64 {
    InstanceData::SIZE * INSTANCE_COUNT as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_one_matrix() {
        assert_eq!(InstanceData::SIZE, 64);
        assert_eq!(instance_buffer_size(), 64 * 22);
    }

    #[test]
    fn layout_covers_matrix_columns() {
        let layout = InstanceData::LAYOUT;
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(layout.array_stride, 64);

        let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![2, 3, 4, 5]);

        let offsets: Vec<u64> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 16, 32, 48]);
    }
}
