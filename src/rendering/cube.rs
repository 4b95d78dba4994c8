use std::mem::offset_of;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

pub const CUBE_INDEX_COUNT: u32 = 36;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    pub position: Vec3,
    pub tex_coords: Vec2,
}

impl CubeVertex {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<CubeVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: offset_of!(CubeVertex, position) as wgpu::BufferAddress,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: offset_of!(CubeVertex, tex_coords) as wgpu::BufferAddress,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };
}

pub struct CubeGeometry {
    pub vertices: Vec<CubeVertex>,
    pub indices: Vec<u32>,
}

/// Outward normal plus in-plane axes with `u x v == -normal`, so the corner order below
/// winds clockwise when the face is seen from outside.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    (Vec3::Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
];

const CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)];

/// A [-1, 1] cube with four vertices per face so every face gets the full texture.
pub fn cube_geometry() -> CubeGeometry {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(CUBE_INDEX_COUNT as usize);

    for (normal, u, v) in FACES {
        let base = vertices.len() as u32;

        vertices.extend(CORNERS.iter().map(|&(su, sv)| CubeVertex {
            position: normal + u * su + v * sv,
            tex_coords: Vec2::new((su + 1.0) * 0.5, (1.0 - sv) * 0.5),
        }));

        indices.extend([0, 1, 2, 0, 2, 3].map(|i| base + i));
    }

    CubeGeometry { vertices, indices }
}
