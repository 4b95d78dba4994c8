use std::path::Path;

use anyhow::Context;

use crate::{
    camera::VsConstants,
    rendering::{
        cube::{cube_geometry, CubeVertex},
        device::{BufferDesc, GraphicsDevice, PipelineDesc},
        instance::{instance_buffer_size, InstanceData},
        texture::DepthTexture,
    },
};

pub struct ResourceSettings<'a> {
    pub shader_path: &'a Path,
    pub texture_path: &'a Path,
    pub color_format: wgpu::TextureFormat,
    pub convert_output_to_gamma: bool,
}

/// Everything the instanced draw needs, created once before the first frame.
pub struct InstancingResources<D: GraphicsDevice> {
    pub(crate) pipeline: D::Pipeline,
    pub(crate) bindings: D::Bindings,
    pub(crate) vs_constants: D::Buffer,
    pub(crate) cube_vertices: D::Buffer,
    pub(crate) cube_indices: D::Buffer,
    pub(crate) instance_buffer: D::Buffer,
    pub(crate) convert_output_to_gamma: bool,
}

impl<D: GraphicsDevice> InstancingResources<D> {
    pub fn create(device: &D, settings: &ResourceSettings) -> anyhow::Result<Self> {
        let (pipeline, vs_constants) = Self::create_pipeline_state(device, settings)?;

        let cube = cube_geometry();
        let vertex_data: &[u8] = bytemuck::cast_slice(&cube.vertices);
        let index_data: &[u8] = bytemuck::cast_slice(&cube.indices);

        let cube_vertices = device.create_buffer_init(
            &BufferDesc {
                label: "Cube vertex buffer",
                size: vertex_data.len() as u64,
                usage: wgpu::BufferUsages::VERTEX,
            },
            vertex_data,
        )?;
        let cube_indices = device.create_buffer_init(
            &BufferDesc {
                label: "Cube index buffer",
                size: index_data.len() as u64,
                usage: wgpu::BufferUsages::INDEX,
            },
            index_data,
        )?;

        let texture = device.load_texture(settings.texture_path)?;
        let bindings = device
            .create_bindings(&pipeline, &vs_constants, &texture)
            .context("Failed to create shader resource binding")?;

        let instance_buffer = Self::create_instance_buffer(device)?;

        log::info!(
            "Created instancing resources (gamma conversion: {})",
            settings.convert_output_to_gamma
        );

        Ok(Self {
            pipeline,
            bindings,
            vs_constants,
            cube_vertices,
            cube_indices,
            instance_buffer,
            convert_output_to_gamma: settings.convert_output_to_gamma,
        })
    }

    fn create_pipeline_state(
        device: &D,
        settings: &ResourceSettings,
    ) -> anyhow::Result<(D::Pipeline, D::Buffer)> {
        let pipeline = device
            .create_pipeline(&PipelineDesc {
                label: "Cube instancing pipeline",
                shader_path: settings.shader_path,
                vertex_layouts: &[CubeVertex::LAYOUT, InstanceData::LAYOUT],
                color_format: settings.color_format,
                depth_format: DepthTexture::DEPTH_FORMAT,
                convert_output_to_gamma: settings.convert_output_to_gamma,
            })
            .context("Failed to create cube pipeline")?;

        let vs_constants = device.create_buffer(&BufferDesc {
            label: "VS constants CB",
            size: VsConstants::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })?;

        Ok((pipeline, vs_constants))
    }

    fn create_instance_buffer(device: &D) -> anyhow::Result<D::Buffer> {
        device.create_buffer(&BufferDesc {
            label: "Instance data buffer",
            size: instance_buffer_size(),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::rendering::device::mock::{Created, MockDevice};

    fn settings<'a>(shader: &'a Path, texture: &'a Path) -> ResourceSettings<'a> {
        ResourceSettings {
            shader_path: shader,
            texture_path: texture,
            color_format: wgpu::TextureFormat::Bgra8UnormSrgb,
            convert_output_to_gamma: false,
        }
    }

    #[test]
    fn creates_buffers_with_expected_sizes() {
        let device = MockDevice::default();
        let (shader, texture) = (PathBuf::from("cube.wgsl"), PathBuf::from("logo.png"));
        let resources = InstancingResources::create(&device, &settings(&shader, &texture)).unwrap();

        let constants = device.buffer(resources.vs_constants);
        assert_eq!(constants.size, 128);
        assert!(constants.usage.contains(wgpu::BufferUsages::UNIFORM));

        let instances = device.buffer(resources.instance_buffer);
        assert_eq!(instances.size, 22 * 64);
        assert_eq!(
            instances.usage,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST
        );

        assert_eq!(device.buffer(resources.cube_vertices).size, 24 * 20);
        assert_eq!(device.buffer(resources.cube_indices).size, 36 * 4);
    }

    #[test]
    fn pipeline_has_per_vertex_and_per_instance_streams() {
        let device = MockDevice::default();
        let (shader, texture) = (PathBuf::from("cube.wgsl"), PathBuf::from("logo.png"));
        let resources = InstancingResources::create(&device, &settings(&shader, &texture)).unwrap();

        let created = device.created.borrow();
        let Created::Pipeline { attributes, .. } = &created[resources.pipeline] else {
            panic!("pipeline handle points at {:?}", created[resources.pipeline]);
        };

        assert_eq!(attributes.len(), 6);
        let per_instance: Vec<u32> = attributes
            .iter()
            .filter(|(_, step)| *step == wgpu::VertexStepMode::Instance)
            .map(|(location, _)| *location)
            .collect();
        assert_eq!(per_instance, vec![2, 3, 4, 5]);
    }

    #[test]
    fn bindings_reference_constants_and_texture() {
        let device = MockDevice::default();
        let (shader, texture) = (PathBuf::from("cube.wgsl"), PathBuf::from("logo.png"));
        let resources = InstancingResources::create(&device, &settings(&shader, &texture)).unwrap();

        let created = device.created.borrow();
        let Created::Bindings {
            pipeline,
            constants,
            texture,
        } = created[resources.bindings]
        else {
            panic!("bindings handle points at {:?}", created[resources.bindings]);
        };

        assert_eq!(pipeline, resources.pipeline);
        assert_eq!(constants, resources.vs_constants);
        assert!(matches!(&created[texture], Created::Texture(path) if path == "logo.png"));
    }

    #[test]
    fn texture_failure_aborts_setup() {
        let device = MockDevice {
            fail_textures: true,
            ..Default::default()
        };
        let (shader, texture) = (PathBuf::from("cube.wgsl"), PathBuf::from("missing.png"));
        let result = InstancingResources::create(&device, &settings(&shader, &texture));
        assert!(result.is_err());
    }
}
