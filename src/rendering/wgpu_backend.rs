use std::path::Path;

use anyhow::Context;
use wgpu::util::DeviceExt;

use crate::rendering::{
    device::{
        BufferDesc, ClearValues, DrawIndexedAttribs, GraphicsDevice, PipelineDesc, RenderContext,
    },
    shader_loader::compile_file,
    texture::Texture,
};

pub struct Gpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsDevice for Gpu {
    type Buffer = wgpu::Buffer;
    type Texture = Texture;
    type Pipeline = wgpu::RenderPipeline;
    type Bindings = wgpu::BindGroup;

    fn create_buffer(&self, desc: &BufferDesc) -> anyhow::Result<wgpu::Buffer> {
        Ok(self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(desc.label),
            size: desc.size,
            usage: desc.usage,
            mapped_at_creation: false,
        }))
    }

    fn create_buffer_init(&self, desc: &BufferDesc, contents: &[u8]) -> anyhow::Result<wgpu::Buffer> {
        anyhow::ensure!(
            contents.len() as u64 == desc.size,
            "{}: expected {} bytes of initial data, got {}",
            desc.label,
            desc.size,
            contents.len()
        );

        Ok(self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(desc.label),
                contents,
                usage: desc.usage,
            }))
    }

    fn load_texture(&self, path: &Path) -> anyhow::Result<Texture> {
        Texture::load(&self.device, &self.queue, path)
    }

    fn create_pipeline(&self, desc: &PipelineDesc) -> anyhow::Result<wgpu::RenderPipeline> {
        let constants = [(
            "CONVERT_TO_GAMMA",
            if desc.convert_output_to_gamma { 1.0 } else { 0.0 },
        )];

        compile_file(&self.device, desc.shader_path, |device, shader| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                // Derived from the shader so bindings can be looked up by group like static variables.
                layout: None,
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: desc.vertex_layouts,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: desc.color_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions {
                        constants: &constants,
                        ..Default::default()
                    },
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Cw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: desc.depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        })
    }

    fn create_bindings(
        &self,
        pipeline: &wgpu::RenderPipeline,
        constants: &wgpu::Buffer,
        texture: &Texture,
    ) -> anyhow::Result<wgpu::BindGroup> {
        let layout = pipeline.get_bind_group_layout(0);

        Ok(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube shader resource binding"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: constants.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        }))
    }
}

/// Records one frame into `encoder`. Bound state is collected until `draw_indexed`
/// opens the render pass, with any pending clear folded into its load ops.
pub struct FrameRecorder<'a> {
    queue: &'a wgpu::Queue,
    encoder: &'a mut wgpu::CommandEncoder,
    color: &'a wgpu::TextureView,
    depth: &'a wgpu::TextureView,

    pending_clear: Option<ClearValues>,
    vertex_buffers: Vec<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    pipeline: Option<wgpu::RenderPipeline>,
    bindings: Option<wgpu::BindGroup>,
}

impl<'a> FrameRecorder<'a> {
    pub fn new(
        queue: &'a wgpu::Queue,
        encoder: &'a mut wgpu::CommandEncoder,
        color: &'a wgpu::TextureView,
        depth: &'a wgpu::TextureView,
    ) -> Self {
        Self {
            queue,
            encoder,
            color,
            depth,
            pending_clear: None,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            pipeline: None,
            bindings: None,
        }
    }

    fn begin_pass(&mut self) -> wgpu::RenderPass<'_> {
        let (color_load, depth_load) = match self.pending_clear.take() {
            Some(clear) => {
                let [r, g, b, a] = clear.color.map(f64::from);
                (
                    wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    wgpu::LoadOp::Clear(clear.depth),
                )
            }
            None => (wgpu::LoadOp::Load, wgpu::LoadOp::Load),
        };

        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Instanced cubes pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth,
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        })
    }

    /// Flushes a clear that no draw consumed.
    pub fn finish(mut self) {
        if self.pending_clear.is_some() {
            self.begin_pass();
        }
    }
}

impl RenderContext<Gpu> for FrameRecorder<'_> {
    fn update_buffer(&mut self, buffer: &wgpu::Buffer, data: &[u8]) {
        self.queue.write_buffer(buffer, 0, data);
    }

    fn clear(&mut self, values: ClearValues) {
        self.pending_clear = Some(values);
    }

    fn set_vertex_buffers(&mut self, buffers: &[&wgpu::Buffer]) {
        self.vertex_buffers = buffers.iter().map(|&buffer| buffer.clone()).collect();
    }

    fn set_index_buffer(&mut self, buffer: &wgpu::Buffer) {
        self.index_buffer = Some(buffer.clone());
    }

    fn set_pipeline(&mut self, pipeline: &wgpu::RenderPipeline) {
        self.pipeline = Some(pipeline.clone());
    }

    fn commit_bindings(&mut self, bindings: &wgpu::BindGroup) {
        self.bindings = Some(bindings.clone());
    }

    fn draw_indexed(&mut self, attribs: DrawIndexedAttribs) -> anyhow::Result<()> {
        let pipeline = self.pipeline.clone().context("No pipeline bound")?;
        let bindings = self.bindings.clone().context("No shader resources committed")?;
        let index_buffer = self.index_buffer.clone().context("No index buffer bound")?;
        let vertex_buffers = self.vertex_buffers.clone();

        let mut render_pass = self.begin_pass();
        render_pass.set_pipeline(&pipeline);
        render_pass.set_bind_group(0, &bindings, &[]);

        for (slot, buffer) in vertex_buffers.iter().enumerate() {
            render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }

        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..attribs.num_indices, 0, 0..attribs.num_instances);

        Ok(())
    }
}
