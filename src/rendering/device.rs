//! The graphics capabilities the demo consumes.
//!
//! `GraphicsDevice` creates resources once at startup, `RenderContext` records one frame.
//! Both are implemented over wgpu in `wgpu_backend` and by recording mocks in tests.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferDesc {
    pub label: &'static str,
    pub size: u64,
    pub usage: wgpu::BufferUsages,
}

#[derive(Debug, Clone)]
pub struct PipelineDesc<'a> {
    pub label: &'static str,
    pub shader_path: &'a Path,
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'static>],
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub convert_output_to_gamma: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearValues {
    pub color: [f32; 4],
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawIndexedAttribs {
    pub num_indices: u32,
    pub num_instances: u32,
}

pub trait GraphicsDevice {
    type Buffer;
    type Texture;
    type Pipeline;
    type Bindings;

    fn create_buffer(&self, desc: &BufferDesc) -> anyhow::Result<Self::Buffer>;

    fn create_buffer_init(&self, desc: &BufferDesc, contents: &[u8])
        -> anyhow::Result<Self::Buffer>;

    fn load_texture(&self, path: &Path) -> anyhow::Result<Self::Texture>;

    fn create_pipeline(&self, desc: &PipelineDesc) -> anyhow::Result<Self::Pipeline>;

    /// Binds the vertex constants and the pixel texture to the pipeline's resource slots.
    fn create_bindings(
        &self,
        pipeline: &Self::Pipeline,
        constants: &Self::Buffer,
        texture: &Self::Texture,
    ) -> anyhow::Result<Self::Bindings>;
}

pub trait RenderContext<D: GraphicsDevice> {
    fn update_buffer(&mut self, buffer: &D::Buffer, data: &[u8]);

    fn clear(&mut self, values: ClearValues);

    fn set_vertex_buffers(&mut self, buffers: &[&D::Buffer]);

    fn set_index_buffer(&mut self, buffer: &D::Buffer);

    fn set_pipeline(&mut self, pipeline: &D::Pipeline);

    fn commit_bindings(&mut self, bindings: &D::Bindings);

    fn draw_indexed(&mut self, attribs: DrawIndexedAttribs) -> anyhow::Result<()>;
}
