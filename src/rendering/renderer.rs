use std::sync::Arc;

use anyhow::Context;
use wgpu::CommandEncoderDescriptor;
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    config::DemoConfig,
    demo::DemoState,
    projection::Projection,
    rendering::{
        imgui_renderer::ImguiRendererState,
        resources::{InstancingResources, ResourceSettings},
        texture::DepthTexture,
        wgpu_backend::{FrameRecorder, Gpu},
    },
};

/// Prefers an sRGB format and takes the first present and alpha mode the surface offers.
fn surface_configuration(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .or_else(|| caps.formats.first().copied())
        .context("Surface reports no supported formats")?;
    let present_mode = caps
        .present_modes
        .first()
        .copied()
        .context("Surface reports no present modes")?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .context("Surface reports no alpha modes")?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

pub struct Renderer {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    gpu: Gpu,

    depth_texture: DepthTexture,
    instancing: InstancingResources<Gpu>,
    imgui_renderer: ImguiRendererState,
    clear_color: [f32; 4],
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        config: &DemoConfig,
        imgui_context: &mut imgui::Context,
    ) -> anyhow::Result<Renderer> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable graphics adapter")?;

        log::info!("Using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create device")?;

        let surface_config = surface_configuration(&surface.get_capabilities(&adapter), size)?;
        let surface_format = surface_config.format;
        surface.configure(&device, &surface_config);

        log::info!("Surface format {:?}", surface_format);

        let gpu = Gpu { device, queue };

        let depth_texture = DepthTexture::new(&gpu.device, &surface_config, "Depth Texture");

        let instancing = InstancingResources::create(
            &gpu,
            &ResourceSettings {
                shader_path: &config.shader_path,
                texture_path: &config.texture_path,
                color_format: surface_format,
                convert_output_to_gamma: config.convert_output_to_gamma(surface_format),
            },
        )?;

        let imgui_renderer =
            ImguiRendererState::new(&gpu.device, &gpu.queue, surface_format, imgui_context);

        Ok(Self {
            window,
            size,
            surface,
            surface_config,
            gpu,
            depth_texture,
            instancing,
            imgui_renderer,
            clear_color: config.clear_color,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu.device, &self.surface_config);
            self.depth_texture
                .resize(&self.gpu.device, &self.surface_config);
        }
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.size.width, self.size.height)
    }

    /// Draws the cubes and then the UI. Surface errors are returned as `wgpu::SurfaceError`
    /// inside the `anyhow::Error` so the caller can recover from them.
    pub fn render(
        &mut self,
        demo_state: &DemoState,
        imgui_context: &mut imgui::Context,
    ) -> anyhow::Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut frame = FrameRecorder::new(
            &self.gpu.queue,
            &mut encoder,
            &view,
            self.depth_texture.view(),
        );
        self.instancing.render(
            &mut frame,
            &demo_state.scene,
            &demo_state.vs_constants,
            self.clear_color,
        )?;
        frame.finish();

        self.imgui_renderer.render(
            &view,
            imgui_context,
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
        )?;

        self.gpu.queue.submit([encoder.finish()]);
        output.present();

        Ok(())
    }
}
