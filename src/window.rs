use std::{sync::Arc, time::Instant};

use anyhow::Context;
use imgui::{FontConfig, FontSource};
use imgui_winit_support::WinitPlatform;
use winit::{
    application::ApplicationHandler,
    event::{Event, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{config::DemoConfig, demo::DemoState, engine, rendering::renderer::Renderer};

struct ImguiState {
    context: imgui::Context,
    platform: WinitPlatform,
}

struct App {
    config: DemoConfig,
    renderer: Option<Renderer>,
    demo_state: DemoState,
    imgui: Option<ImguiState>,
    last_frame: Instant,
    fatal_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: DemoConfig) -> Self {
        let demo_state = DemoState::new(&config);

        Self {
            config,
            renderer: None,
            demo_state,
            imgui: None,
            last_frame: Instant::now(),
            fatal_error: None,
        }
    }

    fn setup_imgui(window: &Window) -> ImguiState {
        let mut context = imgui::Context::create();
        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(
            context.io_mut(),
            window,
            imgui_winit_support::HiDpiMode::Default,
        );

        let font_size = 14.0;
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: font_size,
                ..Default::default()
            }),
        }]);

        // Disable INI support because it's broken in the published version of imgui
        context.set_ini_filename(None);

        ImguiState { context, platform }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes().with_title("Tutorial: Instancing");
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let mut imgui = Self::setup_imgui(&window);
        let renderer = pollster::block_on(Renderer::new(
            window,
            &self.config,
            &mut imgui.context,
        ))?;

        self.imgui = Some(imgui);
        self.renderer = Some(renderer);
        self.last_frame = Instant::now();

        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.fatal_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(imgui)) = (self.renderer.as_mut(), self.imgui.as_mut()) else {
            return;
        };

        let now = Instant::now();
        imgui
            .context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        renderer.window.request_redraw();

        if let Err(e) = imgui
            .platform
            .prepare_frame(imgui.context.io_mut(), &renderer.window)
        {
            log::error!("Failed to prepare Imgui frame: {}", e);
            return;
        }

        let ui = imgui.context.new_frame();

        if let Err(e) = engine::update(&mut self.demo_state, &renderer.projection(), ui) {
            self.fail(event_loop, e.context("Error during engine::update"));
            return;
        }

        imgui.platform.prepare_render(ui, &renderer.window);

        let Err(error) = renderer.render(&self.demo_state, &mut imgui.context) else {
            return;
        };

        match error.downcast_ref::<wgpu::SurfaceError>() {
            Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size);
            }
            Some(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory");
                event_loop.exit();
            }
            Some(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
            }
            Some(other) => {
                log::error!("Unexpected surface error: {:?}", other);
            }
            None => self.fail(event_loop, error.context("Failed to render frame")),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e.context("Failed to initialize the sample"));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(*new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => (),
        }

        if let (Some(renderer), Some(imgui)) = (self.renderer.as_ref(), self.imgui.as_mut()) {
            imgui.platform.handle_event::<()>(
                imgui.context.io_mut(),
                renderer.window.as_ref(),
                &Event::WindowEvent { window_id, event },
            );
        }
    }
}

pub async fn run(config: DemoConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.fatal_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
