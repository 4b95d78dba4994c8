pub mod cube;
pub mod device;
pub mod frame;
pub mod imgui_renderer;
pub mod instance;
pub mod renderer;
pub mod resources;
pub mod shader_loader;
pub mod texture;
pub mod wgpu_backend;
