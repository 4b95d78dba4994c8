use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Linear RGBA clear color.
    pub clear_color: [f32; 4],
    /// Radians per second applied to the instance rotation angle.
    pub instance_rotation_speed: f32,
    pub texture_path: PathBuf,
    pub shader_path: PathBuf,
    /// Forces linear to sRGB conversion in the pixel shader. `None` picks it from the surface format.
    pub convert_output_to_gamma: Option<bool>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            instance_rotation_speed: 0.0,
            texture_path: root.join("assets/logo.png"),
            shader_path: root.join("src/shaders/cube_inst.wgsl"),
            convert_output_to_gamma: None,
        }
    }
}

impl DemoConfig {
    pub fn convert_output_to_gamma(&self, surface_format: wgpu::TextureFormat) -> bool {
        self.convert_output_to_gamma
            .unwrap_or_else(|| !surface_format.is_srgb())
    }
}
