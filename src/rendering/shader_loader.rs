use std::path::Path;

use anyhow::Context;
use pollster::block_on;
use wgpu::PollType;

/// Reads a WGSL file and hands the source to `build`, failing on any validation error
/// wgpu reports while the pipeline is created.
pub(crate) fn compile_file<T, F>(device: &wgpu::Device, path: &Path, build: F) -> anyhow::Result<T>
where
    F: FnOnce(&wgpu::Device, &wgpu::ShaderModule) -> T,
{
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shader file {}", path.display()))?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.file_name().and_then(|name| name.to_str()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let output = build(device, &module);

    device
        .poll(PollType::Wait)
        .context("Failed to poll device after shader compilation.")?;

    if let Some(error) = block_on(device.pop_error_scope()) {
        return Err(anyhow::anyhow!(
            "Shader compilation failed for {}: {}",
            path.display(),
            error
        ));
    }

    log::debug!("Compiled shader {}", path.display());

    Ok(output)
}
