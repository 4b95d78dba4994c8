use anyhow::Result;

mod camera;
mod config;
mod demo;
mod engine;
mod projection;
mod rendering;
mod scene;
mod ui;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    pollster::block_on(window::run(config::DemoConfig::default()))?;

    Ok(())
}
