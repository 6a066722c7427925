use anyhow::Result;
use clap::Parser;

use raymarch_engine::logging::{init_logging, LoggingConfig};
use raymarch_engine::shader::{ShaderSource, ShaderStage};
use raymarch_engine::window::Runtime;

mod camera;
mod cli;
mod render_loop;
mod viewer;

use cli::Cli;
use viewer::Viewer;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.verbose {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    });

    // Both files are read before any window or GPU work starts.
    let vertex = ShaderSource::load(&cli.vertex_path(), ShaderStage::Vertex)?;
    let fragment = ShaderSource::load(&cli.fragment_path(), ShaderStage::Fragment)?;
    log::info!("loaded {} and {}", vertex.name, fragment.name);

    let config = cli.runtime_config();
    let viewer = Viewer::new(
        config.title.clone(),
        vertex,
        fragment,
        cli.geometry.into(),
        cli.running,
    );

    Runtime::run(config, cli.gpu_init(), viewer)
}
