use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use raymarch_engine::device::GpuInit;
use raymarch_engine::render::CoverGeometry;
use raymarch_engine::window::RuntimeConfig;
use winit::dpi::LogicalSize;

#[derive(Parser, Debug)]
#[command(name = "raymarch-viewer", about = "Full-screen raymarching shader viewer")]
pub struct Cli {
    /// Directory the shader files are read from
    #[arg(long, default_value = "shaders")]
    pub shader_dir: PathBuf,

    /// Vertex shader file, relative to --shader-dir
    #[arg(long, default_value = "main.vert")]
    pub vert: PathBuf,

    /// Fragment shader file, relative to --shader-dir
    #[arg(long, default_value = "main.frag")]
    pub frag: PathBuf,

    /// Geometry used to cover the window
    #[arg(long, value_enum, default_value_t = GeometryArg::Quad)]
    pub geometry: GeometryArg,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,

    /// Start with the render loop running instead of paused
    #[arg(long)]
    pub running: bool,

    /// Present without waiting for vsync
    #[arg(long)]
    pub no_vsync: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum GeometryArg {
    /// Two triangles
    Quad,
    /// One oversized triangle
    Triangle,
}

impl From<GeometryArg> for CoverGeometry {
    fn from(g: GeometryArg) -> Self {
        match g {
            GeometryArg::Quad => CoverGeometry::Quad,
            GeometryArg::Triangle => CoverGeometry::Triangle,
        }
    }
}

impl Cli {
    pub fn vertex_path(&self) -> PathBuf {
        self.shader_dir.join(&self.vert)
    }

    pub fn fragment_path(&self) -> PathBuf {
        self.shader_dir.join(&self.frag)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: LogicalSize::new(self.width.max(1.0), self.height.max(1.0)),
            ..RuntimeConfig::default()
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        let present_mode = if self.no_vsync {
            wgpu::PresentMode::AutoNoVsync
        } else {
            wgpu::PresentMode::Fifo
        };
        GpuInit {
            present_mode,
            ..GpuInit::default()
        }
    }
}
