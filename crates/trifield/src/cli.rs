use clap::Parser;
use winit::dpi::LogicalSize;

use trifield_engine::device::GpuInit;
use trifield_engine::logging::LoggingConfig;
use trifield_engine::render::{DEFAULT_TRIANGLE_COUNT, Oscillator, RendererConfig};
use trifield_engine::window::RuntimeConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "trifield")]
#[command(about = "Animated field of random flat-colored triangles", long_about = None)]
pub struct Cli {
    /// Number of triangles to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIANGLE_COUNT)]
    pub triangles: u32,

    /// Fixed RNG seed for a reproducible scene
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-frame translation step
    #[arg(long, default_value_t = Oscillator::DEFAULT_STEP)]
    pub step: f32,

    /// Present without waiting for vertical sync
    #[arg(long = "no-vsync")]
    pub no_vsync: bool,

    /// Log filter, `env_logger` syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..Default::default()
        }
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            initial_size: LogicalSize::new(self.width, self.height),
            ..Default::default()
        }
    }

    pub fn gpu(&self) -> GpuInit {
        GpuInit {
            vsync: !self.no_vsync,
        }
    }

    pub fn renderer(&self) -> RendererConfig {
        RendererConfig {
            triangle_count: self.triangles,
            seed: self.seed,
            step: self.step,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["trifield"]);
        let renderer = cli.renderer();
        assert_eq!(renderer.triangle_count, 1_000_000);
        assert_eq!(renderer.seed, None);
        assert_eq!(renderer.step, 0.01);
        assert!(cli.gpu().vsync);
    }

    #[test]
    fn overrides() {
        let cli = Cli::parse_from([
            "trifield", "-n", "100", "--seed", "7", "--step", "0.02", "--no-vsync",
        ]);
        let renderer = cli.renderer();
        assert_eq!(renderer.triangle_count, 100);
        assert_eq!(renderer.seed, Some(7));
        assert_eq!(renderer.step, 0.02);
        assert!(!cli.gpu().vsync);
    }
}
