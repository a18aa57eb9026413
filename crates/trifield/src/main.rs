mod app;
mod cli;

use anyhow::Result;
use clap::Parser;

use trifield_engine::logging::init_logging;
use trifield_engine::window::Runtime;

use app::TrifieldApp;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.logging());

    let runtime = cli.runtime();
    log::info!(
        "starting with {} triangles (seed: {:?})",
        cli.triangles,
        cli.seed
    );

    let app = TrifieldApp::new(runtime.title.clone(), cli.renderer());
    Runtime::run(runtime, cli.gpu(), app)
}
