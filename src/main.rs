//! Take a radiograph of the meshes described in a scene file
use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use log::info;

use xray_tracing::prelude::*;

mod cli;

use cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level)
        .init();

    let mut config = SceneConfig::load(&args.config)
        .with_context(|| format!("loading scene {}", args.config.display()))?;
    if let Some(width) = args.width {
        config.film.x_resolution = width;
    }
    if let Some(height) = args.height {
        config.film.y_resolution = height;
    }
    info!(
        "film {}x{} at z = {}, extent {}",
        config.film.x_resolution, config.film.y_resolution, config.film.z, config.film.extent
    );

    let scene = Scene::from_config(config).context("building scene")?;

    let mut machine = XRayMachine::new();
    if !args.no_progress {
        machine = machine.with_progress(ProgressBar::new(scene.film.x_resolution as u64));
    }

    let film = scene.render(&machine).context("scanning")?;
    film.save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    Ok(())
}
