use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "xray-tracing")]
#[command(about = "Render a radiograph of OBJ meshes")]
pub struct Args {
    /// Scene description (YAML)
    #[arg(short, long, default_value = "scene.yaml")]
    pub config: PathBuf,

    /// Output image, .pgm is written as plain text, other extensions go through `image`
    #[arg(short, long, default_value = "radiology.pgm")]
    pub output: PathBuf,

    /// off, error, warn, info, debug or trace; `RUST_LOG` still applies per module
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Override the film's x resolution
    #[arg(long)]
    pub width: Option<usize>,

    /// Override the film's y resolution
    #[arg(long)]
    pub height: Option<usize>,
}
