//! Headless level export
//!
//! Usage:
//!   brickworks-render level.json level.png
//!   brickworks-render --cell-size 16 --grid level.json overview.png

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use brickworks::config::EditorConfig;
use brickworks::editor::RenderPipeline;
use brickworks::storage::LocalStorage;
use brickworks::world::{load_level, LevelStore};

#[derive(Parser)]
#[command(name = "brickworks-render")]
#[command(version, about = "Render a brickworks level document to a PNG")]
struct Cli {
    /// Config file (default: <config_dir>/brickworks/editor.ron)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pixels per tile (overrides the config)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=256))]
    cell_size: Option<u32>,

    /// Draw grid lines under the tiles
    #[arg(long)]
    grid: bool,

    /// Level document to render
    level: PathBuf,

    /// PNG to write
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(EditorConfig::default_path);
    let mut config = EditorConfig::load_or_default(&config_path);
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }

    render(&config, &cli.level, &cli.output, cli.grid)
}

fn render(config: &EditorConfig, level: &Path, output: &Path, grid: bool) -> Result<()> {
    let storage = LocalStorage::new();
    let parsed = load_level(&storage, level, config.world_dims())
        .with_context(|| format!("Failed to load {}", level.display()))?;
    let Some(parsed) = parsed else {
        bail!("No level at {}", level.display());
    };

    let report = parsed.report;
    if report.skipped() > 0 {
        warn!("{} entries skipped while loading", report.skipped());
    }

    let mut store = LevelStore::new(parsed.dims.width_tiles, parsed.dims.height_tiles);
    store.restore(parsed.entries);

    RenderPipeline::new()
        .export_png(&store, parsed.dims, grid, output)
        .with_context(|| format!("Failed to export {}", output.display()))?;
    info!("Rendered {} tiles", store.len());
    Ok(())
}
