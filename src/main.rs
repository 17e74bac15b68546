//! brickworks: tile level editor window
//!
//! Left/A and Right/D scroll, left button paints, right button erases.
//! Ctrl+S saves, Ctrl+L reloads, Ctrl+Shift+S and Ctrl+O pick a file,
//! Ctrl+E exports a PNG, G toggles the grid.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, warn};
use macroquad::prelude::{get_frame_time, next_frame, screen_height, screen_width, Conf};

use brickworks::config::EditorConfig;
use brickworks::editor::{
    draw_cursor_coords, draw_status, EditorCommand, EditorController, EditorSession, FrameContext, LoadOutcome, Palette,
    RenderPipeline,
};
use brickworks::rasterizer::Canvas;
use brickworks::storage::LocalStorage;
use brickworks::ui::{load_bold_font, theme, InputState, Rect, ScreenCanvas};
use brickworks::VERSION;

#[derive(Parser, Debug)]
#[command(name = "brickworks", version, about = "Tile level editor for side-scrolling worlds")]
struct Args {
    /// Config file (default: <config_dir>/brickworks/editor.ron)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level document to edit, loaded on startup
    level: Option<PathBuf>,
}

impl Args {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(EditorConfig::default_path)
    }
}

fn window_conf() -> Conf {
    // Window size only; errors are reported once the logger is up
    let args = Args::parse();
    let config = EditorConfig::load(&args.config_path()).unwrap_or_default();
    Conf {
        window_title: format!("brickworks v{}", VERSION),
        window_width: config.screen_width as i32,
        window_height: config.screen_height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn window_size() -> (u32, u32) {
    (screen_width().max(0.0) as u32, screen_height().max(0.0) as u32)
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = EditorConfig::load_or_default(&args.config_path());

    let (width, height) = window_size();
    let level_path = args.level.clone().unwrap_or_else(|| config.level_path.clone());
    let mut session = EditorSession::new(
        config.world_dims(),
        config.viewport_for(width, height),
        LocalStorage::new(),
        level_path,
    );
    session.show_grid = config.show_grid;
    session.export_path = config.export_path.clone();

    if config.autoload || args.level.is_some() {
        let path = session.level_path.clone();
        match session.load(&path) {
            Ok(LoadOutcome::Fresh) => info!("Starting a new level at {}", path.display()),
            Ok(LoadOutcome::Loaded(report)) => debug!("Startup load: {:?}", report),
            Err(e) => warn!("Starting with an empty level: {}", e),
        }
    }

    let bold_font = load_bold_font(config.bold_font.as_deref());
    if bold_font.is_none() {
        warn!("No bold font found, tile glyphs use the default font");
    }

    let pipeline = RenderPipeline::new();
    let mut controller = EditorController::new();
    let mut palette_size = (width, height);
    let mut palette = Palette::new(config.palette_rect(width, height), config.cell_size);

    info!("=== brickworks v{} ===", VERSION);

    loop {
        let (width, height) = window_size();
        if (width, height) != palette_size {
            palette_size = (width, height);
            palette = Palette::new(config.palette_rect(width, height), config.cell_size);
        }
        session.set_viewport(config.viewport_for(width, height));
        session.tick(get_frame_time() as f64);

        // Input
        let input = InputState::poll();
        let ctx = FrameContext {
            transform: session.transform(),
            viewport: session.viewport(),
            palette: &palette,
            tool: session.tool,
            scroll_speed: config.scroll_speed,
        };
        for command in controller.update(&input, &ctx) {
            if let Some(command) = session.apply(command) {
                handle_host_command(&mut session, command);
            }
        }

        // Draw: background, grid, tiles, palette, overlays
        let mut canvas = ScreenCanvas::new(bold_font.as_ref());
        canvas.fill_rect(Rect::screen(width as i32, height as i32), theme::BACKGROUND);

        let transform = session.transform();
        let viewport = session.viewport();
        if session.show_grid {
            pipeline.draw_grid(&mut canvas, &transform, viewport);
        }
        pipeline.render_frame(&mut canvas, session.store(), &transform, viewport);
        palette.draw(&mut canvas, pipeline.registry(), session.tool);

        if let Some(message) = session.status() {
            if let Err(e) = draw_status(&mut canvas, message, palette.area()) {
                debug!("Status line not drawn: {}", e);
            }
        }

        let (mx, my) = input.mouse_pos();
        if viewport.rect().contains(mx, my) {
            let coord = transform.screen_to_world(mx, my);
            if let Err(e) = draw_cursor_coords(&mut canvas, (mx, my), coord, viewport) {
                debug!("Coordinate tooltip not drawn: {}", e);
            }
        }

        next_frame().await;
    }
}

/// Commands the session hands back: native file dialogs
#[cfg(not(target_arch = "wasm32"))]
fn handle_host_command(session: &mut EditorSession, command: EditorCommand) {
    let current = session.storage().resolve(&session.level_path);
    let directory = current.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let file_name = current
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "level.json".to_string());

    match command {
        EditorCommand::SaveAs => {
            let dialog = rfd::FileDialog::new()
                .add_filter("JSON Level", &["json"])
                .set_directory(&directory)
                .set_file_name(&file_name);

            if let Some(path) = dialog.save_file() {
                if session.save(&path).is_ok() {
                    session.level_path = path;
                }
            }
        }
        EditorCommand::Open => {
            let dialog = rfd::FileDialog::new()
                .add_filter("JSON Level", &["json"])
                .set_directory(&directory);

            if let Some(path) = dialog.pick_file() {
                if session.load(&path).is_ok() {
                    session.level_path = path;
                }
            }
        }
        other => debug!("{:?} needs no host handling", other),
    }
}

#[cfg(target_arch = "wasm32")]
fn handle_host_command(session: &mut EditorSession, command: EditorCommand) {
    debug!("{:?} unavailable in browser", command);
    session.set_status("File dialogs not available in browser", 3.0);
}
