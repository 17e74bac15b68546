//! Per-frame level rendering
//!
//! Each frame: visible range from the camera, range query on the store,
//! one renderer call per tile. A failing tile is logged and counted; the
//! frame always completes.

use std::path::Path;

use log::{info, warn};

use super::camera::{Camera, CameraTransform, Viewport};
use super::tiles::TileRegistry;
use crate::rasterizer::{Canvas, Framebuffer};
use crate::ui::theme;
use crate::world::{LevelStore, WorldDimensions};

/// Largest image `export_png` will allocate, in pixels
pub const MAX_EXPORT_PIXELS: u64 = 256 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("world is {width}x{height} pixels, larger than the export limit")]
    TooLarge { width: i64, height: i64 },
    #[error("world has no area to export")]
    Empty,
    #[error("could not write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Entries returned by the visible-range query
    pub visible: usize,
    /// Tiles drawn successfully
    pub drawn: usize,
    /// Entries in range whose cell does not touch the viewport
    pub culled: usize,
    /// Tiles whose renderer returned an error
    pub failed: usize,
}

#[derive(Clone, Default)]
pub struct RenderPipeline {
    registry: TileRegistry,
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            registry: TileRegistry::new(),
        }
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Draw every visible tile into the viewport area of `canvas`
    pub fn render_frame(
        &self,
        canvas: &mut dyn Canvas,
        store: &LevelStore,
        transform: &CameraTransform,
        viewport: Viewport,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        let view = viewport.rect();

        let cols = transform.visible_column_range(viewport.width);
        let rows = transform.visible_row_range(viewport.height);

        // Tiles never spill out of the editing area
        let previous = canvas.clip();
        let clip = match previous {
            Some(outer) => outer.intersection(&view),
            None => Some(view),
        };
        let Some(clip) = clip else {
            return stats;
        };
        canvas.set_clip(Some(clip));

        for (coord, tile) in store.entries_in_range(cols, rows) {
            stats.visible += 1;
            let rect = transform.cell_rect(coord);
            if !rect.intersects(&view) {
                stats.culled += 1;
                continue;
            }
            match self.registry.draw(tile, canvas, rect) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    warn!("Error drawing tile {} at {}: {}", tile, coord, e);
                    stats.failed += 1;
                }
            }
        }

        canvas.set_clip(previous);
        stats
    }

    /// Grid overlay for the visible range
    pub fn draw_grid(&self, canvas: &mut dyn Canvas, transform: &CameraTransform, viewport: Viewport) {
        let width = viewport.width as i32;
        let height = viewport.height as i32;

        for col in transform.visible_column_range(viewport.width) {
            let (x, _) = transform.world_to_screen(col, 0);
            if (0..=width).contains(&x) {
                canvas.line(x, 0, x, height, 1, theme::GRID_COLOR);
            }
        }
        for row in 0..=transform.dims.height_tiles {
            let (_, y) = transform.world_to_screen(0, row);
            if (0..=height).contains(&y) {
                canvas.line(0, y, width, y, 1, theme::GRID_COLOR);
            }
        }
    }

    /// Render the whole world at camera offset zero
    pub fn render_world(&self, store: &LevelStore, dims: WorldDimensions, grid: bool) -> Framebuffer {
        let width = dims.pixel_width().clamp(0, u32::MAX as i64) as u32;
        let height = dims.pixel_height().clamp(0, u32::MAX as i64) as u32;
        let viewport = Viewport::new(width, height);
        let transform = Camera::new().transform(dims);

        let mut fb = Framebuffer::new(width as usize, height as usize);
        fb.clear(theme::BACKGROUND);
        if grid {
            self.draw_grid(&mut fb, &transform, viewport);
        }
        let stats = self.render_frame(&mut fb, store, &transform, viewport);
        if stats.failed > 0 {
            warn!("{} tiles failed to render during export", stats.failed);
        }
        fb
    }

    /// Render the whole world and write it as a PNG
    pub fn export_png(
        &self,
        store: &LevelStore,
        dims: WorldDimensions,
        grid: bool,
        path: &Path,
    ) -> Result<(), ExportError> {
        let (width, height) = (dims.pixel_width(), dims.pixel_height());
        if width <= 0 || height <= 0 {
            return Err(ExportError::Empty);
        }
        if (width as u64).saturating_mul(height as u64) > MAX_EXPORT_PIXELS {
            return Err(ExportError::TooLarge { width, height });
        }
        let fb = self.render_world(store, dims, grid);
        fb.save_png(path)?;
        info!("Exported {}x{} image to {}", width, height, path.display());
        Ok(())
    }
}
