//! Horizontal scrolling camera and grid/screen coordinate mapping
//!
//! All math is integer. The camera only scrolls along X; screen Y maps
//! straight onto world rows.

use std::ops::Range;

use crate::ui::Rect;
use crate::world::{GridCoord, WorldDimensions};

/// Pixel size of the editing area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::screen(self.width as i32, self.height as i32)
    }
}

/// Scroll state of the editor view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Camera {
    /// Horizontal scroll in pixels, always within `0..=max_scroll`
    pub offset_x: i32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest valid offset for a world and viewport width
    pub fn max_scroll(dims: &WorldDimensions, viewport_width: u32) -> i32 {
        (dims.pixel_width() - viewport_width as i64).clamp(0, i32::MAX as i64) as i32
    }

    /// Move by `delta` pixels, clamped to the scrollable range
    pub fn scroll(&mut self, delta: i32, dims: &WorldDimensions, viewport_width: u32) {
        self.set_offset(self.offset_x as i64 + delta as i64, dims, viewport_width);
    }

    /// Jump to an absolute offset, clamped to the scrollable range
    pub fn set_offset(&mut self, offset: i64, dims: &WorldDimensions, viewport_width: u32) {
        let max = Camera::max_scroll(dims, viewport_width) as i64;
        self.offset_x = offset.clamp(0, max) as i32;
    }

    /// Re-establish the offset invariant after the world or viewport changed
    pub fn clamp_to(&mut self, dims: &WorldDimensions, viewport_width: u32) {
        self.set_offset(self.offset_x as i64, dims, viewport_width);
    }

    pub fn transform(&self, dims: WorldDimensions) -> CameraTransform {
        CameraTransform {
            offset_x: self.offset_x,
            dims,
        }
    }
}

/// Snapshot of camera + world used to map between grid and screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraTransform {
    pub offset_x: i32,
    pub dims: WorldDimensions,
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl CameraTransform {
    /// Top-left screen pixel of a grid cell (no bounds checking)
    pub fn world_to_screen(&self, grid_x: u32, grid_y: u32) -> (i32, i32) {
        let cell = self.dims.cell_size as i64;
        (
            saturate(grid_x as i64 * cell - self.offset_x as i64),
            saturate(grid_y as i64 * cell),
        )
    }

    /// Grid cell under a screen pixel, clamped into the world
    pub fn screen_to_world(&self, sx: i32, sy: i32) -> GridCoord {
        let cell = self.dims.cell_size as i64;
        if cell == 0 || self.dims.width_tiles == 0 || self.dims.height_tiles == 0 {
            return GridCoord::new(0, 0);
        }
        let gx = (sx as i64 + self.offset_x as i64).div_euclid(cell);
        let gy = (sy as i64).div_euclid(cell);
        GridCoord::new(
            gx.clamp(0, self.dims.width_tiles.saturating_sub(1) as i64) as u32,
            gy.clamp(0, self.dims.height_tiles.saturating_sub(1) as i64) as u32,
        )
    }

    /// Columns that may intersect a viewport of this width
    ///
    /// Includes one extra column for the partially visible cell at the
    /// right edge; the end is not clamped to the world.
    pub fn visible_column_range(&self, viewport_width: u32) -> Range<u32> {
        let cell = self.dims.cell_size;
        if cell == 0 {
            return 0..0;
        }
        let start = self.offset_x.max(0) as u32 / cell;
        let span = viewport_width.div_ceil(cell) + 1;
        start..start.saturating_add(span)
    }

    /// Rows that may intersect a viewport of this height
    pub fn visible_row_range(&self, viewport_height: u32) -> Range<u32> {
        let cell = self.dims.cell_size;
        if cell == 0 {
            return 0..0;
        }
        let span = viewport_height.div_ceil(cell) + 1;
        0..span.min(self.dims.height_tiles)
    }

    /// Screen rectangle covered by a cell
    pub fn cell_rect(&self, coord: GridCoord) -> Rect {
        let (x, y) = self.world_to_screen(coord.x, coord.y);
        let cell = self.dims.cell_size.min(i32::MAX as u32) as i32;
        Rect::new(x, y, cell, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> WorldDimensions {
        WorldDimensions::new(100, 24, 32)
    }

    #[test]
    fn test_coordinate_invertibility() {
        let t = Camera::new().transform(dims());
        let cell = t.screen_to_world(50, 70);
        assert_eq!(cell, GridCoord::new(1, 2));
        assert_eq!(t.world_to_screen(cell.x, cell.y), (32, 64));
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let t = CameraTransform { offset_x: 100, dims: dims() };
        assert_eq!(t.screen_to_world(0, 0), GridCoord::new(3, 0));
        assert_eq!(t.world_to_screen(3, 0), (-4, 0));
    }

    #[test]
    fn test_screen_to_world_clamps() {
        let t = Camera::new().transform(dims());
        assert_eq!(t.screen_to_world(-40, -5), GridCoord::new(0, 0));
        assert_eq!(t.screen_to_world(100_000, 100_000), GridCoord::new(99, 23));
    }

    #[test]
    fn test_zero_cell_size() {
        let t = Camera::new().transform(WorldDimensions::new(100, 24, 0));
        assert_eq!(t.screen_to_world(500, 500), GridCoord::new(0, 0));
        assert_eq!(t.visible_column_range(1024), 0..0);
        let empty = Camera::new().transform(WorldDimensions::new(0, 0, 32));
        assert_eq!(empty.screen_to_world(10, 10), GridCoord::new(0, 0));
    }

    #[test]
    fn test_scroll_clamp() {
        let mut cam = Camera::new();
        cam.scroll(10_000, &dims(), 1024);
        assert_eq!(cam.offset_x, 2176);
        cam.scroll(-15, &dims(), 1024);
        assert_eq!(cam.offset_x, 2161);
        cam.scroll(-10_000, &dims(), 1024);
        assert_eq!(cam.offset_x, 0);
    }

    #[test]
    fn test_world_narrower_than_viewport() {
        let small = WorldDimensions::new(10, 10, 32);
        let mut cam = Camera::new();
        cam.scroll(50, &small, 1024);
        assert_eq!(cam.offset_x, 0);
        assert_eq!(Camera::max_scroll(&small, 1024), 0);
    }

    #[test]
    fn test_clamp_after_resize() {
        let mut cam = Camera { offset_x: 2176 };
        cam.clamp_to(&WorldDimensions::new(40, 24, 32), 1024);
        assert_eq!(cam.offset_x, 256);
    }

    #[test]
    fn test_visible_column_range() {
        let t = CameraTransform { offset_x: 100, dims: dims() };
        // start = 100 / 32 = 3, span = ceil(1024 / 32) + 1 = 33
        assert_eq!(t.visible_column_range(1024), 3..36);

        let t = CameraTransform { offset_x: 0, dims: dims() };
        assert_eq!(t.visible_column_range(1000), 0..33);
    }

    #[test]
    fn test_visible_column_range_covers_viewport() {
        let t = CameraTransform { offset_x: 77, dims: dims() };
        let cols = t.visible_column_range(1024);
        let viewport = Viewport::new(1024, 648).rect();
        for x in 0..120 {
            let visible = t.cell_rect(GridCoord::new(x, 0)).intersects(&viewport);
            if visible {
                assert!(cols.contains(&x), "column {} visible but not in {:?}", x, cols);
            }
        }
    }

    #[test]
    fn test_visible_row_range() {
        let t = Camera::new().transform(dims());
        assert_eq!(t.visible_row_range(648), 0..22);
        assert_eq!(t.visible_row_range(2000), 0..24);
    }

    #[test]
    fn test_cell_rect() {
        let t = CameraTransform { offset_x: 16, dims: dims() };
        assert_eq!(t.cell_rect(GridCoord::new(2, 1)), Rect::new(48, 32, 32, 32));
    }
}
