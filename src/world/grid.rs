//! Grid coordinates and world dimensions

use std::fmt;

/// Address of one cell in the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Key used in level documents: decimal `x,y` with no spaces
    pub fn to_key(self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for GridCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Size of the world in cells, and of a cell in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldDimensions {
    pub width_tiles: u32,
    pub height_tiles: u32,
    /// Pixels per cell side (cells are square)
    pub cell_size: u32,
}

impl WorldDimensions {
    pub const fn new(width_tiles: u32, height_tiles: u32, cell_size: u32) -> Self {
        Self { width_tiles, height_tiles, cell_size }
    }

    /// Check whether a coordinate lies inside the world
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.width_tiles && coord.y < self.height_tiles
    }

    /// World width in pixels
    pub fn pixel_width(&self) -> i64 {
        self.width_tiles as i64 * self.cell_size as i64
    }

    /// World height in pixels
    pub fn pixel_height(&self) -> i64 {
        self.height_tiles as i64 * self.cell_size as i64
    }

    /// Same cell size, different extent
    pub fn with_extent(self, width_tiles: u32, height_tiles: u32) -> Self {
        Self { width_tiles, height_tiles, ..self }
    }
}

impl Default for WorldDimensions {
    fn default() -> Self {
        Self::new(100, 24, 32)
    }
}
