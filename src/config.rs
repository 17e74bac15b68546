//! Editor configuration
//!
//! Read from `<config_dir>/brickworks/editor.ron` unless a path is given on
//! the command line. Every field is optional; a missing file means
//! defaults, a malformed one is logged and ignored.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::editor::Viewport;
use crate::ui::Rect;
use crate::world::{limits, WorldDimensions};

/// Largest accepted cell size in pixels
const MAX_CELL_SIZE: u32 = 256;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Height of the palette strip at the bottom of the window
    pub palette_height: u32,
    pub cell_size: u32,
    pub world_width_tiles: u32,
    pub world_height_tiles: u32,
    /// Pixels scrolled per frame while a scroll key is held
    pub scroll_speed: i32,
    pub level_path: PathBuf,
    /// Load `level_path` on startup
    pub autoload: bool,
    pub show_grid: bool,
    /// TTF used for bold glyphs; system fonts are tried when unset or broken
    pub bold_font: Option<PathBuf>,
    pub export_path: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            palette_height: 120,
            cell_size: 32,
            world_width_tiles: 100,
            world_height_tiles: 24,
            scroll_speed: 15,
            level_path: PathBuf::from("level.json"),
            autoload: true,
            show_grid: true,
            bold_font: None,
            export_path: PathBuf::from("level.png"),
        }
    }
}

impl EditorConfig {
    /// `<config_dir>/brickworks/editor.ron`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brickworks")
            .join("editor.ron")
    }

    /// Parse a RON document
    pub fn from_ron(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.validated())
    }

    /// Read `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_ron(&contents, path)?;
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Like `load`, but any error is logged and the defaults used
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Ignoring config: {}", e);
            Self::default()
        })
    }

    /// Bring out-of-range values back to something usable
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            warn!("cell_size {} out of range, using {}", self.cell_size, defaults.cell_size);
            self.cell_size = defaults.cell_size;
        }
        let world_range = 1..=limits::MAX_WORLD_TILES;
        if !world_range.contains(&self.world_width_tiles) {
            warn!("world_width_tiles {} out of range, using {}", self.world_width_tiles, defaults.world_width_tiles);
            self.world_width_tiles = defaults.world_width_tiles;
        }
        if !world_range.contains(&self.world_height_tiles) {
            warn!("world_height_tiles {} out of range, using {}", self.world_height_tiles, defaults.world_height_tiles);
            self.world_height_tiles = defaults.world_height_tiles;
        }
        if self.screen_width == 0 || self.screen_height <= self.palette_height {
            warn!(
                "window {}x{} leaves no editing area above a {} pixel palette, using defaults",
                self.screen_width, self.screen_height, self.palette_height
            );
            self.screen_width = defaults.screen_width;
            self.screen_height = defaults.screen_height;
            self.palette_height = defaults.palette_height;
        }
        if self.scroll_speed <= 0 {
            warn!("scroll_speed {} must be positive, using {}", self.scroll_speed, defaults.scroll_speed);
            self.scroll_speed = defaults.scroll_speed;
        }
        self
    }

    pub fn world_dims(&self) -> WorldDimensions {
        WorldDimensions::new(self.world_width_tiles, self.world_height_tiles, self.cell_size)
    }

    /// Editing area for a window of the given size
    pub fn viewport_for(&self, screen_width: u32, screen_height: u32) -> Viewport {
        let area = self.screen_rect(screen_width, screen_height).remaining_after_bottom(to_i32(self.palette_height));
        Viewport::new(area.w as u32, area.h as u32)
    }

    /// Palette strip for a window of the given size
    pub fn palette_rect(&self, screen_width: u32, screen_height: u32) -> Rect {
        self.screen_rect(screen_width, screen_height).slice_bottom(to_i32(self.palette_height))
    }

    fn screen_rect(&self, screen_width: u32, screen_height: u32) -> Rect {
        Rect::screen(to_i32(screen_width), to_i32(screen_height))
    }
}

fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
