//! Tile types and editor tools
//!
//! The set of paintable tiles is closed. Each variant has a canonical
//! persisted name (the variant name) and a human-readable label.
//! `Eraser` is a tool, never a stored tile.

use std::fmt;
use std::str::FromStr;

/// A paintable level element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileType {
    Ground,
    Brick,
    QuestionBlock,
    SolidBlock,
    PipeTopLeft,
    PipeTopRight,
    PipeLeft,
    PipeRight,
    Coin,
    Goomba,
    PlayerStart,
}

impl TileType {
    /// Number of tile variants
    pub const COUNT: usize = 11;

    /// All variants in palette order
    pub const ALL: [TileType; Self::COUNT] = [
        TileType::Ground,
        TileType::Brick,
        TileType::QuestionBlock,
        TileType::SolidBlock,
        TileType::PipeTopLeft,
        TileType::PipeTopRight,
        TileType::PipeLeft,
        TileType::PipeRight,
        TileType::Coin,
        TileType::Goomba,
        TileType::PlayerStart,
    ];

    /// Dense index, used for lookup tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical name written to level documents
    pub fn name(self) -> &'static str {
        match self {
            TileType::Ground => "Ground",
            TileType::Brick => "Brick",
            TileType::QuestionBlock => "QuestionBlock",
            TileType::SolidBlock => "SolidBlock",
            TileType::PipeTopLeft => "PipeTopLeft",
            TileType::PipeTopRight => "PipeTopRight",
            TileType::PipeLeft => "PipeLeft",
            TileType::PipeRight => "PipeRight",
            TileType::Coin => "Coin",
            TileType::Goomba => "Goomba",
            TileType::PlayerStart => "PlayerStart",
        }
    }

    /// Display label (status bar, palette caption)
    ///
    /// These are also the names older level files were saved with.
    pub fn label(self) -> &'static str {
        match self {
            TileType::Ground => "Ground",
            TileType::Brick => "Brick",
            TileType::QuestionBlock => "? Block",
            TileType::SolidBlock => "Solid Block",
            TileType::PipeTopLeft => "Pipe Top Left",
            TileType::PipeTopRight => "Pipe Top Right",
            TileType::PipeLeft => "Pipe Left",
            TileType::PipeRight => "Pipe Right",
            TileType::Coin => "Coin",
            TileType::Goomba => "Goomba",
            TileType::PlayerStart => "Player Start",
        }
    }

    /// Look up a tile by its persisted name
    ///
    /// Matching is exact and case-sensitive. Both the canonical name and the
    /// legacy display label are accepted.
    pub fn from_name(name: &str) -> Option<TileType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name || t.label() == name)
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown tile name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile name '{0}'")]
pub struct UnknownTile(pub String);

impl FromStr for TileType {
    type Err = UnknownTile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileType::from_name(s).ok_or_else(|| UnknownTile(s.to_string()))
    }
}

/// Editor tool selected in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Paint the given tile
    Paint(TileType),
    /// Remove whatever occupies the cell
    Eraser,
}

impl Tool {
    /// Every tool, tiles first, eraser last (palette order)
    pub fn all() -> impl Iterator<Item = Tool> {
        TileType::ALL
            .into_iter()
            .map(Tool::Paint)
            .chain(std::iter::once(Tool::Eraser))
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Paint(tile) => tile.label(),
            Tool::Eraser => "Eraser",
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Tool::Paint(TileType::Ground)
    }
}
