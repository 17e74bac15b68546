//! UI Theme - Shared colors and styling constants

use crate::rasterizer::Color;

// =============================================================================
// Editing area
// =============================================================================

/// Canvas background behind the level
pub const BACKGROUND: Color = Color::WHITE;

/// Grid overlay lines
pub const GRID_COLOR: Color = Color::new(200, 200, 200);

// =============================================================================
// Palette strip
// =============================================================================

/// Palette background
pub const PALETTE_BG: Color = Color::new(180, 180, 220);

/// Border of the selected palette item
pub const HIGHLIGHT_COLOR: Color = Color::new(255, 255, 0);

/// Border of unselected palette items
pub const ITEM_BORDER: Color = Color::BLACK;

/// Palette and status text
pub const TEXT_COLOR: Color = Color::BLACK;

// =============================================================================
// Font Sizes
// =============================================================================

/// Standard label text size
pub const FONT_SIZE_CONTENT: i32 = 24;

/// Status line text size
pub const FONT_SIZE_SMALL: i32 = 18;
