//! Drawing target abstraction
//!
//! Tile renderers paint through `Canvas`, so the same code draws into the
//! editor window and into an in-memory `Framebuffer` for export and tests.
//!
//! Primitives that can be asked for something impossible (an ellipse with
//! no area, text too small to read) return `DrawError`; the rest clip
//! silently.

use super::Color;
use crate::ui::Rect;

/// Failure of a single drawing primitive
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// Shape has no area (zero radius, empty bounds, too few points)
    #[error("degenerate {0}")]
    Degenerate(&'static str),
    /// Requested text size is below what the font can render
    #[error("text size {size} too small for {weight:?} weight")]
    TextTooSmall { size: i32, weight: FontWeight },
    /// Font has no glyph for this character
    #[error("no glyph for {0:?}")]
    MissingGlyph(char),
    /// The requested font could not be used
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
}

/// Font weight for `Canvas::draw_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Per-corner radii for rounded rectangles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Radii {
    pub top_left: i32,
    pub top_right: i32,
    pub bottom_right: i32,
    pub bottom_left: i32,
}

impl Radii {
    pub const fn all(r: i32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    pub const fn top(r: i32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: 0, bottom_left: 0 }
    }

    pub const fn bottom(r: i32) -> Self {
        Self { top_left: 0, top_right: 0, bottom_right: r, bottom_left: r }
    }

    /// Limit every radius to half the shorter side of `rect`
    pub fn fit(self, rect: Rect) -> Self {
        let max = (rect.w.min(rect.h) / 2).max(0);
        Self {
            top_left: self.top_left.clamp(0, max),
            top_right: self.top_right.clamp(0, max),
            bottom_right: self.bottom_right.clamp(0, max),
            bottom_left: self.bottom_left.clamp(0, max),
        }
    }
}

/// Raster drawing target
pub trait Canvas {
    /// Size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Restrict all drawing to `clip` (None = whole canvas)
    fn set_clip(&mut self, clip: Option<Rect>);

    /// Current clip rectangle
    fn clip(&self) -> Option<Rect>;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, radii: Radii, color: Color);

    /// Rounded outline `width` pixels thick, drawn inside `rect`
    fn stroke_round_rect(&mut self, rect: Rect, width: i32, radius: i32, color: Color);

    /// Line between two points; `width` <= 1 draws a single-pixel line
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: Color);

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) -> Result<(), DrawError>;

    /// Ellipse inscribed in `rect`
    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), DrawError>;

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) -> Result<(), DrawError>;

    /// Pixel size (width, height) `text` would occupy
    fn measure_text(&self, text: &str, size: i32, weight: FontWeight) -> Result<(i32, i32), DrawError>;

    /// Draw a single line of text centered on `center`
    fn draw_text(
        &mut self,
        text: &str,
        center: (i32, i32),
        size: i32,
        weight: FontWeight,
        color: Color,
    ) -> Result<(), DrawError>;
}
