//! Tile renderers
//!
//! Every tile is drawn procedurally from its bounding rectangle. Renderers
//! are plain functions: the same rectangle size always produces the same
//! pixels, wherever it sits on the canvas.
//!
//! Decorations that cannot be drawn (too small, missing glyphs) are skipped
//! and logged; the rest of the tile is still painted.

use log::warn;

use crate::rasterizer::{Canvas, Color, DrawError, FallbackChain, FontWeight, Radii};
use crate::ui::Rect;
use crate::world::{TileType, Tool};

/// Paints one tile into a rectangle
pub type TileRenderer = fn(&mut dyn Canvas, Rect) -> Result<(), DrawError>;

// =============================================================================
// Tile colors
// =============================================================================

const GROUND_TOP: Color = Color::new(160, 82, 45);
const GROUND_BOTTOM: Color = Color::new(139, 69, 19);
const GROUND_DETAIL: Color = Color::new(92, 64, 51);

const BRICK_LIGHT: Color = Color::new(210, 105, 30);
const BRICK_DARK: Color = Color::new(160, 82, 45);
const BRICK_MORTAR: Color = Color::new(100, 50, 10);

const Q_COLOR: Color = Color::new(255, 215, 0);
const Q_SHADOW: Color = Color::new(200, 150, 0);
const Q_HIGHLIGHT: Color = Color::new(255, 235, 100);
const Q_MARK: Color = Color::BLACK;
const Q_RIVET: Color = Color::new(80, 80, 80);

const SOLID_LIGHT: Color = Color::new(211, 211, 211);
const SOLID_DARK: Color = Color::new(169, 169, 169);
const SOLID_SHADOW: Color = Color::new(105, 105, 105);

const PIPE: Color = Color::new(0, 200, 0);
const PIPE_SHADOW: Color = Color::new(0, 100, 0);
const PIPE_HIGHLIGHT: Color = Color::new(152, 251, 152);
const PIPE_DARK_LINE: Color = Color::new(0, 60, 0);

const COIN: Color = Color::new(255, 223, 0);
const COIN_SHADOW: Color = Color::new(204, 178, 0);
const COIN_HIGHLIGHT: Color = Color::new(255, 255, 150);

const GOOMBA_BODY: Color = Color::new(165, 42, 42);
const GOOMBA_FEET: Color = Color::new(100, 20, 20);
const GOOMBA_EYES: Color = Color::WHITE;
const GOOMBA_PUPILS: Color = Color::BLACK;
const GOOMBA_HIGHLIGHT: Color = Color::new(200, 80, 80);

const PLAYER_START: Color = Color::new(50, 50, 255);
const PLAYER_START_SYMBOL: Color = Color::WHITE;

const ERASER: Color = Color::new(50, 50, 50);
const ERASER_X: Color = Color::RED;

const ERROR_MARKER: Color = Color::RED;

// =============================================================================
// Registry
// =============================================================================

fn renderer_for(tile: TileType) -> TileRenderer {
    match tile {
        TileType::Ground => draw_ground,
        TileType::Brick => draw_brick,
        TileType::QuestionBlock => draw_question_block,
        TileType::SolidBlock => draw_solid_block,
        TileType::PipeTopLeft => draw_pipe_top_left,
        TileType::PipeTopRight => draw_pipe_top_right,
        TileType::PipeLeft => draw_pipe_left,
        TileType::PipeRight => draw_pipe_right,
        TileType::Coin => draw_coin,
        TileType::Goomba => draw_goomba,
        TileType::PlayerStart => draw_player_start,
    }
}

/// Lookup table from tile type to renderer
///
/// Built from an exhaustive match, so every tile has a renderer.
#[derive(Clone)]
pub struct TileRegistry {
    renderers: [TileRenderer; TileType::COUNT],
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TileRegistry {
    pub fn new() -> Self {
        Self {
            renderers: TileType::ALL.map(renderer_for),
        }
    }

    pub fn renderer(&self, tile: TileType) -> TileRenderer {
        self.renderers[tile.index()]
    }

    /// Draw a tile, clipped to `rect`
    pub fn draw(&self, tile: TileType, canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
        with_clip(canvas, rect, self.renderer(tile))
    }

    /// Draw a palette thumbnail for a tool
    pub fn draw_tool(&self, tool: Tool, canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
        match tool {
            Tool::Paint(tile) => self.draw(tile, canvas, rect),
            Tool::Eraser => with_clip(canvas, rect, draw_eraser),
        }
    }

    /// Red box shown in place of a thumbnail whose renderer failed
    pub fn draw_error_marker(canvas: &mut dyn Canvas, rect: Rect) {
        canvas.fill_rect(rect, ERROR_MARKER);
    }
}

/// Run a renderer with the canvas clip narrowed to `rect`
fn with_clip(canvas: &mut dyn Canvas, rect: Rect, renderer: TileRenderer) -> Result<(), DrawError> {
    let previous = canvas.clip();
    let clip = match previous {
        Some(outer) => outer.intersection(&rect),
        None => (!rect.is_empty()).then_some(rect),
    };
    let Some(clip) = clip else {
        return Ok(());
    };
    canvas.set_clip(Some(clip));
    let result = renderer(canvas, rect);
    canvas.set_clip(previous);
    result
}

// =============================================================================
// Helpers
// =============================================================================

/// Log a failed decoration and keep going
fn decorate(part: &'static str, result: Result<(), DrawError>) {
    if let Err(e) = result {
        warn!("Skipping {}: {}", part, e);
    }
}

/// Vertical gradient, one row at a time
fn fill_gradient(canvas: &mut dyn Canvas, rect: Rect, top: Color, bottom: Color) {
    if rect.h <= 0 {
        return;
    }
    for row in 0..rect.h {
        let color = top.lerp(bottom, row as f32 / rect.h as f32);
        canvas.fill_rect(Rect::new(rect.x, rect.y + row, rect.w, 1), color);
    }
}

/// Centered glyph: bold first, then regular at `fallback_size`, else skipped
fn draw_glyph<'c>(
    canvas: &mut (dyn Canvas + 'c),
    what: &'static str,
    glyph: &'static str,
    center: (i32, i32),
    size: i32,
    fallback_size: i32,
    color: Color,
) {
    FallbackChain::<dyn Canvas + 'c, ()>::new(what)
        .then("bold", move |c| c.draw_text(glyph, center, size, FontWeight::Bold, color))
        .then("regular", move |c| {
            c.draw_text(glyph, center, fallback_size, FontWeight::Regular, color)
        })
        .acquire(canvas);
}

// =============================================================================
// Renderers
// =============================================================================

fn draw_ground(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    fill_gradient(canvas, rect, GROUND_TOP, GROUND_BOTTOM);

    let y1 = rect.y + rect.h / 4;
    let y2 = rect.center_y() + rect.h / 8;
    canvas.line(rect.x, y1, rect.right(), y1, 1, GROUND_DETAIL);
    canvas.line(rect.x, y2, rect.right(), y2, 1, GROUND_DETAIL);

    // Pebbles
    if rect.w >= 8 && rect.h >= 8 {
        let (cx, cy) = rect.center();
        decorate(
            "ground pebble",
            canvas.fill_circle(cx - rect.w / 4, cy + rect.h / 3, 2, GROUND_DETAIL),
        );
        decorate(
            "ground pebble",
            canvas.fill_circle(cx + rect.w / 4, cy + rect.h / 4, 1, GROUND_DETAIL),
        );
    }
    Ok(())
}

fn draw_brick(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    canvas.fill_rect(rect, BRICK_DARK);
    canvas.fill_rect(rect.inflate(-2, -2), BRICK_LIGHT);

    // Mortar, staggered like a real wall
    let (cx, cy) = rect.center();
    let hw = rect.w / 2;
    let lw = (rect.w / 16).max(1);
    canvas.line(rect.x, cy, rect.right(), cy, lw, BRICK_MORTAR);
    canvas.line(cx, rect.y, cx, cy, lw, BRICK_MORTAR);
    canvas.line(rect.x + hw / 2, cy, rect.x + hw / 2, rect.bottom(), lw, BRICK_MORTAR);
    canvas.line(rect.right() - hw / 2, cy, rect.right() - hw / 2, rect.bottom(), lw, BRICK_MORTAR);
    Ok(())
}

fn draw_question_block(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    fill_gradient(canvas, rect, Q_HIGHLIGHT, Q_COLOR);
    canvas.fill_round_rect(rect.inflate(-4, -4), Radii::all(2), Q_SHADOW);

    let size = rect.h * 7 / 10;
    let (cx, cy) = rect.center();
    draw_glyph(canvas, "question block glyph", "?", (cx, cy + 2), size, size + 4, Q_MARK);

    // Rivets
    let rivet = (rect.w / 10).max(2);
    let offset = rivet / 2 + 1;
    if rect.w >= 4 * offset && rect.h >= 4 * offset {
        let corners = [
            (rect.x + offset, rect.y + offset),
            (rect.right() - offset, rect.y + offset),
            (rect.x + offset, rect.bottom() - offset),
            (rect.right() - offset, rect.bottom() - offset),
        ];
        for (x, y) in corners {
            decorate("rivet", canvas.fill_circle(x, y, rivet / 2 + 1, Color::BLACK));
            decorate("rivet", canvas.fill_circle(x, y, rivet / 2, Q_RIVET));
        }
    }
    Ok(())
}

fn draw_solid_block(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    fill_gradient(canvas, rect, SOLID_LIGHT, SOLID_DARK);
    canvas.fill_round_rect(rect.inflate(-3, -3), Radii::all(3), SOLID_SHADOW);
    canvas.stroke_round_rect(rect, 1, 3, Color::BLACK);
    Ok(())
}

/// Pipe opening: rounded lip on top of a shaded body
fn draw_pipe_top(canvas: &mut dyn Canvas, rect: Rect, left: bool) {
    canvas.fill_round_rect(rect, Radii::top(5), PIPE);

    let lip_height = rect.h / 4;
    let lip = Rect::new(rect.x, rect.y, rect.w, lip_height);
    let body = Rect::new(rect.x, rect.y + lip_height, rect.w, rect.h - lip_height);

    canvas.fill_round_rect(lip, Radii::top(5), PIPE_SHADOW);
    canvas.fill_round_rect(lip.inflate(-4, -4), Radii::top(3), PIPE_HIGHLIGHT);
    canvas.line(lip.x, lip.bottom(), lip.right(), lip.bottom(), 2, PIPE_DARK_LINE);

    draw_pipe_bands(canvas, body, left);
}

/// Shadow and highlight bands giving the pipe body a curved look
fn draw_pipe_bands(canvas: &mut dyn Canvas, body: Rect, left: bool) {
    if left {
        canvas.fill_rect(Rect::new(body.x, body.y, body.w / 3, body.h), PIPE_SHADOW);
        canvas.fill_rect(
            Rect::new(body.x + body.w / 2, body.y, body.w / 2 - 2, body.h),
            PIPE_HIGHLIGHT,
        );
    } else {
        canvas.fill_rect(Rect::new(body.x + 2, body.y, body.w / 2 - 2, body.h), PIPE_HIGHLIGHT);
        canvas.fill_rect(
            Rect::new(body.x + body.w * 2 / 3, body.y, body.w / 3, body.h),
            PIPE_SHADOW,
        );
    }
}

fn draw_pipe_top_left(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    draw_pipe_top(canvas, rect, true);
    Ok(())
}

fn draw_pipe_top_right(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    draw_pipe_top(canvas, rect, false);
    Ok(())
}

fn draw_pipe_left(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    canvas.fill_rect(rect, PIPE);
    draw_pipe_bands(canvas, rect, true);
    canvas.line(rect.right(), rect.y, rect.right(), rect.bottom(), 2, PIPE_DARK_LINE);
    Ok(())
}

fn draw_pipe_right(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    canvas.fill_rect(rect, PIPE);
    draw_pipe_bands(canvas, rect, false);
    canvas.line(rect.x, rect.y, rect.x, rect.bottom(), 2, PIPE_DARK_LINE);
    Ok(())
}

fn draw_coin(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    let (cx, cy) = rect.center();
    let radius = rect.w.min(rect.h) / 2 - 2;
    if radius < 1 {
        return Ok(());
    }

    canvas.fill_circle(cx, cy, radius, COIN_SHADOW)?;
    if radius > 1 {
        canvas.fill_circle(cx, cy, radius - 1, COIN)?;
    }

    // Shine, up and to the left of center
    let rx = (radius / 3).max(1);
    let ry = (radius / 2).max(1);
    let shift = (-radius).div_euclid(3);
    let shine = Rect::new(cx + shift - rx, cy + shift - ry, rx * 2, ry * 2);
    if canvas.fill_ellipse(shine, COIN_HIGHLIGHT).is_err() {
        decorate("coin shine", canvas.fill_circle(shine.center_x(), shine.center_y(), 1, COIN_HIGHLIGHT));
    }
    Ok(())
}

fn draw_goomba(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    if rect.w < 4 || rect.h < 4 {
        return Ok(());
    }

    let feet_height = (rect.h / 4).max(1);
    let feet = Rect::new(rect.x, rect.bottom() - feet_height, rect.w, feet_height);
    canvas.fill_round_rect(feet, Radii::bottom(3), GOOMBA_FEET);

    let body_height = rect.h - feet_height;
    let body = Rect::new(rect.x + rect.w / 8, rect.y, rect.w * 3 / 4, body_height * 4 / 5);
    if body.is_empty() {
        return Ok(());
    }
    canvas.fill_ellipse(body, GOOMBA_BODY)?;

    let hw = (body.w / 2).max(1);
    let hh = (body.h / 2).max(1);
    let highlight = Rect::new(body.center_x() - hw / 2, body.y + 2, hw, hh);
    decorate("goomba highlight", canvas.fill_ellipse(highlight, GOOMBA_HIGHLIGHT));

    // Angry slanted eyes
    let bcx = body.center_x();
    let eye_y = body.center_y() - body.h / 6;
    let sep = (rect.w / 6).max(1);
    let ew = (rect.w / 7).max(2);
    let eh = (rect.h / 6).max(2);
    let pupil = (ew / 4).max(1);

    for side in [-1, 1] {
        let inner = bcx + side * sep;
        let outer = bcx + side * (sep + ew);
        let eye = [
            (inner, eye_y - eh / 2),
            (outer, eye_y - eh / 3),
            (outer, eye_y + eh / 2),
            (inner, eye_y + eh / 3),
        ];
        decorate("goomba eye", canvas.fill_polygon(&eye, GOOMBA_EYES));
        decorate(
            "goomba pupil",
            canvas.fill_circle(bcx + side * (sep + ew / 2), eye_y, pupil, GOOMBA_PUPILS),
        );
    }
    Ok(())
}

fn draw_player_start(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    canvas.fill_round_rect(rect, Radii::all(3), PLAYER_START);
    canvas.stroke_round_rect(rect.inflate(-4, -4), 1, 3, Color::WHITE);

    let size = rect.h * 7 / 10;
    draw_glyph(canvas, "player start glyph", "P", rect.center(), size, size + 3, PLAYER_START_SYMBOL);
    Ok(())
}

/// Eraser thumbnail: dark rounded box with a red X
fn draw_eraser(canvas: &mut dyn Canvas, rect: Rect) -> Result<(), DrawError> {
    canvas.fill_round_rect(rect, Radii::all(5), ERASER);

    let lw = (rect.w / 8).max(3);
    let pad = lw / 2 + 1;
    if rect.w <= pad * 2 || rect.h <= pad * 2 {
        decorate("eraser cross", Err(DrawError::Degenerate("eraser cross")));
        return Ok(());
    }
    let (l, t, r, b) = (rect.x + pad, rect.y + pad, rect.right() - pad, rect.bottom() - pad);
    canvas.line(l, t, r, b, lw, ERASER_X);
    canvas.line(r, t, l, b, lw, ERASER_X);
    Ok(())
}
