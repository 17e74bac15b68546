//! Window backend for `Canvas`
//!
//! Draws straight to the macroquad window. Rectangles, lines and circles
//! map onto macroquad primitives; rounded rectangles, ellipses and polygons
//! are filled from the shared span helpers so they match exported images.
//! Clipping uses the GL scissor rectangle.

use std::path::{Path, PathBuf};

use log::info;
use macroquad::color::Color as MqColor;
use macroquad::prelude::{
    draw_circle, draw_line, draw_rectangle, draw_text_ex, get_internal_gl, gl_use_default_material,
    load_ttf_font_from_bytes, measure_text, screen_dpi_scale, screen_height, screen_width, Font, TextParams,
};

use super::Rect;
use crate::rasterizer::{spans, Canvas, Color, DrawError, FallbackChain, FontWeight, Radii};

/// Bold fonts commonly installed on desktop systems
const SYSTEM_BOLD_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

fn font_from_file(path: &Path) -> Result<Font, DrawError> {
    let bytes = std::fs::read(path).map_err(|e| DrawError::FontUnavailable(format!("{}: {}", path.display(), e)))?;
    load_ttf_font_from_bytes(&bytes).map_err(|e| DrawError::FontUnavailable(format!("{}: {}", path.display(), e)))
}

/// Find a bold TTF font: the configured one first, then well-known system paths
///
/// Returns None when nothing loads; bold text then falls back to the
/// built-in regular font.
pub fn load_bold_font(configured: Option<&Path>) -> Option<Font> {
    let configured: Option<PathBuf> = configured.map(Path::to_path_buf);
    let mut chain = FallbackChain::<(), Font>::new("bold font");
    if let Some(path) = configured {
        chain = chain.then("configured", move |_| font_from_file(&path));
    }
    for &candidate in SYSTEM_BOLD_FONTS {
        chain = chain.then(candidate, move |_| font_from_file(Path::new(candidate)));
    }

    let font = chain.acquire(&mut ());
    if font.is_some() {
        info!("Loaded bold font");
    }
    font
}

fn to_mq(color: Color) -> MqColor {
    MqColor::from_rgba(color.r, color.g, color.b, color.a)
}

/// `Canvas` over the macroquad window for the current frame
pub struct ScreenCanvas<'f> {
    width: u32,
    height: u32,
    clip: Option<Rect>,
    bold_font: Option<&'f Font>,
}

impl<'f> ScreenCanvas<'f> {
    pub fn new(bold_font: Option<&'f Font>) -> Self {
        Self {
            width: screen_width().max(0.0) as u32,
            height: screen_height().max(0.0) as u32,
            clip: None,
            bold_font,
        }
    }

    fn apply_scissor(&self) {
        let dpi = screen_dpi_scale();
        gl_use_default_material();
        let scissor = self.clip.map(|r| {
            (
                (r.x as f32 * dpi) as i32,
                (r.y as f32 * dpi) as i32,
                (r.w.max(0) as f32 * dpi) as i32,
                (r.h.max(0) as f32 * dpi) as i32,
            )
        });
        unsafe {
            get_internal_gl().quad_gl.scissor(scissor);
        }
    }

    fn fill_rows(&mut self, rows: Vec<Rect>, color: Color) {
        for row in rows {
            self.fill_rect(row, color);
        }
    }

    fn font_for(&self, weight: FontWeight) -> Result<Option<&'f Font>, DrawError> {
        match weight {
            FontWeight::Regular => Ok(None),
            FontWeight::Bold => self
                .bold_font
                .map(Some)
                .ok_or_else(|| DrawError::FontUnavailable("no bold font loaded".to_string())),
        }
    }
}

impl Canvas for ScreenCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.apply_scissor();
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        draw_rectangle(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32, to_mq(color));
    }

    fn fill_round_rect(&mut self, rect: Rect, radii: Radii, color: Color) {
        self.fill_rows(spans::round_rect_rows(rect, radii), color);
    }

    fn stroke_round_rect(&mut self, rect: Rect, width: i32, radius: i32, color: Color) {
        self.fill_rows(spans::round_rect_outline_rows(rect, width, radius), color);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: Color) {
        // Pixel centers, so one-pixel lines land on a single row or column
        draw_line(
            x0 as f32 + 0.5,
            y0 as f32 + 0.5,
            x1 as f32 + 0.5,
            y1 as f32 + 0.5,
            width.max(1) as f32,
            to_mq(color),
        );
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) -> Result<(), DrawError> {
        if radius < 1 {
            return Err(DrawError::Degenerate("circle"));
        }
        draw_circle(cx as f32 + 0.5, cy as f32 + 0.5, radius as f32 + 0.5, to_mq(color));
        Ok(())
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        if rect.is_empty() {
            return Err(DrawError::Degenerate("ellipse"));
        }
        self.fill_rows(spans::ellipse_rows(rect), color);
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) -> Result<(), DrawError> {
        if points.len() < 3 {
            return Err(DrawError::Degenerate("polygon"));
        }
        let bounds = self
            .clip
            .unwrap_or_else(|| Rect::screen(self.width as i32, self.height as i32));
        self.fill_rows(spans::polygon_rows(points, bounds), color);
        Ok(())
    }

    fn measure_text(&self, text: &str, size: i32, weight: FontWeight) -> Result<(i32, i32), DrawError> {
        if size < 1 {
            return Err(DrawError::TextTooSmall { size, weight });
        }
        let font = self.font_for(weight)?;
        let dims = measure_text(text, font, size.min(u16::MAX as i32) as u16, 1.0);
        Ok((dims.width.ceil() as i32, dims.height.ceil() as i32))
    }

    fn draw_text(
        &mut self,
        text: &str,
        center: (i32, i32),
        size: i32,
        weight: FontWeight,
        color: Color,
    ) -> Result<(), DrawError> {
        if size < 1 {
            return Err(DrawError::TextTooSmall { size, weight });
        }
        let font = self.font_for(weight)?;
        let font_size = size.min(u16::MAX as i32) as u16;
        let dims = measure_text(text, font, font_size, 1.0);

        // draw_text_ex takes the baseline; offset_y is the ascent above it
        let x = center.0 as f32 - dims.width * 0.5;
        let y = center.1 as f32 - dims.height * 0.5 + dims.offset_y;
        draw_text_ex(
            text,
            x.round(),
            y.round(),
            TextParams {
                font,
                font_size,
                color: to_mq(color),
                ..Default::default()
            },
        );
        Ok(())
    }
}
