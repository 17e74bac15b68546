//! Software framebuffer
//! RGBA pixel buffer implementing `Canvas`, used for PNG export and headless tests

use std::path::Path;

use super::canvas::{Canvas, DrawError, FontWeight, Radii};
use super::glyphs;
use super::spans;
use super::types::Color;
use crate::ui::Rect;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
    clip: Option<Rect>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
            clip: None,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Read one pixel
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(Color::from_bytes(bytes))
        } else {
            None
        }
    }

    /// Copy out the pixels of `rect`, row by row (off-buffer pixels read as transparent)
    #[cfg(test)]
    pub(crate) fn region(&self, rect: Rect) -> Vec<Color> {
        let mut out = Vec::with_capacity((rect.w.max(0) * rect.h.max(0)) as usize);
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let px = if x >= 0 && y >= 0 {
                    self.get_pixel(x as usize, y as usize)
                } else {
                    None
                };
                out.push(px.unwrap_or(Color::TRANSPARENT));
            }
        }
        out
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let bytes = color.to_bytes();
            self.pixels[idx..idx + 4].copy_from_slice(&bytes);
        }
    }

    /// Set a pixel with alpha blending (color.a: 0 = transparent, 255 = opaque)
    #[inline]
    pub fn set_pixel_alpha(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;

            // Alpha blend: result = front * alpha + back * (1 - alpha)
            let a = color.a as u16;
            let inv_a = 255 - a;
            let blend = |front: u8, back: u8| ((front as u16 * a + back as u16 * inv_a) / 255) as u8;
            self.pixels[idx] = blend(color.r, self.pixels[idx]);
            self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
            self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
            self.pixels[idx + 3] = self.pixels[idx + 3].max(color.a);
        }
    }

    /// Area that drawing may touch: the buffer, narrowed by the clip rectangle
    fn drawable(&self) -> Option<Rect> {
        let screen = Rect::screen(self.width as i32, self.height as i32);
        match self.clip {
            Some(clip) => screen.intersection(&clip),
            None => (!screen.is_empty()).then_some(screen),
        }
    }

    /// Plot a pixel, honoring bounds and clip
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(clip) = self.clip {
            if !clip.contains(x, y) {
                return;
            }
        }
        if color.a == 255 {
            self.set_pixel(x as usize, y as usize, color);
        } else {
            self.set_pixel_alpha(x as usize, y as usize, color);
        }
    }

    /// Visit every drawable pixel of `rect`
    fn for_each_in(&mut self, rect: Rect, mut f: impl FnMut(&mut Self, i32, i32)) {
        let Some(area) = self.drawable().and_then(|d| d.intersection(&rect)) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                f(self, x, y);
            }
        }
    }

    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.plot(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a thick line as a filled quad
    pub fn draw_thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        if thickness <= 1 {
            self.draw_line(x0, y0, x1, y1, color);
            return;
        }

        // Calculate perpendicular offset vector
        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 0.001 {
            return;
        }

        let half = thickness as f32 * 0.5;
        let px = -dy / len * half;
        let py = dx / len * half;

        // Four corners of the thick line quad
        let corners = [
            (x0 as f32 + px, y0 as f32 + py),
            (x0 as f32 - px, y0 as f32 - py),
            (x1 as f32 - px, y1 as f32 - py),
            (x1 as f32 + px, y1 as f32 + py),
        ];

        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor() as i32;
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;
        let bounds = Rect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1);

        self.for_each_in(bounds, |fb, x, y| {
            // Point-in-quad test using cross products (convex quad)
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let inside = (0..4).all(|i| {
                let a = corners[i];
                let b = corners[(i + 1) % 4];
                (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0) >= 0.0
            });
            if inside {
                fb.plot(x, y, color);
            }
        });
    }

    /// Draw a filled circle at (cx, cy) with given radius and color
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r_sq = radius * radius;
        let bounds = Rect::new(cx - radius, cy - radius, radius * 2 + 1, radius * 2 + 1);
        self.for_each_in(bounds, |fb, x, y| {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r_sq {
                fb.plot(x, y, color);
            }
        });
    }

    /// Draw a filled rectangle
    pub fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_in(rect, |fb, x, y| fb.plot(x, y, color));
    }

    /// Write the buffer to a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
            image::ImageFormat::Png,
        )
    }
}

impl Canvas for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_filled_rect(rect, color);
    }

    fn fill_round_rect(&mut self, rect: Rect, radii: Radii, color: Color) {
        for row in spans::round_rect_rows(rect, radii) {
            self.draw_filled_rect(row, color);
        }
    }

    fn stroke_round_rect(&mut self, rect: Rect, width: i32, radius: i32, color: Color) {
        for row in spans::round_rect_outline_rows(rect, width, radius) {
            self.draw_filled_rect(row, color);
        }
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: Color) {
        self.draw_thick_line(x0, y0, x1, y1, width, color);
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) -> Result<(), DrawError> {
        if radius < 1 {
            return Err(DrawError::Degenerate("circle"));
        }
        self.draw_circle(cx, cy, radius, color);
        Ok(())
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        if rect.is_empty() {
            return Err(DrawError::Degenerate("ellipse"));
        }
        for row in spans::ellipse_rows(rect) {
            self.draw_filled_rect(row, color);
        }
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Color) -> Result<(), DrawError> {
        if points.len() < 3 {
            return Err(DrawError::Degenerate("polygon"));
        }
        let Some(area) = self.drawable() else {
            return Ok(());
        };
        for row in spans::polygon_rows(points, area) {
            self.draw_filled_rect(row, color);
        }
        Ok(())
    }

    fn measure_text(&self, text: &str, size: i32, weight: FontWeight) -> Result<(i32, i32), DrawError> {
        let scale = glyphs::scale_for(size, weight)?;
        glyphs::lookup_all(text)?;
        Ok(glyphs::measure(text, scale, weight))
    }

    fn draw_text(
        &mut self,
        text: &str,
        center: (i32, i32),
        size: i32,
        weight: FontWeight,
        color: Color,
    ) -> Result<(), DrawError> {
        let scale = glyphs::scale_for(size, weight)?;
        let bitmaps = glyphs::lookup_all(text)?;
        let (w, h) = glyphs::measure(text, scale, weight);
        let left = center.0 - w / 2;
        let top = center.1 - h / 2;

        let strikes: &[i32] = match weight {
            FontWeight::Regular => &[0],
            FontWeight::Bold => &[0, glyphs::bold_offset(scale)],
        };
        for (i, rows) in bitmaps.iter().enumerate() {
            let origin_x = left + i as i32 * glyphs::ADVANCE * scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..glyphs::GLYPH_WIDTH {
                    if bits & (0x10 >> col) == 0 {
                        continue;
                    }
                    for &dx in strikes {
                        let cell = Rect::new(
                            origin_x + col * scale + dx,
                            top + row as i32 * scale,
                            scale,
                            scale,
                        );
                        self.draw_filled_rect(cell, color);
                    }
                }
            }
        }
        Ok(())
    }
}
