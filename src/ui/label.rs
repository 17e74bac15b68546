//! Text labels anchored at their top-left corner

use super::Rect;
use crate::rasterizer::{Canvas, Color, DrawError, FontWeight};

/// Rectangle `text` would cover with its top-left corner at `origin`
pub fn label_rect(canvas: &dyn Canvas, text: &str, origin: (i32, i32), size: i32) -> Result<Rect, DrawError> {
    let (w, h) = canvas.measure_text(text, size, FontWeight::Regular)?;
    Ok(Rect::new(origin.0, origin.1, w, h))
}

/// Draw `text` filling `rect` (as returned by `label_rect`), over an optional background
pub fn draw_label_in(
    canvas: &mut dyn Canvas,
    text: &str,
    rect: Rect,
    size: i32,
    color: Color,
    background: Option<Color>,
) -> Result<(), DrawError> {
    // Measure again so nothing is painted if the text can't be drawn
    canvas.measure_text(text, size, FontWeight::Regular)?;
    if let Some(bg) = background {
        canvas.fill_rect(rect, bg);
    }
    canvas.draw_text(text, rect.center(), size, FontWeight::Regular, color)
}

/// Draw `text` with its top-left corner at `origin`
pub fn draw_label(
    canvas: &mut dyn Canvas,
    text: &str,
    origin: (i32, i32),
    size: i32,
    color: Color,
    background: Option<Color>,
) -> Result<Rect, DrawError> {
    let rect = label_rect(canvas, text, origin, size)?;
    draw_label_in(canvas, text, rect, size, color, background)?;
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Framebuffer;

    #[test]
    fn test_label_top_left() {
        let mut fb = Framebuffer::new(64, 32);
        let rect = draw_label(&mut fb, "P", (4, 6), 16, Color::BLACK, Some(Color::WHITE)).unwrap();
        assert_eq!(rect, Rect::new(4, 6, 10, 14));
        // Top-left pixel of 'P' is set, the background fills the rest of the box
        assert_eq!(fb.get_pixel(4, 6), Some(Color::BLACK));
        assert_eq!(fb.get_pixel(13, 19), Some(Color::WHITE));
        assert_eq!(fb.get_pixel(14, 6), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_unrenderable_label_draws_nothing() {
        let mut fb = Framebuffer::new(64, 32);
        assert!(draw_label(&mut fb, "~", (0, 0), 16, Color::BLACK, Some(Color::WHITE)).is_err());
        assert_eq!(fb.get_pixel(0, 0), Some(Color::TRANSPARENT));
    }
}
