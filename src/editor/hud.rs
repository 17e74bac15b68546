//! Overlays drawn on top of the level: cursor coordinates and status line

use super::camera::Viewport;
use crate::rasterizer::{Canvas, Color, DrawError};
use crate::ui::{label, theme, Rect};
use crate::world::GridCoord;

/// Offset of the coordinate tooltip from the mouse pointer
const TOOLTIP_OFFSET: (i32, i32) = (15, 10);
/// Gap kept between the tooltip and the edges of the editing area
const EDGE_GAP: i32 = 5;

/// Grid coordinate tooltip next to the pointer, kept inside the editing area
pub fn draw_cursor_coords(
    canvas: &mut dyn Canvas,
    mouse: (i32, i32),
    coord: GridCoord,
    viewport: Viewport,
) -> Result<Rect, DrawError> {
    let text = coord.to_string();
    let origin = (mouse.0 + TOOLTIP_OFFSET.0, mouse.1 + TOOLTIP_OFFSET.1);
    let mut rect = label::label_rect(canvas, &text, origin, theme::FONT_SIZE_CONTENT)?;

    let max_right = viewport.width as i32 - EDGE_GAP;
    let max_bottom = viewport.height as i32 - EDGE_GAP;
    rect = rect.translate(-(rect.right() - max_right).max(0), -(rect.bottom() - max_bottom).max(0));

    label::draw_label_in(canvas, &text, rect, theme::FONT_SIZE_CONTENT, theme::TEXT_COLOR, Some(Color::WHITE))?;
    Ok(rect)
}

/// Transient status message, right-aligned along the bottom of `area`
pub fn draw_status(canvas: &mut dyn Canvas, message: &str, area: Rect) -> Result<(), DrawError> {
    let probe = label::label_rect(canvas, message, (0, 0), theme::FONT_SIZE_SMALL)?;
    let origin = (area.right() - probe.w - 10, area.bottom() - probe.h - 8);
    label::draw_label(canvas, message, origin, theme::FONT_SIZE_SMALL, theme::TEXT_COLOR, None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Framebuffer;

    #[test]
    fn test_tooltip_follows_pointer() {
        let mut fb = Framebuffer::new(1024, 768);
        let rect = draw_cursor_coords(&mut fb, (100, 100), GridCoord::new(3, 3), Viewport::new(1024, 648)).unwrap();
        assert_eq!((rect.x, rect.y), (115, 110));
        assert_eq!(fb.get_pixel(rect.right() as usize - 1, rect.y as usize), Some(Color::WHITE));
    }

    #[test]
    fn test_tooltip_clamped_to_editing_area() {
        let mut fb = Framebuffer::new(1024, 768);
        let viewport = Viewport::new(1024, 648);
        let rect = draw_cursor_coords(&mut fb, (1020, 640), GridCoord::new(99, 19), viewport).unwrap();
        assert_eq!(rect.right(), 1019);
        assert_eq!(rect.bottom(), 643);
    }

    #[test]
    fn test_status_right_aligned() {
        let mut fb = Framebuffer::new(400, 200);
        let area = Rect::new(0, 100, 400, 100);
        draw_status(&mut fb, "SAVED", area).unwrap();
        // "SAVED" is 58x14 at this size: top-left at (332, 178)
        assert_eq!(fb.get_pixel(332, 180), Some(theme::TEXT_COLOR));
        assert_eq!(fb.get_pixel(331, 180), Some(Color::TRANSPARENT));
    }
}
