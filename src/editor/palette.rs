//! Tool palette strip along the bottom of the window
//!
//! Items are laid out left to right and wrap to a new row when the next
//! slot would run past the right margin. Each item shows the tool's tile
//! thumbnail; the selected one gets a thick highlighted border.

use log::warn;

use super::tiles::TileRegistry;
use crate::rasterizer::Canvas;
use crate::ui::{label, theme, Rect};
use crate::world::Tool;

/// Left margin and gap between items
const ITEM_PADDING: i32 = 10;
/// Extra room reserved around each thumbnail
const SLOT_EXTRA: i32 = 10;
/// Right margin items must not cross
const RIGHT_MARGIN: i32 = 20;

/// Assumed label footprint when checking for overlap
const LABEL_ESTIMATE: (i32, i32) = (150, 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub tool: Tool,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct Palette {
    area: Rect,
    items: Vec<PaletteItem>,
}

impl Palette {
    /// Lay out every tool inside `area` with `cell_size` thumbnails
    pub fn new(area: Rect, cell_size: u32) -> Self {
        let cell = cell_size.min(i32::MAX as u32) as i32;
        let slot = cell + SLOT_EXTRA;
        let max_width = area.right() - RIGHT_MARGIN;

        let mut items = Vec::new();
        let mut x = area.x + ITEM_PADDING;
        let mut y = area.y + ITEM_PADDING;
        for tool in Tool::all() {
            items.push(PaletteItem {
                tool,
                rect: Rect::new(x, y, cell, cell),
            });
            x += slot + ITEM_PADDING;
            if x + slot > max_width {
                x = area.x + ITEM_PADDING;
                y += slot + ITEM_PADDING;
            }
        }
        Self { area, items }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    /// Tool under a screen point, if any
    pub fn hit_test(&self, x: i32, y: i32) -> Option<Tool> {
        self.items.iter().find(|item| item.rect.contains(x, y)).map(|item| item.tool)
    }

    /// Top-left corner of the "Selected: ..." label
    ///
    /// Sits right of the last item, or below all items when that spot is
    /// crowded or too close to the right edge.
    pub fn label_origin(&self) -> (i32, i32) {
        let Some(last) = self.items.last() else {
            return (self.area.x + ITEM_PADDING, self.area.y + ITEM_PADDING);
        };
        let x = last.rect.right() + 2 * ITEM_PADDING;
        let y = self.area.y + 15;
        let estimate = Rect::new(x, y, LABEL_ESTIMATE.0, LABEL_ESTIMATE.1);

        let crowded = self.items.iter().any(|item| item.rect.intersects(&estimate));
        if crowded || x > self.area.right() - LABEL_ESTIMATE.0 {
            let lowest = self.items.iter().map(|item| item.rect.bottom()).max().unwrap_or(y);
            (self.area.x + ITEM_PADDING, lowest + 5)
        } else {
            (x, y)
        }
    }

    /// Draw the strip, its thumbnails, borders and the selection label
    pub fn draw(&self, canvas: &mut dyn Canvas, registry: &TileRegistry, selected: Tool) {
        let previous = canvas.clip();
        canvas.set_clip(Some(self.area));
        canvas.fill_rect(self.area, theme::PALETTE_BG);

        for item in &self.items {
            let thumb = item.rect.inflate(-2, -2);
            if let Err(e) = registry.draw_tool(item.tool, canvas, thumb) {
                warn!("Error drawing palette item {}: {}", item.tool.label(), e);
                TileRegistry::draw_error_marker(canvas, thumb);
            }

            let (color, width) = if item.tool == selected {
                (theme::HIGHLIGHT_COLOR, 3)
            } else {
                (theme::ITEM_BORDER, 1)
            };
            canvas.stroke_round_rect(item.rect, width, 3, color);
        }

        let text = format!("Selected: {}", selected.label());
        if let Err(e) = label::draw_label(
            canvas,
            &text,
            self.label_origin(),
            theme::FONT_SIZE_CONTENT,
            theme::TEXT_COLOR,
            Some(theme::PALETTE_BG),
        ) {
            warn!("Error drawing selection label: {}", e);
        }

        canvas.set_clip(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Framebuffer;
    use crate::world::TileType;

    fn palette() -> Palette {
        Palette::new(Rect::new(0, 648, 1024, 120), 32)
    }

    #[test]
    fn test_layout_single_row() {
        let p = palette();
        assert_eq!(p.items().len(), TileType::COUNT + 1);
        assert_eq!(p.items()[0].rect, Rect::new(10, 658, 32, 32));
        assert_eq!(p.items()[1].rect, Rect::new(62, 658, 32, 32));
        assert_eq!(p.items().last().map(|i| i.tool), Some(Tool::Eraser));
        assert!(p.items().iter().all(|i| i.rect.y == 658));
    }

    #[test]
    fn test_layout_wraps() {
        let p = Palette::new(Rect::new(0, 0, 200, 200), 32);
        // 10, 62, 114 fit; the next slot would end past 180
        assert_eq!(p.items()[2].rect, Rect::new(114, 10, 32, 32));
        assert_eq!(p.items()[3].rect, Rect::new(10, 62, 32, 32));
    }

    #[test]
    fn test_hit_test() {
        let p = palette();
        assert_eq!(p.hit_test(20, 670), Some(Tool::Paint(TileType::Ground)));
        assert_eq!(p.hit_test(70, 670), Some(Tool::Paint(TileType::Brick)));
        // Gap between items
        assert_eq!(p.hit_test(50, 670), None);
        assert_eq!(p.hit_test(20, 600), None);
    }

    #[test]
    fn test_label_origin() {
        let p = palette();
        let last = p.items().last().map(|i| i.rect).unwrap();
        assert_eq!(p.label_origin(), (last.right() + 20, 663));

        let narrow = Palette::new(Rect::new(0, 0, 200, 400), 32);
        let lowest = narrow.items().iter().map(|i| i.rect.bottom()).max().unwrap();
        assert_eq!(narrow.label_origin(), (10, lowest + 5));
    }

    #[test]
    fn test_draw_highlights_selection() {
        let p = palette();
        let mut fb = Framebuffer::new(1024, 768);
        p.draw(&mut fb, &TileRegistry::new(), Tool::Paint(TileType::Brick));

        let ground = p.items()[0].rect;
        let brick = p.items()[1].rect;
        assert_eq!(fb.get_pixel((brick.x + 16) as usize, brick.y as usize), Some(theme::HIGHLIGHT_COLOR));
        assert_eq!(fb.get_pixel((brick.x + 16) as usize, (brick.y + 2) as usize), Some(theme::HIGHLIGHT_COLOR));
        assert_eq!(fb.get_pixel((ground.x + 16) as usize, ground.y as usize), Some(theme::ITEM_BORDER));
        // Background between items, nothing drawn above the strip
        assert_eq!(fb.get_pixel(52, 700), Some(theme::PALETTE_BG));
        assert_eq!(fb.get_pixel(52, 600), Some(crate::rasterizer::Color::TRANSPARENT));
        assert_eq!(fb.clip(), None);
    }
}
