//! Shape coverage as horizontal runs
//!
//! Each helper returns one-pixel-high rectangles covering the pixels whose
//! centers fall inside the shape. Both canvas backends fill these runs, so
//! the window and exported images agree pixel for pixel.

use super::canvas::Radii;
use crate::ui::Rect;

/// First pixel whose center is at or right of `edge`
fn first_at_or_after(edge: f32) -> i32 {
    (edge - 0.5).ceil() as i32
}

/// One past the last pixel whose center is at or left of `edge`
fn end_at_or_before(edge: f32) -> i32 {
    (edge - 0.5).floor() as i32 + 1
}

/// Half-width of a circle of radius `r` at vertical distance `dy` from its center
fn chord(r: i32, dy: f32) -> f32 {
    let r = r as f32;
    (r * r - dy * dy).max(0.0).sqrt()
}

/// Extent `[start, end)` of row `y` inside a rounded rectangle
fn round_rect_span(rect: Rect, radii: Radii, y: i32) -> Option<(i32, i32)> {
    if rect.is_empty() || y < rect.y || y >= rect.bottom() {
        return None;
    }
    let py = y as f32 + 0.5;
    let mut start = rect.x;
    let mut end = rect.right();

    let top = |r: i32| r > 0 && y < rect.y + r;
    let bottom = |r: i32| r > 0 && y >= rect.bottom() - r;

    if top(radii.top_left) {
        let r = radii.top_left;
        let dx = chord(r, py - (rect.y + r) as f32);
        start = start.max(first_at_or_after((rect.x + r) as f32 - dx));
    } else if bottom(radii.bottom_left) {
        let r = radii.bottom_left;
        let dx = chord(r, py - (rect.bottom() - r) as f32);
        start = start.max(first_at_or_after((rect.x + r) as f32 - dx));
    }

    if top(radii.top_right) {
        let r = radii.top_right;
        let dx = chord(r, py - (rect.y + r) as f32);
        end = end.min(end_at_or_before((rect.right() - r) as f32 + dx));
    } else if bottom(radii.bottom_right) {
        let r = radii.bottom_right;
        let dx = chord(r, py - (rect.bottom() - r) as f32);
        end = end.min(end_at_or_before((rect.right() - r) as f32 + dx));
    }

    (end > start).then_some((start, end))
}

/// Filled rounded rectangle
pub fn round_rect_rows(rect: Rect, radii: Radii) -> Vec<Rect> {
    let radii = radii.fit(rect);
    (rect.y..rect.bottom())
        .filter_map(|y| round_rect_span(rect, radii, y).map(|(a, b)| Rect::new(a, y, b - a, 1)))
        .collect()
}

/// Rounded outline `width` pixels thick, inside `rect`
pub fn round_rect_outline_rows(rect: Rect, width: i32, radius: i32) -> Vec<Rect> {
    let width = width.max(1);
    let outer = Radii::all(radius).fit(rect);
    let inner_rect = rect.pad(width);
    let inner = Radii::all((radius - width).max(0)).fit(inner_rect);

    let mut rows = Vec::new();
    for y in rect.y..rect.bottom() {
        let Some((a, b)) = round_rect_span(rect, outer, y) else {
            continue;
        };
        match round_rect_span(inner_rect, inner, y) {
            Some((c, d)) => {
                if c > a {
                    rows.push(Rect::new(a, y, c - a, 1));
                }
                if b > d {
                    rows.push(Rect::new(d, y, b - d, 1));
                }
            }
            None => rows.push(Rect::new(a, y, b - a, 1)),
        }
    }
    rows
}

/// Ellipse inscribed in `rect`
pub fn ellipse_rows(rect: Rect) -> Vec<Rect> {
    if rect.is_empty() {
        return Vec::new();
    }
    let rx = rect.w as f32 * 0.5;
    let ry = rect.h as f32 * 0.5;
    let cx = rect.x as f32 + rx;
    let cy = rect.y as f32 + ry;

    let mut rows = Vec::with_capacity(rect.h as usize);
    for y in rect.y..rect.bottom() {
        let ny = (y as f32 + 0.5 - cy) / ry;
        if ny * ny > 1.0 {
            continue;
        }
        let dx = rx * (1.0 - ny * ny).sqrt();
        let start = first_at_or_after(cx - dx).max(rect.x);
        let end = end_at_or_before(cx + dx).min(rect.right());
        if end > start {
            rows.push(Rect::new(start, y, end - start, 1));
        }
    }
    rows
}

/// Even-odd polygon fill, limited to `bounds`
pub fn polygon_rows(points: &[(i32, i32)], bounds: Rect) -> Vec<Rect> {
    let mut rows = Vec::new();
    if points.len() < 3 {
        return rows;
    }
    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(bounds.y);
    let max_y = points.iter().map(|p| p.1).max().unwrap_or(0).min(bounds.bottom());

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in min_y..max_y {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, &(ax, ay)) in points.iter().enumerate() {
            let (bx, by) = points[(i + 1) % points.len()];
            let (ayf, byf) = (ay as f32, by as f32);
            if (ayf <= sy && sy < byf) || (byf <= sy && sy < ayf) {
                let t = (sy - ayf) / (byf - ayf);
                crossings.push(ax as f32 + t * (bx - ax) as f32);
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let start = first_at_or_after(pair[0]).max(bounds.x);
            let end = end_at_or_before(pair[1]).min(bounds.right());
            if end > start {
                rows.push(Rect::new(start, y, end - start, 1));
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(rows: &[Rect]) -> i32 {
        rows.iter().map(|r| r.w * r.h).sum()
    }

    #[test]
    fn test_square_corners_cover_everything() {
        let rows = round_rect_rows(Rect::new(3, 4, 10, 6), Radii::default());
        assert_eq!(area(&rows), 60);
    }

    #[test]
    fn test_rounded_corner_rows() {
        let rows = round_rect_rows(Rect::new(0, 0, 20, 20), Radii::all(5));
        // Top row is inset on both sides, middle rows are full width
        assert_eq!(rows[0], Rect::new(3, 0, 14, 1));
        assert_eq!(rows[10], Rect::new(0, 10, 20, 1));
        assert_eq!(rows[19], Rect::new(3, 19, 14, 1));
    }

    #[test]
    fn test_top_only_radii() {
        let rows = round_rect_rows(Rect::new(0, 0, 20, 20), Radii::top(5));
        assert_eq!(rows[0].x, 3);
        assert_eq!(rows[19], Rect::new(0, 19, 20, 1));
    }

    #[test]
    fn test_outline_ring() {
        let rows = round_rect_outline_rows(Rect::new(0, 0, 20, 20), 1, 0);
        assert_eq!(area(&rows), 76);
        let thick = round_rect_outline_rows(Rect::new(0, 0, 20, 20), 3, 0);
        assert_eq!(area(&thick), 400 - 196);
    }

    #[test]
    fn test_ellipse_inside_rect() {
        let rect = Rect::new(3, 4, 10, 6);
        let rows = ellipse_rows(rect);
        assert!(!rows.is_empty());
        for row in &rows {
            assert!(row.x >= rect.x && row.right() <= rect.right());
            assert!(row.y >= rect.y && row.bottom() <= rect.bottom());
        }
        assert!(ellipse_rows(Rect::new(0, 0, 0, 5)).is_empty());
    }

    #[test]
    fn test_polygon_square() {
        let rows = polygon_rows(&[(2, 2), (6, 2), (6, 6), (2, 6)], Rect::new(0, 0, 100, 100));
        assert_eq!(area(&rows), 16);
        assert_eq!(rows[0], Rect::new(2, 2, 4, 1));
    }

    #[test]
    fn test_polygon_bounds() {
        let rows = polygon_rows(&[(0, 0), (50, 0), (50, 50), (0, 50)], Rect::new(10, 10, 5, 5));
        assert_eq!(area(&rows), 25);
    }
}
