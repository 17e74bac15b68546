//! Rectangle type for layout and drawing
//!
//! Integer pixel coordinates; `x`/`y` is the top-left corner and the
//! right/bottom edges are exclusive.

/// A rectangle defined by position and size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create from screen dimensions
    pub fn screen(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center X
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Center Y
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    /// True if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if point is inside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Grow (positive) or shrink (negative) around the center
    ///
    /// `dw`/`dh` are total changes in width and height.
    pub fn inflate(&self, dw: i32, dh: i32) -> Self {
        Self::new(self.x - dw / 2, self.y - dh / 2, self.w + dw, self.h + dh)
    }

    /// Shrink by padding on all sides
    pub fn pad(&self, padding: i32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            (self.w - padding * 2).max(0),
            (self.h - padding * 2).max(0),
        )
    }

    /// Move by an offset
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Check if two rectangles overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping area of two rectangles, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Get a horizontal slice from bottom
    pub fn slice_bottom(&self, height: i32) -> Self {
        let h = height.clamp(0, self.h.max(0));
        Self::new(self.x, self.bottom() - h, self.w, h)
    }

    /// Get remaining area after slicing bottom
    pub fn remaining_after_bottom(&self, height: i32) -> Self {
        let h = height.clamp(0, self.h.max(0));
        Self::new(self.x, self.y, self.w, self.h - h)
    }
}
