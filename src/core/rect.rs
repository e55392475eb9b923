//! Axis-Aligned Rectangles
//!
//! Whole-unit bounding boxes. Overlap is strict: rectangles that only
//! share an edge do not intersect.

use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle in whole level units (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in units
    pub width: i32,
    /// Height in units
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Centre point, rounded toward the top-left.
    #[inline]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Same size, shifted by the given offsets.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// True when the two rectangles share a region of non-zero area.
    #[inline]
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// True when the vertical extents overlap (ignores X).
    #[inline]
    pub const fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_edge_touch_is_not_collision() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);
        let corner = Rect::new(10, 10, 5, 5);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&corner));
    }

    #[test]
    fn test_containment_is_collision() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 2, 2);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_offset_and_edges() {
        let r = Rect::new(3, 4, 10, 20).offset(-3, 13);
        assert_eq!(r, Rect::new(0, 17, 10, 20));
        assert_eq!(r.right(), 10);
        assert_eq!(r.bottom(), 37);
        assert_eq!(r.center(), (5, 27));
    }

    #[test]
    fn test_vertical_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.overlaps_vertically(&Rect::new(500, 5, 1, 1)));
        assert!(!a.overlaps_vertically(&Rect::new(0, 10, 1, 1)));
    }
}
