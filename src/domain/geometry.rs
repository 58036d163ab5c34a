//! Integer rectangles and points used by the layout engine.

use std::fmt;

/// Screen coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in the `(x, y, width, height)` convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        px >= x && py >= y && px < x + i64::from(self.width) && py < y + i64::from(self.height)
    }

    /// True if both rectangles share a region of positive area.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = (i64::from(self.x) + i64::from(self.width))
            .min(i64::from(other.x) + i64::from(other.width));
        let bottom = (i64::from(self.y) + i64::from(self.height))
            .min(i64::from(other.y) + i64::from(other.height));
        left < right && top < bottom
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

/// Direction along which a rectangle is divided among children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Divide the width: children are laid out left to right.
    Vertical,
    /// Divide the height: children are laid out top to bottom.
    Horizontal,
}

impl Axis {
    /// Wide rectangles split vertically; tall and square ones horizontally.
    pub fn for_rect(rect: Rect) -> Self {
        if rect.width > rect.height {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    pub fn extent(self, rect: Rect) -> u32 {
        match self {
            Axis::Vertical => rect.width,
            Axis::Horizontal => rect.height,
        }
    }

    /// Sub-rectangle starting `offset` along this axis and spanning `span`.
    pub fn slice(self, rect: Rect, offset: u32, span: u32) -> Rect {
        match self {
            Axis::Vertical => Rect {
                x: rect.x.saturating_add_unsigned(offset),
                width: span,
                ..rect
            },
            Axis::Horizontal => Rect {
                y: rect.y.saturating_add_unsigned(offset),
                height: span,
                ..rect
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10, 20, 5, 5);
        assert!(rect.contains(Point::new(10, 20)));
        assert!(rect.contains(Point::new(14, 24)));
        assert!(!rect.contains(Point::new(15, 24)));
        assert!(!rect.contains(Point::new(14, 25)));
        assert!(!rect.contains(Point::new(9, 20)));
    }

    #[test]
    fn zero_width_rect_contains_nothing() {
        let rect = Rect::new(0, 0, 0, 10);
        assert!(!rect.contains(Point::new(0, 0)));
    }

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let a = Rect::new(0, 0, 30, 10);
        let b = Rect::new(30, 0, 70, 10);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(29, 9, 2, 2)));
    }

    #[test]
    fn axis_follows_longer_side() {
        assert_eq!(Axis::for_rect(Rect::new(0, 0, 100, 10)), Axis::Vertical);
        assert_eq!(Axis::for_rect(Rect::new(0, 0, 10, 100)), Axis::Horizontal);
        assert_eq!(Axis::for_rect(Rect::new(0, 0, 10, 10)), Axis::Horizontal);
    }
}
