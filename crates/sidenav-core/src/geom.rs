//! Geometry primitives: [`Point`] and [`Range`], in grid cells.

use std::fmt;
use std::ops::{Add, Sub};

use crate::messages::Msg;

/// A cell position. X grows right, Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point moved by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A half-open rectangle `[min, max)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Point,
    pub max: Point,
}

impl Range {
    /// Build a range from two corners, in any order.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// A range of the given size anchored at the origin.
    #[inline]
    pub fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width.max(0), height.max(0))
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(self) -> Point {
        Point::new(self.width(), self.height())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Translate the whole range by `p`.
    #[inline]
    pub fn translate(self, p: Point) -> Self {
        Self {
            min: self.min + p,
            max: self.max + p,
        }
    }

    /// Overlap of two ranges; empty ranges collapse to the default range.
    pub fn intersect(self, other: Range) -> Self {
        let r = Self {
            min: Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y)),
            max: Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y)),
        };
        if r.is_empty() { Self::default() } else { r }
    }

    /// Relative rows `[y0, y1)` of this range, clipped to it.
    pub fn lines(self, y0: i32, y1: i32) -> Self {
        self.intersect(Self {
            min: Point::new(self.min.x, self.min.y + y0),
            max: Point::new(self.max.x, self.min.y + y1),
        })
    }

    /// Relative columns `[x0, x1)` of this range, clipped to it.
    pub fn columns(self, x0: i32, x1: i32) -> Self {
        self.intersect(Self {
            min: Point::new(self.min.x + x0, self.min.y),
            max: Point::new(self.min.x + x1, self.max.y),
        })
    }

    /// Rewrite mouse positions in `msg` relative to `self.min`. Other
    /// messages pass through untouched.
    pub fn rel_msg(self, msg: Msg) -> Msg {
        match msg {
            Msg::Mouse {
                action,
                pos,
                modifiers,
                time,
            } => Msg::Mouse {
                action,
                pos: pos - self.min,
                modifiers,
                time,
            },
            other => other,
        }
    }

    /// Row-major iterator over every point.
    pub fn iter(self) -> impl Iterator<Item = Point> {
        let (x0, x1) = (self.min.x, self.max.x);
        let ys = if self.is_empty() { 0..0 } else { self.min.y..self.max.y };
        ys.flat_map(move |y| (x0..x1).map(move |x| Point::new(x, y)))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MouseAction;

    #[test]
    fn range_canonicalizes_corners() {
        let r = Range::new(5, 4, 1, 0);
        assert_eq!(r.min, Point::new(1, 0));
        assert_eq!(r.size(), Point::new(4, 4));
    }

    #[test]
    fn lines_and_columns_clip() {
        let r = Range::new(2, 2, 10, 6);
        assert_eq!(r.lines(1, 2), Range::new(2, 3, 10, 4));
        assert_eq!(r.columns(6, 20), Range::new(8, 2, 10, 6));
        assert!(r.lines(9, 12).is_empty());
    }

    #[test]
    fn iter_is_row_major() {
        let pts: Vec<_> = Range::new(0, 0, 2, 2).iter().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
        assert_eq!(Range::default().iter().count(), 0);
    }

    #[test]
    fn rel_msg_shifts_mouse_only() {
        let r = Range::new(3, 1, 10, 10);
        match r.rel_msg(Msg::mouse(MouseAction::Main, Point::new(4, 5))) {
            Msg::Mouse { pos, .. } => assert_eq!(pos, Point::new(1, 4)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(r.rel_msg(Msg::Init), Msg::Init));
    }
}
