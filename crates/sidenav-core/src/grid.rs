//! The [`Grid`] type: a view into a shared 2D buffer of [`Cell`]s.
//!
//! Cloning a `Grid` or taking a [`slice`](Grid::slice) yields another view of
//! the same storage. Coordinates passed to a view are relative to its own
//! top-left corner, so a widget always draws starting at `(0, 0)`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::Cell;
use crate::geom::{Point, Range};

#[derive(Debug)]
struct Buffer {
    cells: Vec<Cell>,
    width: i32,
}

/// A rectangular view into a shared cell buffer.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<Buffer>>,
    /// Absolute bounds of this view inside the buffer.
    bounds: Range,
}

impl Grid {
    /// Create a grid filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0), height.max(0));
        Self {
            buffer: Rc::new(RefCell::new(Buffer {
                cells: vec![Cell::default(); (w * h) as usize],
                width: w,
            })),
            bounds: Range::sized(w, h),
        }
    }

    /// Absolute bounds of this view in the underlying buffer.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The view's own coordinate space: `(0, 0)` to its size.
    #[inline]
    pub fn range(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.range().contains(p)
    }

    /// A sub-view for the relative range `r`, clipped to this view.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r.translate(self.bounds.min)),
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let abs = p + self.bounds.min;
        let width = self.buffer.borrow().width;
        Some((abs.y * width + abs.x) as usize)
    }

    /// The cell at `p`, or a default cell outside the view.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p)
            .map(|i| self.buffer.borrow().cells[i])
            .unwrap_or_default()
    }

    /// Set the cell at `p`. Positions outside the view are ignored.
    pub fn set(&self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.buffer.borrow_mut().cells[i] = cell;
        }
    }

    /// Fill the whole view with `cell`.
    pub fn fill(&self, cell: Cell) {
        for p in self.range().iter() {
            self.set(p, cell);
        }
    }

    /// Write `text` starting at `p`, one character per column, clipped at the
    /// right edge. Returns the number of columns written.
    pub fn draw_text(&self, p: Point, text: &str, style: crate::Style) -> i32 {
        let mut x = p.x;
        for ch in text.chars() {
            if x >= self.width() {
                break;
            }
            self.set(Point::new(x, p.y), Cell::new(ch, style));
            x += 1;
        }
        (x - p.x).max(0)
    }

    /// The characters of relative row `y`, mostly useful in tests.
    pub fn line(&self, y: i32) -> String {
        (0..self.width()).map(|x| self.at(Point::new(x, y)).ch).collect()
    }

    /// Copy `src` into this view, aligning both top-left corners.
    pub fn copy_from(&self, src: &Grid) {
        let w = src.width().min(self.width());
        let h = src.height().min(self.height());
        for p in Range::sized(w, h).iter() {
            self.set(p, src.at(p));
        }
    }
}

/// A cell that changed between two frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The set of cells to repaint.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Diff two same-sized grids, keeping only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let cells = curr
        .range()
        .iter()
        .filter_map(|pos| {
            let cell = curr.at(pos);
            (prev.at(pos) != cell).then_some(FrameCell { cell, pos })
        })
        .collect();
    Frame {
        cells,
        width: curr.width(),
        height: curr.height(),
    }
}
