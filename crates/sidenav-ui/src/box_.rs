use sidenav_core::{Cell, Grid, Point, Range, Style};

/// Alignment for box title and footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

/// A frame drawn around a widget, with optional text on its top and bottom
/// borders.
#[derive(Debug, Clone, Default)]
pub struct BoxDecor {
    pub style: Style,
    pub title: String,
    /// Style of the title and footer text.
    pub text_style: Style,
    pub footer: String,
    pub align_title: Alignment,
    pub align_footer: Alignment,
}

impl BoxDecor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self.text_style = style;
        self
    }

    /// Draw the frame along the edges of `grid` and return the inner range
    /// (relative). Grids too small for a frame are returned whole.
    pub fn draw(&self, grid: &Grid) -> Range {
        let w = grid.width();
        let h = grid.height();
        if w < 2 || h < 2 {
            return grid.range();
        }
        let s = self.style;

        set(grid, Point::new(0, 0), '┌', s);
        set(grid, Point::new(w - 1, 0), '┐', s);
        set(grid, Point::new(0, h - 1), '└', s);
        set(grid, Point::new(w - 1, h - 1), '┘', s);
        for x in 1..(w - 1) {
            set(grid, Point::new(x, 0), '─', s);
            set(grid, Point::new(x, h - 1), '─', s);
        }
        for y in 1..(h - 1) {
            set(grid, Point::new(0, y), '│', s);
            set(grid, Point::new(w - 1, y), '│', s);
        }

        if !self.title.is_empty() {
            let top = grid.slice(Range::new(1, 0, w - 1, 1));
            draw_text_line(&self.title, self.text_style, &top, self.align_title);
        }
        if !self.footer.is_empty() {
            let bottom = grid.slice(Range::new(1, h - 1, w - 1, h));
            draw_text_line(&self.footer, self.text_style, &bottom, self.align_footer);
        }

        Range::new(1, 1, w - 1, h - 1)
    }
}

fn set(grid: &Grid, p: Point, ch: char, style: Style) {
    grid.set(p, Cell::new(ch, style));
}

fn draw_text_line(text: &str, style: Style, gd: &Grid, align: Alignment) {
    let tw = text.chars().count() as i32;
    let w = gd.width();
    let offset = match align {
        Alignment::Left => 0,
        Alignment::Right => (w - tw).max(0),
        Alignment::Center => ((w - tw) / 2).max(0),
    };
    gd.draw_text(Point::new(offset, 0), text, style);
}
