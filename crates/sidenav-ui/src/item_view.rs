//! [`ItemView`]: one rendered row of the side menu.

use sidenav_core::{AttrMask, Cell, Color, Grid, Point, Range, Style};
use sidenav_menu::{FlatEntry, Icon, ItemPath, PLACEHOLDER_GLYPH};

use crate::error::RowError;

/// What a click on a row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickIntent {
    /// Disabled rows ignore clicks.
    Ignore,
    /// Rows with children flip their expand flag.
    ToggleExpand,
    /// Leaf rows run their bound action.
    Activate,
}

/// Colors and metrics shared by every row of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLook {
    pub background: Color,
    pub hover: Color,
    pub selected: Color,
    pub text: Color,
    pub text_hover: Color,
    pub disabled: Color,
    pub font: AttrMask,
    /// Columns reserved for the icon before the text starts.
    pub icon_columns: i32,
    pub indent_px: i32,
    pub column_px: i32,
    /// Whether the owning menu is in its expanded state.
    pub menu_expanded: bool,
}

/// A snapshot of one menu item plus its hover and selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    path: ItemPath,
    text: String,
    glyph: char,
    tooltip: Option<String>,
    enabled: bool,
    has_children: bool,
    expanded: bool,
    level: usize,
    hovered: bool,
    selected: bool,
}

impl ItemView {
    pub fn from_entry(entry: &FlatEntry<'_>) -> Result<Self, RowError> {
        let item = entry.item;
        if item.text().chars().any(char::is_control) {
            return Err(RowError::ControlText {
                path: entry.path.clone(),
            });
        }
        Ok(Self {
            path: entry.path.clone(),
            text: item.text().to_string(),
            glyph: item.icon().map_or(PLACEHOLDER_GLYPH, Icon::ch),
            tooltip: item.tooltip().map(str::to_string),
            enabled: item.is_enabled(),
            has_children: item.has_children(),
            expanded: item.is_expanded(),
            level: item.level(),
            hovered: false,
            selected: false,
        })
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Disabled rows never show hover.
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered && self.enabled;
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn click(&self) -> ClickIntent {
        if !self.enabled {
            ClickIntent::Ignore
        } else if self.has_children {
            ClickIntent::ToggleExpand
        } else {
            ClickIntent::Activate
        }
    }

    /// The expand indicator, shown only in an expanded menu on rows with
    /// children.
    pub fn indicator(&self, menu_expanded: bool) -> Option<char> {
        match (menu_expanded && self.has_children, self.expanded) {
            (false, _) => None,
            (true, true) => Some('▼'),
            (true, false) => Some('►'),
        }
    }

    fn background(&self, look: &RowLook) -> Color {
        match (self.enabled, self.selected, self.hovered) {
            (true, true, _) => look.selected,
            (true, false, true) => look.hover,
            _ => look.background,
        }
    }

    fn foreground(&self, look: &RowLook) -> Color {
        if !self.enabled {
            look.disabled
        } else if self.hovered {
            look.text_hover
        } else {
            look.text
        }
    }

    /// Draw the row on the first line of `grid`.
    pub fn draw(&self, grid: &Grid, look: &RowLook) {
        let w = grid.width();
        let bg = self.background(look);
        let line = grid.slice(Range::new(0, 0, w, 1));
        line.fill(Cell::new(' ', Style::default().with_bg(bg)));

        let indent = self.level as i32 * look.indent_px / look.column_px.max(1);
        let icon_x = indent + (look.icon_columns - 1).max(0) / 2;
        let fg = self.foreground(look);
        let icon_style = Style::default().with_fg(fg).with_bg(bg);
        line.set(Point::new(icon_x, 0), Cell::new(self.glyph, icon_style));

        let indicator = self.indicator(look.menu_expanded);
        let text_end = if indicator.is_some() { w - 2 } else { w };
        let text_x = indent + look.icon_columns;
        if text_x < text_end {
            let text_style = icon_style.with_attrs(look.font);
            line.slice(Range::new(0, 0, text_end, 1))
                .draw_text(Point::new(text_x, 0), &self.text, text_style);
        }
        if let Some(ch) = indicator {
            line.set(Point::new(w - 2, 0), Cell::new(ch, icon_style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidenav_menu::{MenuItem, MenuModel};

    fn look(menu_expanded: bool) -> RowLook {
        RowLook {
            background: Color::WHITE,
            hover: Color::CYAN,
            selected: Color::from_rgb(80, 80, 80),
            text: Color::BLACK,
            text_hover: Color::from_rgb(1, 1, 1),
            disabled: Color::from_rgb(120, 120, 120),
            font: AttrMask::BOLD,
            icon_columns: 4,
            indent_px: 15,
            column_px: 10,
            menu_expanded,
        }
    }

    fn views(model: &MenuModel) -> Vec<ItemView> {
        model
            .flatten_all()
            .iter()
            .map(|e| ItemView::from_entry(e).unwrap())
            .collect()
    }

    fn sample() -> MenuModel {
        MenuModel::from_items(vec![
            MenuItem::new("Home").with_icon(Icon::glyph('⌂')),
            MenuItem::new("Profile").with_child(MenuItem::new("Settings")),
            MenuItem::new("Off").with_enabled(false),
        ])
    }

    #[test]
    fn click_intents() {
        let v = views(&sample());
        assert_eq!(v[0].click(), ClickIntent::Activate);
        assert_eq!(v[1].click(), ClickIntent::ToggleExpand);
        assert_eq!(v[2].click(), ClickIntent::Activate);
        assert_eq!(v[3].click(), ClickIntent::Ignore);
    }

    #[test]
    fn disabled_rows_suppress_hover() {
        let mut v = views(&sample());
        v[3].set_hovered(true);
        assert!(!v[3].is_hovered());
        v[0].set_hovered(true);
        assert!(v[0].is_hovered());
    }

    #[test]
    fn indicator_needs_expanded_menu_and_children() {
        let v = views(&sample());
        assert_eq!(v[1].indicator(true), Some('►'));
        assert_eq!(v[1].indicator(false), None);
        assert_eq!(v[0].indicator(true), None);
    }

    #[test]
    fn draws_icon_text_and_indicator() {
        let v = views(&sample());
        let grid = Grid::new(14, 1);
        v[0].draw(&grid, &look(true));
        assert_eq!(grid.line(0), " ⌂  Home      ");
        assert_eq!(grid.at(Point::new(4, 0)).style.attrs, AttrMask::BOLD);

        v[1].draw(&grid, &look(true));
        assert_eq!(grid.line(0), " ●  Profile ► ");

        // 15px of indent rounds down to one column.
        v[2].draw(&grid, &look(true));
        assert_eq!(grid.line(0), "  ●  Settings ");
    }

    #[test]
    fn state_colors() {
        let l = look(true);
        let grid = Grid::new(10, 1);
        let mut v = views(&sample());

        v[0].set_hovered(true);
        v[0].draw(&grid, &l);
        let cell = grid.at(Point::new(4, 0));
        assert_eq!(cell.style.bg, l.hover);
        assert_eq!(cell.style.fg, l.text_hover);

        v[0].set_selected(true);
        v[0].draw(&grid, &l);
        assert_eq!(grid.at(Point::new(0, 0)).style.bg, l.selected);

        v[3].set_selected(true);
        v[3].draw(&grid, &l);
        let cell = grid.at(Point::new(4, 0));
        assert_eq!(cell.style.bg, l.background);
        assert_eq!(cell.style.fg, l.disabled);
    }

    #[test]
    fn control_text_is_rejected() {
        let model = MenuModel::from_items(vec![MenuItem::new("bad\u{1b}[2J")]);
        let flat = model.flatten();
        assert_eq!(
            ItemView::from_entry(&flat[0]),
            Err(RowError::ControlText { path: vec![0] })
        );
    }
}
