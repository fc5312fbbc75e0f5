//! [`ModelEditor`]: a table editor over a working copy of a [`MenuModel`].
//!
//! Rows are the expand-aware outline of the copy (items that are not shown
//! are listed too, so they can be shown again). Structural edits and cell
//! edits touch only the copy; [`ModelEditor::accept`] hands it back as the
//! new live model.

use std::fmt;

use sidenav_core::{AttrMask, Cell, Grid, Key, MouseAction, Msg, Point, Range, Style};
use sidenav_menu::{FlatEntry, Icon, MenuItem, MenuModel, codegen};

use crate::box_::BoxDecor;
use crate::error::EditError;
use crate::text_input::{TextInput, TextInputAction, TextInputConfig, TextInputKeys, TextInputStyle};

/// A column of the editor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Text,
    Icon,
    Tooltip,
    Enabled,
    Shown,
    Expanded,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Text,
        Column::Icon,
        Column::Tooltip,
        Column::Enabled,
        Column::Shown,
        Column::Expanded,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Text => "Text",
            Column::Icon => "Icon",
            Column::Tooltip => "Tooltip",
            Column::Enabled => "Enabled",
            Column::Shown => "Shown",
            Column::Expanded => "Expanded",
        }
    }

    pub fn is_bool(self) -> bool {
        matches!(self, Column::Enabled | Column::Shown | Column::Expanded)
    }

    fn width(self) -> i32 {
        match self {
            Column::Text => 24,
            Column::Icon => 18,
            Column::Tooltip => 22,
            Column::Enabled => 8,
            Column::Shown => 6,
            Column::Expanded => 9,
        }
    }

    /// Left edge of the column in table coordinates.
    fn x(self) -> i32 {
        Column::ALL
            .iter()
            .take_while(|c| **c != self)
            .map(|c| c.width() + 1)
            .sum()
    }

    fn at_x(x: i32) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|c| x >= c.x() && x < c.x() + c.width())
    }

    fn index(self) -> usize {
        Column::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The value of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
pub struct EditorKeys {
    pub up: Vec<Key>,
    pub down: Vec<Key>,
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub add: Vec<Key>,
    pub add_child: Vec<Key>,
    pub remove: Vec<Key>,
    pub move_up: Vec<Key>,
    pub move_down: Vec<Key>,
    /// Edit a text cell, or flip a boolean one.
    pub edit: Vec<Key>,
    /// Flip a boolean cell.
    pub flip: Vec<Key>,
    pub accept: Vec<Key>,
    pub cancel: Vec<Key>,
}

impl Default for EditorKeys {
    fn default() -> Self {
        Self {
            up: vec![Key::ArrowUp, Key::Char('k')],
            down: vec![Key::ArrowDown, Key::Char('j')],
            left: vec![Key::ArrowLeft, Key::Char('h')],
            right: vec![Key::ArrowRight, Key::Char('l')],
            add: vec![Key::Char('a')],
            add_child: vec![Key::Char('c')],
            remove: vec![Key::Char('d'), Key::Delete],
            move_up: vec![Key::Char('K')],
            move_down: vec![Key::Char('J')],
            edit: vec![Key::Enter],
            flip: vec![Key::Space],
            accept: vec![Key::Char('s')],
            cancel: vec![Key::Escape],
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorStyle {
    pub text: Style,
    pub header: Style,
    /// The row under the cursor.
    pub cursor: Style,
    /// The cell under the cursor.
    pub cell: Style,
    pub hint: Style,
    pub warning: Style,
    pub input: TextInputStyle,
}

impl Default for EditorStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            header: Style::default().with_attrs(AttrMask::BOLD | AttrMask::UNDERLINE),
            cursor: Style::default().with_attrs(AttrMask::REVERSE),
            cell: Style::default().with_attrs(AttrMask::REVERSE | AttrMask::BOLD),
            hint: Style::default().with_attrs(AttrMask::DIM),
            warning: Style::default().with_attrs(AttrMask::BOLD),
            input: TextInputStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    pub keys: EditorKeys,
    pub style: EditorStyle,
    /// Grid rows given to the editor. `None` leaves the table unscrolled
    /// until [`ModelEditor::set_height`] or a `Msg::Screen`.
    pub height: Option<i32>,
}

/// Actions returned by [`ModelEditor::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    Pass,
    /// The cursor moved.
    Move,
    /// The working copy changed.
    Change,
    /// A text cell is being edited.
    Editing,
    /// An operation was rejected and a warning is on screen.
    Warning,
    /// The user asked to commit; call [`ModelEditor::accept`].
    Accept,
    /// The user asked to discard; call [`ModelEditor::cancel`].
    Cancel,
}

#[derive(Debug)]
enum Mode {
    Browse,
    Editing { input: TextInput, row: usize, column: Column },
    Warning(String),
}

const HINT: &str = "a add  c child  d delete  K/J move  Enter edit  Space flip  s accept  Esc cancel";

#[derive(Debug)]
pub struct ModelEditor {
    model: MenuModel,
    cursor: usize,
    /// First row shown below the header line.
    scroll: usize,
    height: Option<i32>,
    column: Column,
    mode: Mode,
    keys: EditorKeys,
    style: EditorStyle,
    action: EditorAction,
}

impl ModelEditor {
    /// Open an editor on a deep copy of `live`.
    pub fn new(live: &MenuModel, config: EditorConfig) -> Self {
        Self {
            model: live.working_copy(),
            cursor: 0,
            scroll: 0,
            height: config.height,
            column: Column::Text,
            mode: Mode::Browse,
            keys: config.keys,
            style: config.style,
            action: EditorAction::Pass,
        }
    }

    /// The working copy.
    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    /// Commit: the working copy becomes the caller's new model.
    pub fn accept(self) -> MenuModel {
        log::info!("model editor accepted {}", self.model.description());
        self.model
    }

    /// Discard the working copy.
    pub fn cancel(self) {
        log::debug!("model editor cancelled");
    }

    /// Initializer source for the working copy.
    pub fn initializer(&self) -> String {
        codegen::initializer(&self.model)
    }

    // -- Rows --

    fn entries(&self) -> Vec<FlatEntry<'_>> {
        self.model.outline()
    }

    pub fn row_count(&self) -> usize {
        self.entries().len()
    }

    fn path_of(&self, row: usize) -> Result<Vec<usize>, EditError> {
        self.entries()
            .get(row)
            .map(|e| e.path.clone())
            .ok_or(EditError::NoRow(row))
    }

    fn row_of(&self, path: &[usize]) -> Option<usize> {
        self.entries().iter().position(|e| e.path == path)
    }

    /// Text column label: indented three spaces per level, with an expand
    /// marker on parents and a bullet on nested leaves.
    pub fn row_label(&self, row: usize) -> Option<String> {
        let entries = self.entries();
        let entry = entries.get(row)?;
        let item = entry.item;
        let prefix = match (item.has_children(), item.is_expanded(), entry.depth()) {
            (true, true, _) => "▼ ",
            (true, false, _) => "► ",
            (false, _, 0) => "",
            (false, _, _) => "• ",
        };
        Some(format!("{}{prefix}{}", "   ".repeat(entry.depth()), item.text()))
    }

    pub fn cell(&self, row: usize, column: Column) -> Option<CellValue> {
        let entries = self.entries();
        let item = entries.get(row)?.item;
        Some(match column {
            Column::Text => CellValue::Text(item.text().to_string()),
            Column::Icon => CellValue::Text(item.icon().map(icon_text).unwrap_or_default()),
            Column::Tooltip => CellValue::Text(item.tooltip().unwrap_or_default().to_string()),
            Column::Enabled => CellValue::Bool(item.is_enabled()),
            Column::Shown => CellValue::Bool(item.is_shown()),
            Column::Expanded => CellValue::Bool(item.is_expanded()),
        })
    }

    /// The Expanded column only applies to rows with children.
    pub fn is_editable(&self, row: usize, column: Column) -> bool {
        match self.entries().get(row) {
            Some(e) => column != Column::Expanded || e.item.has_children(),
            None => false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn set_cursor(&mut self, row: usize) {
        self.cursor = row.min(self.row_count().saturating_sub(1));
        self.follow_cursor();
    }

    /// Index of the first table row on screen.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Set the grid rows given to the editor, header and hint lines
    /// included.
    pub fn set_height(&mut self, rows: i32) {
        self.height = Some(rows.max(0));
        self.follow_cursor();
    }

    fn table_rows(&self) -> usize {
        self.height.map_or(usize::MAX, |h| (h - 2).max(0) as usize)
    }

    fn follow_cursor(&mut self) {
        let visible = self.table_rows();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if visible > 0 && self.cursor >= self.scroll.saturating_add(visible) {
            self.scroll = self.cursor + 1 - visible;
        }
        let max = self.row_count().saturating_sub(visible.max(1));
        self.scroll = self.scroll.min(max);
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.mode {
            Mode::Warning(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing { .. })
    }

    // -- Operations --

    /// Append a new root item and return its row.
    pub fn add_item(&mut self) -> usize {
        self.model.add_item(MenuItem::new("New Item"));
        let row = self.row_count() - 1;
        self.cursor = row;
        self.follow_cursor();
        row
    }

    /// Append a child under `row`, expanding it so the child is visible.
    /// Returns the child's row.
    pub fn add_child(&mut self, row: usize) -> Result<usize, EditError> {
        let parent = self.path_of(row)?;
        let child = self
            .model
            .edit_at(&parent, |p| {
                p.add_child(MenuItem::new(format!("Child of {}", p.text())));
                p.set_expanded(true);
                p.child_count() - 1
            })
            .ok_or(EditError::NoRow(row))?;
        let mut path = parent;
        path.push(child);
        let new_row = self.row_of(&path).ok_or(EditError::NoRow(row))?;
        self.cursor = new_row;
        self.follow_cursor();
        Ok(new_row)
    }

    /// Remove `row` and its subtree.
    pub fn remove(&mut self, row: usize) -> Result<MenuItem, EditError> {
        let path = self.path_of(row)?;
        let removed = self.model.remove_at(&path).ok_or(EditError::NoRow(row))?;
        self.set_cursor(self.cursor);
        Ok(removed)
    }

    /// Move the item at row `from` to the position of row `to`. Both rows
    /// must share a parent.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let a = self.path_of(from)?;
        let b = self.path_of(to)?;
        if a.len() != b.len() {
            return Err(EditError::CrossLevel {
                from: a.len() - 1,
                to: b.len() - 1,
            });
        }
        let (parent, last_a, last_b) = (&a[..a.len() - 1], a[a.len() - 1], b[b.len() - 1]);
        if parent != &b[..b.len() - 1] {
            return Err(EditError::CrossParent);
        }
        self.move_sibling(parent, last_a, last_b);
        Ok(())
    }

    pub fn move_up(&mut self, row: usize) -> Result<(), EditError> {
        let path = self.path_of(row)?;
        let (&last, parent) = path.split_last().ok_or(EditError::NoRow(row))?;
        if last == 0 {
            return Err(EditError::AtEdge);
        }
        self.move_sibling(parent, last, last - 1);
        Ok(())
    }

    pub fn move_down(&mut self, row: usize) -> Result<(), EditError> {
        let path = self.path_of(row)?;
        let (&last, parent) = path.split_last().ok_or(EditError::NoRow(row))?;
        let siblings = if parent.is_empty() {
            self.model.item_count()
        } else {
            self.model.item_at(parent).map_or(0, MenuItem::child_count)
        };
        if last + 1 >= siblings {
            return Err(EditError::AtEdge);
        }
        self.move_sibling(parent, last, last + 1);
        Ok(())
    }

    fn move_sibling(&mut self, parent: &[usize], from: usize, to: usize) {
        self.model.move_within(parent, from, to);
        let mut path = parent.to_vec();
        path.push(to);
        if let Some(row) = self.row_of(&path) {
            self.cursor = row;
            self.follow_cursor();
        }
    }

    pub fn set_cell(&mut self, row: usize, column: Column, value: CellValue) -> Result<(), EditError> {
        let path = self.path_of(row)?;
        if !self.is_editable(row, column) {
            return Err(EditError::NotEditable(column));
        }
        let apply: Box<dyn FnOnce(&mut MenuItem)> = match (column, value) {
            (Column::Text, CellValue::Text(s)) => Box::new(move |i| i.set_text(s)),
            (Column::Icon, CellValue::Text(s)) => Box::new(move |i| {
                i.set_icon(non_empty(s).map(|p| Icon::load(&p)));
            }),
            (Column::Tooltip, CellValue::Text(s)) => Box::new(move |i| i.set_tooltip(non_empty(s))),
            (Column::Enabled, CellValue::Bool(b)) => Box::new(move |i| i.set_enabled(b)),
            (Column::Shown, CellValue::Bool(b)) => Box::new(move |i| i.set_shown(b)),
            (Column::Expanded, CellValue::Bool(b)) => Box::new(move |i| i.set_expanded(b)),
            _ => return Err(EditError::WrongValue(column)),
        };
        self.model.edit_at(&path, apply).ok_or(EditError::NoRow(row))
    }

    fn flip(&mut self, row: usize, column: Column) -> Result<(), EditError> {
        match self.cell(row, column) {
            Some(CellValue::Bool(b)) => self.set_cell(row, column, CellValue::Bool(!b)),
            Some(_) => Err(EditError::WrongValue(column)),
            None => Err(EditError::NoRow(row)),
        }
    }

    fn start_editing(&mut self, row: usize, column: Column) {
        let content = match self.cell(row, column) {
            Some(CellValue::Text(s)) => s,
            _ => return,
        };
        let input = TextInput::new(TextInputConfig {
            grid: Grid::new(column.width(), 1),
            content,
            prompt: None,
            keys: TextInputKeys::default(),
            box_: None,
            style: self.style.input.clone(),
        });
        self.mode = Mode::Editing { input, row, column };
        self.action = EditorAction::Editing;
    }

    fn warn(&mut self, e: EditError) {
        log::warn!("model editor: {e}");
        self.mode = Mode::Warning(e.to_string());
        self.action = EditorAction::Warning;
    }

    fn report(&mut self, result: Result<(), EditError>) {
        match result {
            Ok(()) => self.action = EditorAction::Change,
            Err(e) => self.warn(e),
        }
    }

    // -- Update --

    /// Process a message. Mouse positions are relative to the editor's
    /// top-left corner.
    pub fn update(&mut self, msg: Msg) -> EditorAction {
        self.action = EditorAction::Pass;
        if let Msg::Screen { height, .. } = msg {
            self.set_height(height);
        }
        match std::mem::replace(&mut self.mode, Mode::Browse) {
            Mode::Warning(text) => match msg {
                Msg::KeyDown { .. }
                | Msg::Mouse {
                    action: MouseAction::Main,
                    ..
                } => self.action = EditorAction::Move,
                _ => self.mode = Mode::Warning(text),
            },
            Mode::Editing {
                mut input,
                row,
                column,
            } => match input.update(msg) {
                TextInputAction::Confirm => {
                    let value = CellValue::Text(input.content().to_string());
                    let result = self.set_cell(row, column, value);
                    self.report(result);
                }
                TextInputAction::Cancel => self.action = EditorAction::Move,
                _ => {
                    self.mode = Mode::Editing { input, row, column };
                    self.action = EditorAction::Editing;
                }
            },
            Mode::Browse => match msg {
                Msg::KeyDown { ref key, .. } => self.handle_key(key),
                Msg::Mouse {
                    action: MouseAction::Main,
                    pos,
                    ..
                } => self.handle_click(pos),
                _ => {}
            },
        }
        self.action
    }

    fn handle_key(&mut self, key: &Key) {
        let k = &self.keys;
        let (row, column) = (self.cursor, self.column);
        if k.up.contains(key) {
            self.set_cursor(row.saturating_sub(1));
            self.action = EditorAction::Move;
        } else if k.down.contains(key) {
            self.set_cursor(row + 1);
            self.action = EditorAction::Move;
        } else if k.left.contains(key) {
            self.column = Column::ALL[column.index().saturating_sub(1)];
            self.action = EditorAction::Move;
        } else if k.right.contains(key) {
            self.column = Column::ALL[(column.index() + 1).min(Column::ALL.len() - 1)];
            self.action = EditorAction::Move;
        } else if k.add.contains(key) {
            self.add_item();
            self.action = EditorAction::Change;
        } else if k.add_child.contains(key) {
            let result = self.add_child(row).map(|_| ());
            self.report(result);
        } else if k.remove.contains(key) {
            let result = self.remove(row).map(|_| ());
            self.report(result);
        } else if k.move_up.contains(key) {
            let result = self.move_up(row);
            self.report(result);
        } else if k.move_down.contains(key) {
            let result = self.move_down(row);
            self.report(result);
        } else if k.edit.contains(key) {
            if column.is_bool() {
                let result = self.flip(row, column);
                self.report(result);
            } else if row < self.row_count() {
                self.start_editing(row, column);
            }
        } else if k.flip.contains(key) {
            if column.is_bool() {
                let result = self.flip(row, column);
                self.report(result);
            }
        } else if k.accept.contains(key) {
            self.action = EditorAction::Accept;
        } else if k.cancel.contains(key) {
            self.action = EditorAction::Cancel;
        }
    }

    fn handle_click(&mut self, pos: Point) {
        if pos.y < 1 {
            return;
        }
        let line = (pos.y - 1) as usize;
        if line >= self.table_rows() {
            return;
        }
        let row = self.scroll + line;
        if row >= self.row_count() {
            return;
        }
        self.cursor = row;
        if let Some(column) = Column::at_x(pos.x) {
            self.column = column;
        }
        self.action = EditorAction::Move;
    }

    // -- Draw --

    /// Draw the table: a header line, one line per row, and a key hint on
    /// the last line.
    pub fn draw(&self, grid: &Grid) {
        grid.fill(Cell::new(' ', self.style.text));
        for column in Column::ALL {
            grid.draw_text(Point::new(column.x(), 0), column.title(), self.style.header);
        }

        let visible = (grid.height() - 2).max(0) as usize;
        let offset = self.scroll;
        for (i, entry) in self.entries().iter().enumerate().skip(offset).take(visible) {
            let y = 1 + (i - offset) as i32;
            let row_style = if i == self.cursor {
                self.style.cursor
            } else {
                self.style.text
            };
            let line = grid.slice(Range::new(0, y, grid.width(), y + 1));
            line.fill(Cell::new(' ', row_style));
            for column in Column::ALL {
                let style = if i == self.cursor && column == self.column {
                    self.style.cell
                } else {
                    row_style
                };
                let text = self.cell_text(i, entry.item, column);
                let cell = line.slice(Range::new(column.x(), 0, column.x() + column.width(), 1));
                cell.draw_text(Point::ZERO, &text, style);
            }
            if let Mode::Editing { input, row, column } = &self.mode {
                if *row == i {
                    input.draw(&line.slice(Range::new(column.x(), 0, column.x() + column.width(), 1)));
                }
            }
        }

        if grid.height() > 1 {
            grid.draw_text(Point::new(0, grid.height() - 1), HINT, self.style.hint);
        }

        if let Mode::Warning(text) = &self.mode {
            self.draw_warning(grid, text);
        }
    }

    fn cell_text(&self, row: usize, item: &MenuItem, column: Column) -> String {
        match column {
            Column::Text => self.row_label(row).unwrap_or_default(),
            Column::Expanded if !item.has_children() => String::new(),
            _ => match self.cell(row, column) {
                Some(CellValue::Text(s)) => s,
                Some(CellValue::Bool(b)) => if b { "[x]" } else { "[ ]" }.to_string(),
                None => String::new(),
            },
        }
    }

    fn draw_warning(&self, grid: &Grid, text: &str) {
        let w = (text.chars().count() as i32 + 4).min(grid.width());
        let h = 3.min(grid.height());
        let x = (grid.width() - w) / 2;
        let y = (grid.height() - h) / 2;
        let area = grid.slice(Range::new(x, y, x + w, y + h));
        area.fill(Cell::new(' ', self.style.warning));
        let inner = BoxDecor::new()
            .with_style(self.style.warning)
            .with_title("Warning")
            .with_footer("any key")
            .draw(&area);
        area.slice(inner)
            .draw_text(Point::new(1, 0), text, self.style.warning);
    }
}

fn icon_text(icon: &Icon) -> String {
    icon.path()
        .map_or_else(|| icon.ch().to_string(), str::to_string)
}

fn non_empty(s: String) -> Option<String> {
    (!s.trim().is_empty()).then_some(s)
}
