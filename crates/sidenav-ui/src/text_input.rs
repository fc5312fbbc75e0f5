//! Single-line text input, used by the model editor for text cells.

use sidenav_core::{Cell, Grid, Key, MouseAction, Msg, Point, Range, Style};

use crate::BoxDecor;

#[derive(Debug, Clone)]
pub struct TextInputConfig {
    /// Grid the input is drawn into; mouse positions are relative to it.
    pub grid: Grid,
    pub content: String,
    /// Drawn before the editable text.
    pub prompt: Option<String>,
    pub keys: TextInputKeys,
    pub box_: Option<BoxDecor>,
    pub style: TextInputStyle,
}

#[derive(Debug, Clone)]
pub struct TextInputKeys {
    pub confirm: Vec<Key>,
    pub cancel: Vec<Key>,
}

impl Default for TextInputKeys {
    fn default() -> Self {
        Self {
            confirm: vec![Key::Enter],
            cancel: vec![Key::Escape],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextInputStyle {
    pub text: Style,
    /// Left at the default, the cursor uses the text style reversed.
    pub cursor: Style,
    pub prompt: Style,
}

/// Actions returned by [`TextInput::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInputAction {
    Pass,
    Change,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct TextInput {
    grid: Grid,
    content: String,
    /// Byte offset into `content`.
    cursor: usize,
    prompt: Option<String>,
    keys: TextInputKeys,
    box_: Option<BoxDecor>,
    style: TextInputStyle,
    action: TextInputAction,
}

impl TextInput {
    pub fn new(config: TextInputConfig) -> Self {
        let cursor = config.content.len();
        let mut style = config.style;
        if style.cursor == Style::default() {
            style.cursor = Style {
                fg: style.text.bg,
                bg: style.text.fg,
                attrs: style.text.attrs,
            };
        }
        Self {
            grid: config.grid,
            content: config.content,
            cursor,
            prompt: config.prompt,
            keys: config.keys,
            box_: config.box_,
            style,
            action: TextInputAction::Pass,
        }
    }

    pub fn update(&mut self, msg: Msg) -> TextInputAction {
        self.action = TextInputAction::Pass;

        match msg {
            Msg::KeyDown { ref key, .. } => {
                if self.keys.confirm.contains(key) {
                    self.action = TextInputAction::Confirm;
                } else if self.keys.cancel.contains(key) {
                    self.action = TextInputAction::Cancel;
                } else {
                    self.edit(key);
                }
            }
            Msg::Mouse {
                action: MouseAction::Main,
                pos,
                ..
            } => {
                let inner = self.inner_range();
                if pos.y == inner.min.y && pos.x >= inner.min.x && pos.x < inner.max.x {
                    let click_col = (pos.x - inner.min.x) as usize;
                    let prompt_len = self.prompt_len();
                    if click_col >= prompt_len {
                        let target = click_col - prompt_len + self.scroll();
                        self.cursor = self
                            .content
                            .char_indices()
                            .nth(target)
                            .map_or(self.content.len(), |(i, _)| i);
                    }
                }
            }
            _ => {}
        }

        self.action
    }

    fn edit(&mut self, key: &Key) {
        match key {
            Key::Char(ch) => {
                self.content.insert(self.cursor, *ch);
                self.cursor += ch.len_utf8();
                self.action = TextInputAction::Change;
            }
            Key::Space => {
                self.content.insert(self.cursor, ' ');
                self.cursor += 1;
                self.action = TextInputAction::Change;
            }
            Key::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.content.remove(prev);
                self.cursor = prev;
                self.action = TextInputAction::Change;
            }
            Key::Delete if self.cursor < self.content.len() => {
                self.content.remove(self.cursor);
                self.action = TextInputAction::Change;
            }
            Key::ArrowLeft => self.cursor = self.prev_boundary(),
            Key::ArrowRight => {
                self.cursor = self.content[self.cursor..]
                    .char_indices()
                    .nth(1)
                    .map_or(self.content.len(), |(i, _)| self.cursor + i);
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.content.len(),
            _ => {}
        }
    }

    pub fn draw(&self, grid: &Grid) {
        let inner = match &self.box_ {
            Some(decor) => decor.draw(grid),
            None => grid.range(),
        };
        let line = grid.slice(inner.lines(0, 1));
        let prompt_len = self.prompt_len() as i32;
        if let Some(prompt) = &self.prompt {
            line.draw_text(Point::ZERO, prompt, self.style.prompt);
        }

        let input_w = (line.width() - prompt_len).max(0) as usize;
        let scroll = self.scroll();
        let cursor_col = self.content[..self.cursor].chars().count();
        let mut chars = self.content.chars().skip(scroll);
        for col in 0..input_w {
            let idx = scroll + col;
            let is_cursor = idx == cursor_col;
            let ch = match chars.next() {
                Some(c) => c,
                None if is_cursor => '_',
                None => ' ',
            };
            let style = if is_cursor { self.style.cursor } else { self.style.text };
            line.set(Point::new(prompt_len + col as i32, 0), Cell::new(ch, style));
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content and move the cursor to its end.
    pub fn set_content(&mut self, s: &str) {
        self.content = s.to_string();
        self.cursor = self.content.len();
    }

    pub fn action(&self) -> TextInputAction {
        self.action
    }

    /// Set the cursor byte position, clamped to the content.
    pub fn set_cursor(&mut self, pos: usize) {
        let mut pos = pos.min(self.content.len());
        while !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor = pos;
    }

    pub fn set_box(&mut self, box_: Option<BoxDecor>) {
        self.box_ = box_;
    }

    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    // -- private helpers --

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn inner_range(&self) -> Range {
        let r = self.grid.range();
        if self.box_.is_some() {
            Range::new(r.min.x + 1, r.min.y + 1, r.max.x - 1, r.max.y - 1)
        } else {
            r
        }
    }

    fn prompt_len(&self) -> usize {
        self.prompt.as_ref().map_or(0, |p| p.chars().count())
    }

    fn scroll(&self) -> usize {
        let input_w = (self.inner_range().width() as usize).saturating_sub(self.prompt_len());
        let cursor_col = self.content[..self.cursor].chars().count();
        if cursor_col >= input_w {
            cursor_col + 1 - input_w
        } else {
            0
        }
    }
}
